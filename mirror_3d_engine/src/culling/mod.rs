//! Culling module - reflected view volume and show-list construction.

mod frustum;
mod culler;

pub use frustum::{
    FrustumParams, FrustumPlane, MirrorFrustum, Visibility,
    PLANE_CLOSE, PLANE_FAR, PLANE_TOP, PLANE_BOTTOM, PLANE_LEFT, PLANE_RIGHT,
};
pub use culler::{MirrorCuller, QueryHit, ShowList, TraceVolume, TRACE_BOX_HALF_DEPTH};
