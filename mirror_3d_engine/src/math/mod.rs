//! Math module - poses and bounding volumes.
//!
//! Double precision throughout; axis convention is +X forward, +Y right,
//! +Z up.

mod pose;
mod bounds;

pub use pose::{Pose, POSE_EPSILON};
pub use bounds::BoundingSphere;
