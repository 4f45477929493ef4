/// Scene-side queries: active camera, surface visibility and the
/// swept-box bounding sphere query used for culling.

use crate::culling::{QueryHit, TraceVolume};
use crate::math::Pose;
use super::ActorId;

/// The real camera a mirror reflects.
///
/// Carries no IPD: stereo mirrors take it from `MirrorConfig::custom_ipd_cm`,
/// else `DisplayInfo::device_ipd_cm`, else `DEFAULT_IPD_CM`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerState {
    pub pose: Pose,
    /// Horizontal field of view in degrees
    pub fov_degrees: f64,
    /// Set when the camera forces a fixed aspect ratio (letterboxing)
    pub constrained_aspect_ratio: Option<f64>,
    /// Pawn or body the camera belongs to, tracked by trigger zones
    pub actor: Option<ActorId>,
}

impl ViewerState {
    pub fn new(pose: Pose, fov_degrees: f64) -> Self {
        Self {
            pose,
            fov_degrees,
            constrained_aspect_ratio: None,
            actor: None,
        }
    }

    pub fn with_actor(mut self, actor: ActorId) -> Self {
        self.actor = Some(actor);
        self
    }

    pub fn with_constrained_aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        self.constrained_aspect_ratio = Some(aspect_ratio);
        self
    }
}

pub trait SceneQuery {
    /// Camera currently bound to the local player, if any.
    fn active_viewer(&self) -> Option<ViewerState>;

    /// Whether the mirror surface was rendered by any camera recently.
    fn was_recently_visible(&self, surface: ActorId) -> bool;

    /// Sweep `volume` through the scene and report every component hit
    /// together with its bounding sphere.
    fn query_bounding_spheres(&self, volume: &TraceVolume) -> Vec<QueryHit>;

    /// Actors already inside `trigger` when a mirror starts tracking it.
    fn actors_overlapping(&self, _trigger: ActorId) -> Vec<ActorId> {
        Vec::new()
    }
}
