/// Mirror culler - turns host query hits into the show-only list of a
/// mirror capture.
///
/// The host performs the swept-box query described by `TraceVolume`; the
/// culler only classifies what comes back.

use glam::{DQuat, DVec3};
use rustc_hash::FxHashSet;
use crate::host::{ActorId, TraceChannel};
use crate::math::{BoundingSphere, Pose};
use crate::reflection::MirrorSurface;
use super::frustum::MirrorFrustum;

/// Half depth of the swept box along the trace direction
pub const TRACE_BOX_HALF_DEPTH: f64 = 100.0;

/// Swept box the host sweeps to collect culling candidates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceVolume {
    pub start: DVec3,
    pub end: DVec3,
    pub half_extents: DVec3,
    pub orientation: DQuat,
    pub channel: TraceChannel,
}

impl TraceVolume {
    /// Sweep from the mirror along the mirrored camera's forward axis,
    /// wide enough to cover the reflected field of view at the far plane.
    pub fn new(
        mirror: &MirrorSurface,
        mirrored_camera: &Pose,
        frustum: &MirrorFrustum,
        trace_distance: f64,
        channel: TraceChannel,
    ) -> Self {
        let start = mirror.center();
        let half_width = frustum.far_width() * 0.5;
        Self {
            start,
            end: start + mirrored_camera.forward() * trace_distance,
            half_extents: DVec3::new(TRACE_BOX_HALF_DEPTH, half_width, half_width),
            orientation: mirrored_camera.rotation,
            channel,
        }
    }
}

/// One component returned by the host query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryHit {
    pub actor: ActorId,
    pub sphere: BoundingSphere,
}

/// Actors to render in a mirror capture, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShowList {
    actors: Vec<ActorId>,
    seen: FxHashSet<ActorId>,
}

impl ShowList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the actor was already listed.
    pub fn insert(&mut self, actor: ActorId) -> bool {
        if self.seen.insert(actor) {
            self.actors.push(actor);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, actor: ActorId) -> bool {
        self.seen.contains(&actor)
    }

    pub fn actors(&self) -> &[ActorId] {
        &self.actors
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }
}

/// Classifies query hits against a mirror frustum.
pub struct MirrorCuller;

impl MirrorCuller {
    pub fn new() -> Self {
        Self
    }

    /// Build the show list from `hits`.
    ///
    /// An actor is shown once any of its components is visible; later
    /// components of a shown actor are not tested. `always_visible` is
    /// unioned in after classification.
    pub fn cull(
        &self,
        frustum: &MirrorFrustum,
        hits: &[QueryHit],
        always_visible: &[ActorId],
    ) -> ShowList {
        let mut show = ShowList::new();
        for hit in hits {
            if show.contains(hit.actor) {
                continue;
            }
            if frustum.is_visible(&hit.sphere) {
                show.insert(hit.actor);
            }
        }
        for &actor in always_visible {
            show.insert(actor);
        }
        show
    }
}

impl Default for MirrorCuller {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "culler_tests.rs"]
mod tests;
