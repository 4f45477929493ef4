/// Capture gate
///
/// Evaluated once per frame before any reflection or culling work. Every
/// check is independent, so the gate reports all failing reasons at once
/// rather than only the first.

use bitflags::bitflags;
use glam::DVec3;
use crate::reflection::MirrorSurface;

bitflags! {
    /// Why a mirror skipped its capture this frame
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct SkipReasons: u32 {
        /// Capture triggers are configured and none is occupied
        const TRIGGERS_EMPTY       = 0b0000_0001;
        /// No camera rendered the mirror surface recently
        const NOT_RECENTLY_VISIBLE = 0b0000_0010;
        /// No active viewer camera
        const NO_VIEWER            = 0b0000_0100;
        /// Render targets / material not bound yet
        const BINDING_NOT_READY    = 0b0000_1000;
        /// Viewer beyond the capture max distance
        const TOO_FAR              = 0b0001_0000;
        /// Viewer behind the mirror plane
        const BEHIND_MIRROR        = 0b0010_0000;
    }
}

/// Per-frame gate inputs, gathered by the mirror from its collaborators.
#[derive(Debug, Clone, Copy)]
pub struct GateInput<'a> {
    pub surface: &'a MirrorSurface,
    pub requires_triggers: bool,
    pub occupied_triggers: u32,
    pub recently_visible: bool,
    pub viewer_position: Option<DVec3>,
    pub binding_ready: bool,
    /// How far behind the plane the viewer may be: 0 for a mono viewer,
    /// half the IPD for a stereo one
    pub behind_margin: f64,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CaptureGate;

impl CaptureGate {
    pub fn evaluate(input: &GateInput<'_>) -> SkipReasons {
        let mut reasons = SkipReasons::empty();

        if input.requires_triggers && input.occupied_triggers == 0 {
            reasons |= SkipReasons::TRIGGERS_EMPTY;
        }
        if !input.recently_visible {
            reasons |= SkipReasons::NOT_RECENTLY_VISIBLE;
        }
        if !input.binding_ready {
            reasons |= SkipReasons::BINDING_NOT_READY;
        }

        match input.viewer_position {
            None => reasons |= SkipReasons::NO_VIEWER,
            Some(position) => {
                let max_distance = input.surface.max_view_distance;
                if position.distance_squared(input.surface.center()) > max_distance * max_distance {
                    reasons |= SkipReasons::TOO_FAR;
                }
                if input.surface.signed_distance_to(position) <= -input.behind_margin {
                    reasons |= SkipReasons::BEHIND_MIRROR;
                }
            }
        }

        reasons
    }

    pub fn should_capture(input: &GateInput<'_>) -> bool {
        Self::evaluate(input).is_empty()
    }
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod tests;
