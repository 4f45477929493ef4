/// Mirror surface - the planar proxy whose reflection is rendered.

use glam::DVec3;
use crate::error::Result;
use crate::math::Pose;
use crate::mirror_bail;

/// Planar mirror in world space.
///
/// The pose's local +X axis is the mirror normal (reflection axis); the
/// reflecting rectangle spans `±half_width` along local +Y and
/// `±half_height` along local +Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MirrorSurface {
    pub pose: Pose,
    pub half_width: f64,
    pub half_height: f64,
    /// Captures stop once the viewer is this far away
    pub max_view_distance: f64,
}

impl MirrorSurface {
    pub fn new(pose: Pose, half_width: f64, half_height: f64, max_view_distance: f64) -> Self {
        Self { pose, half_width, half_height, max_view_distance }
    }

    /// Mirror location (plane base point)
    pub fn center(&self) -> DVec3 {
        self.pose.position
    }

    /// Mirror normal
    pub fn normal(&self) -> DVec3 {
        self.pose.forward()
    }

    /// Corners `[top_left, top_right, bottom_left, bottom_right]` of a
    /// rectangle centered on the mirror with the given half extents.
    pub fn corners(&self, half_width: f64, half_height: f64) -> [DVec3; 4] {
        let center = self.center();
        let top = center + self.pose.up() * half_height;
        let bottom = center - self.pose.up() * half_height;
        let right = self.pose.right() * half_width;
        [top - right, top + right, bottom - right, bottom + right]
    }

    /// Viewer position expressed along the mirror normal (> 0 in front)
    pub fn signed_distance_to(&self, point: DVec3) -> f64 {
        self.pose.inverse_transform_point(point).x
    }

    /// Reject degenerate geometry before a mirror goes live.
    pub fn validate(&self) -> Result<()> {
        if !self.pose.is_well_formed() {
            mirror_bail!("mirror3d::MirrorSurface", InvalidMirror,
                "mirror pose is not finite or its rotation is not unit length");
        }
        if !(self.half_width > 0.0 && self.half_height > 0.0) {
            mirror_bail!("mirror3d::MirrorSurface", InvalidMirror,
                "mirror extent must be positive (half_width={}, half_height={})",
                self.half_width, self.half_height);
        }
        if !(self.max_view_distance > 0.0) {
            mirror_bail!("mirror3d::MirrorSurface", InvalidMirror,
                "max_view_distance must be positive, got {}", self.max_view_distance);
        }
        Ok(())
    }
}
