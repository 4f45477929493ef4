/// Mirror frustum - six half-spaces approximating the volume seen through
/// a mirror from the reflected viewer.
///
/// Each plane stores a unit normal `n` and distance `d` for `n·x = d`;
/// the interior is `n·x >= d`. Planes are kept in a fixed order (see the
/// `PLANE_*` indices) so tests and debug drawing can address them.

use glam::DVec3;
use crate::math::{BoundingSphere, Pose};
use crate::reflection::MirrorSurface;

/// Frustum plane indices
pub const PLANE_CLOSE: usize = 0;
pub const PLANE_FAR: usize = 1;
pub const PLANE_TOP: usize = 2;
pub const PLANE_BOTTOM: usize = 3;
pub const PLANE_LEFT: usize = 4;
pub const PLANE_RIGHT: usize = 5;

/// Half-space `normal·x >= distance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrustumPlane {
    pub normal: DVec3,
    pub distance: f64,
}

impl FrustumPlane {
    /// Zero normal: every point is inside
    pub const UNBOUNDED: FrustumPlane = FrustumPlane { normal: DVec3::ZERO, distance: 0.0 };

    /// Plane through `point` with the given (unit) normal
    pub fn from_point_normal(point: DVec3, normal: DVec3) -> Self {
        Self { normal, distance: normal.dot(point) }
    }

    /// Positive inside, negative outside
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.distance
    }

    /// Whether a sphere pokes into (or lies inside) the half-space
    pub fn admits(&self, sphere: &BoundingSphere) -> bool {
        self.signed_distance(sphere.center) >= -sphere.radius
    }
}

/// Classification result of a bounding sphere
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Culled,
}

/// Inputs for `MirrorFrustum::build` besides the mirror and reflected pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrustumParams {
    /// Inflates the mirror rectangle (>= 1)
    pub buffer_multiplier: f64,
    /// Additional inflation covering both eyes (0 for mono)
    pub ipd_half: f64,
    /// How far beyond the mirror the reflection reaches
    pub far_distance: f64,
    pub horizontal_fov_degrees: f64,
}

/// Six-plane volume built atomically from a mirror and reflected viewer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MirrorFrustum {
    /// Planes: close, far, top, bottom, left, right
    pub planes: [FrustumPlane; 6],
    far_width: f64,
}

impl MirrorFrustum {
    /// Build the frustum seen through `mirror` from `reflected_viewer`.
    ///
    /// Side planes are spanned by the reflected viewer and two adjacent
    /// (inflated) mirror corners, wound so their normals face inward.
    pub fn build(mirror: &MirrorSurface, reflected_viewer: &Pose, params: &FrustumParams) -> Self {
        let viewer = reflected_viewer.position;
        let center = mirror.center();

        let half_width = mirror.half_width * params.buffer_multiplier + params.ipd_half;
        let half_height = mirror.half_height * params.buffer_multiplier + params.ipd_half;
        let [top_left, top_right, bottom_left, bottom_right] = mirror.corners(half_width, half_height);

        let to_top_left = (top_left - viewer).normalize_or_zero();
        let to_top_right = (top_right - viewer).normalize_or_zero();
        let to_bottom_left = (bottom_left - viewer).normalize_or_zero();
        let to_bottom_right = (bottom_right - viewer).normalize_or_zero();
        let to_mirror = (center - viewer).normalize_or_zero();

        // Same plane as the one through the corners; anchored on the center
        // so the mirror center classifies exactly on the boundary.
        let close = FrustumPlane::from_point_normal(center, mirror.normal());

        let far_point = center + to_mirror * params.far_distance;
        let far = FrustumPlane::from_point_normal(far_point, -to_mirror);

        // A reflected viewer on or in front of the mirror plane (stereo margin)
        // has no pyramid through the rectangle; keep the sides open.
        let sides = if mirror.signed_distance_to(viewer) >= 0.0 {
            [FrustumPlane::UNBOUNDED; 4]
        } else {
            [
                FrustumPlane::from_point_normal(
                    top_left,
                    to_top_right.cross(to_top_left).normalize_or_zero(),
                ),
                FrustumPlane::from_point_normal(
                    bottom_left,
                    to_bottom_left.cross(to_bottom_right).normalize_or_zero(),
                ),
                FrustumPlane::from_point_normal(
                    top_left,
                    to_top_left.cross(to_bottom_left).normalize_or_zero(),
                ),
                FrustumPlane::from_point_normal(
                    top_right,
                    to_bottom_right.cross(to_top_right).normalize_or_zero(),
                ),
            ]
        };
        let [top, bottom, left, right] = sides;

        let viewer_to_mirror = viewer.distance(center);
        let far_width = (params.horizontal_fov_degrees * 0.5).to_radians().tan()
            * (viewer_to_mirror + params.far_distance)
            * 2.0;

        Self {
            planes: [close, far, top, bottom, left, right],
            far_width,
        }
    }

    /// Conservative sphere test: culled as soon as one plane has the whole
    /// sphere on its exterior side.
    pub fn classify(&self, sphere: &BoundingSphere) -> Visibility {
        if self.planes.iter().all(|plane| plane.admits(sphere)) {
            Visibility::Visible
        } else {
            Visibility::Culled
        }
    }

    pub fn is_visible(&self, sphere: &BoundingSphere) -> bool {
        self.classify(sphere) == Visibility::Visible
    }

    /// Lateral extent of the reflected view at the far plane
    /// (`2·tan(fov/2)·(|viewer − mirror| + far_distance)`).
    pub fn far_width(&self) -> f64 {
        self.far_width
    }

    pub fn plane(&self, index: usize) -> &FrustumPlane {
        &self.planes[index]
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
