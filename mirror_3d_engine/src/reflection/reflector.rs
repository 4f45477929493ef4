/// Mirrors a camera pose across a planar surface.

use glam::DVec3;
use crate::math::Pose;
use super::surface::MirrorSurface;

/// Reflect a direction across the plane with unit normal `normal`:
/// `v' = v − 2(v·n)n`.
pub fn reflect_direction(direction: DVec3, normal: DVec3) -> DVec3 {
    direction - 2.0 * direction.dot(normal) * normal
}

/// Virtual camera pose seen through `mirror` by `camera`.
///
/// Position: mirror-local X is negated. Orientation: forward and right are
/// reflected across the mirror normal and the frame is rebuilt with forward
/// as the primary axis. Applying this twice returns the original pose.
pub fn reflect(mirror: &MirrorSurface, camera: &Pose) -> Pose {
    let normal = mirror.normal();
    debug_assert!(normal.length_squared() > 0.5, "degenerate mirror normal");

    let mut local = mirror.pose.inverse_transform_point(camera.position);
    local.x = -local.x;
    let position = mirror.pose.transform_point(local);

    let forward = reflect_direction(camera.forward(), normal);
    let right = reflect_direction(camera.right(), normal);
    Pose::from_forward_right(position, forward, right)
}
