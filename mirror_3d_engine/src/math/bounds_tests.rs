use glam::DVec3;
use super::*;

#[test]
fn test_bounding_sphere_clamps_negative_radius() {
    let sphere = BoundingSphere::new(DVec3::ZERO, -3.0);
    assert_eq!(sphere.radius, 0.0);
}

#[test]
fn test_bounding_sphere_point_has_zero_radius() {
    let sphere = BoundingSphere::point(DVec3::ONE);
    assert_eq!(sphere.center, DVec3::ONE);
    assert_eq!(sphere.radius, 0.0);
}

#[test]
fn test_bounding_sphere_keeps_positive_radius() {
    let sphere = BoundingSphere::new(DVec3::new(10.0, -4.0, 2.5), 12.5);
    assert_eq!(sphere.radius, 12.5);
}
