/// Pose - position plus orientation, the value type every mirror
/// computation reads and produces.
///
/// Local axes: +X forward, +Y right, +Z up (`up = forward × right`).

use glam::{DMat3, DQuat, DVec3};

/// Tolerance used by `Pose::approx_eq` and by degenerate-axis checks.
pub const POSE_EPSILON: f64 = 1e-4;

/// Immutable rigid transform without scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// World position
    pub position: DVec3,
    /// Unit rotation from local to world space
    pub rotation: DQuat,
}

impl Pose {
    /// Pose at the origin with identity rotation
    pub const IDENTITY: Pose = Pose {
        position: DVec3::ZERO,
        rotation: DQuat::IDENTITY,
    };

    pub fn new(position: DVec3, rotation: DQuat) -> Self {
        Self { position, rotation }
    }

    /// Build a pose whose forward axis is `forward`.
    ///
    /// Forward is the primary axis: `right` only selects the roll and is
    /// re-orthogonalized against it. Inputs need not be unit length.
    pub fn from_forward_right(position: DVec3, forward: DVec3, right: DVec3) -> Self {
        let forward = forward.normalize();
        let up = forward.cross(right).normalize();
        let right = up.cross(forward);
        let rotation = DQuat::from_mat3(&DMat3::from_cols(forward, right, up)).normalize();
        Self { position, rotation }
    }

    /// Build a pose looking from `position` toward `target`, rolled so that
    /// its up axis is as close to `world_up` as possible.
    pub fn looking_at(position: DVec3, target: DVec3, world_up: DVec3) -> Self {
        let forward = (target - position).normalize();
        let right = world_up.cross(forward);
        Self::from_forward_right(position, forward, right)
    }

    pub fn forward(&self) -> DVec3 {
        self.rotation * DVec3::X
    }

    pub fn right(&self) -> DVec3 {
        self.rotation * DVec3::Y
    }

    pub fn up(&self) -> DVec3 {
        self.rotation * DVec3::Z
    }

    /// Local → world
    pub fn transform_point(&self, local: DVec3) -> DVec3 {
        self.position + self.rotation * local
    }

    /// World → local
    pub fn inverse_transform_point(&self, world: DVec3) -> DVec3 {
        self.rotation.inverse() * (world - self.position)
    }

    /// Same orientation, translated by `offset` (world space)
    pub fn translated(&self, offset: DVec3) -> Self {
        Self { position: self.position + offset, rotation: self.rotation }
    }

    /// Compare positions and orientations within `tolerance`.
    ///
    /// Orientation is compared through the basis vectors so that `q` and
    /// `-q` are treated as the same rotation.
    pub fn approx_eq(&self, other: &Pose, tolerance: f64) -> bool {
        self.position.abs_diff_eq(other.position, tolerance)
            && self.forward().abs_diff_eq(other.forward(), tolerance)
            && self.right().abs_diff_eq(other.right(), tolerance)
            && self.up().abs_diff_eq(other.up(), tolerance)
    }

    /// Whether position is finite and rotation is a unit quaternion
    pub fn is_well_formed(&self) -> bool {
        self.position.is_finite()
            && self.rotation.is_finite()
            && (self.rotation.length() - 1.0).abs() < POSE_EPSILON
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
#[path = "pose_tests.rs"]
mod tests;
