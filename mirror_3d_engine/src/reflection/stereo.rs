/// Stereo eye splitting.
///
/// Mono is the one-eye case of the same rig with a zero offset.

use crate::math::Pose;

/// Interpupillary distance used when neither configuration nor device
/// report one.
pub const DEFAULT_IPD_CM: f64 = 6.4;

/// Number of eyes a mirror captures for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EyeLayout {
    /// Single capture from the mirrored camera
    #[default]
    Mono,
    /// Left and right captures offset by half the IPD
    Stereo,
}

impl EyeLayout {
    pub fn eye_count(&self) -> usize {
        match self {
            EyeLayout::Mono => 1,
            EyeLayout::Stereo => 2,
        }
    }
}

/// Eye poses derived from one mirrored camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyePoses {
    pub left: Pose,
    pub right: Pose,
}

/// Offset the mirrored camera by `∓ipd_half` along its own right axis.
///
/// Both eyes share the camera's orientation.
pub fn split_eyes(mirrored_camera: &Pose, ipd_half: f64) -> EyePoses {
    let offset = mirrored_camera.right() * ipd_half;
    EyePoses {
        left: mirrored_camera.translated(-offset),
        right: mirrored_camera.translated(offset),
    }
}

impl EyeLayout {
    /// Poses to capture from, left eye first.
    pub fn eye_poses(&self, mirrored_camera: &Pose, ipd_half: f64) -> Vec<Pose> {
        match self {
            EyeLayout::Mono => vec![*mirrored_camera],
            EyeLayout::Stereo => {
                let eyes = split_eyes(mirrored_camera, ipd_half);
                vec![eyes.left, eyes.right]
            }
        }
    }
}
