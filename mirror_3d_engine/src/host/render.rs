/// Render backend seam: render target creation, material binding and the
/// scene capture call.

use bytemuck::{Pod, Zeroable};
use glam::{DVec2, DVec3};
use crate::error::Result;
use crate::math::Pose;
use crate::quality::RenderTargetSize;
use super::ActorId;

/// Handle to a render target owned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderTargetId(pub u64);

/// Material parameters uploaded alongside the mirror render targets.
///
/// Laid out for direct upload into a 16-byte aligned uniform block.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MirrorMaterialParams {
    pub camera_forward: [f32; 4],
    pub camera_right: [f32; 4],
    pub camera_up: [f32; 4],
    pub resolution: [f32; 2],
    pub fov_degrees: f32,
    pub flags: u32,
}

impl MirrorMaterialParams {
    pub const FLAG_STEREO: u32 = 1 << 0;
    pub const FLAG_MULTI_VIEW: u32 = 1 << 1;

    /// `camera` is the real viewer, `resolution` the display resolution.
    pub fn new(camera: &Pose, resolution: DVec2, fov_degrees: f64, flags: u32) -> Self {
        let axis = |v: DVec3| [v.x as f32, v.y as f32, v.z as f32, 0.0];
        Self {
            camera_forward: axis(camera.forward()),
            camera_right: axis(camera.right()),
            camera_up: axis(camera.up()),
            resolution: [resolution.x as f32, resolution.y as f32],
            fov_degrees: fov_degrees as f32,
            flags,
        }
    }

    pub fn is_stereo(&self) -> bool {
        self.flags & Self::FLAG_STEREO != 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// Custom near clip plane for the capture, so geometry behind the mirror
/// never shows up in the reflection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipPlane {
    pub base: DVec3,
    pub normal: DVec3,
}

/// Everything the backend needs to render one eye of one mirror.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureView {
    pub eye_index: usize,
    pub pose: Pose,
    pub fov_degrees: f64,
    pub target: RenderTargetId,
    pub clip_plane: ClipPlane,
    /// When set, only these actors are rendered
    pub show_only: Option<Vec<ActorId>>,
    /// Other mirror surfaces, always hidden
    pub hidden: Vec<ActorId>,
}

pub trait RenderBackend {
    fn create_render_target(&mut self, size: RenderTargetSize) -> Result<RenderTargetId>;

    /// Targets are released when a mirror resizes or goes away.
    fn release_render_target(&mut self, _target: RenderTargetId) {}

    /// Bind the per-eye targets and parameters to the mirror's material.
    fn bind_mirror_material(
        &mut self,
        mirror: ActorId,
        targets: &[RenderTargetId],
        params: &MirrorMaterialParams,
    ) -> Result<()>;

    fn update_material_params(&mut self, mirror: ActorId, params: &MirrorMaterialParams);

    fn capture_scene(&mut self, mirror: ActorId, view: &CaptureView) -> Result<()>;
}
