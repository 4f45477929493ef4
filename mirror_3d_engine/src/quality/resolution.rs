//! Render target sizing from display resolution and capture quality.

use glam::DVec2;
use crate::reflection::EyeLayout;

/// Per-eye render target size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTargetSize {
    pub width: u32,
    pub height: u32,
}

impl RenderTargetSize {
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Size one eye's render target.
///
/// Mono: honours a viewer-constrained aspect ratio (wide aspects drive
/// from width, tall ones from height). Stereo: the device reports both
/// eyes side by side, so width is halved unless multi-view rendering
/// packs them into layers.
pub fn render_target_size(
    layout: EyeLayout,
    resolution: DVec2,
    quality: f64,
    constrained_aspect_ratio: Option<f64>,
    multi_view: bool,
) -> RenderTargetSize {
    let (width, height) = match layout {
        EyeLayout::Mono => match constrained_aspect_ratio {
            Some(aspect) if aspect > 1.0 => {
                let width = resolution.x * quality;
                (width, width / aspect)
            }
            Some(aspect) if aspect > 0.0 => {
                let height = resolution.y * quality;
                (height * aspect, height)
            }
            _ => (resolution.x * quality, resolution.y * quality),
        },
        EyeLayout::Stereo => {
            let eye_share = if multi_view { 1.0 } else { 0.5 };
            (resolution.x * quality * eye_share, resolution.y * quality)
        }
    };
    RenderTargetSize {
        width: width.max(1.0) as u32,
        height: height.max(1.0) as u32,
    }
}
