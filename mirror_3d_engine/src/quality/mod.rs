//! Capture quality - distance-driven render target scale and render
//! target sizing.

mod capture_quality;
mod resolution;

pub use capture_quality::{quantize_quality, update_quality, CaptureQualityState, QualityRange};
pub use resolution::{render_target_size, RenderTargetSize};
