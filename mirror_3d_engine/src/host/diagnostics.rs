/// Diagnostics and resource hints.

use glam::DVec3;
use crate::culling::FrustumPlane;
use crate::engine::Engine;
use crate::log::LogSeverity;

pub trait Diagnostics {
    /// Surface a message to the developer (on-screen text, console, ...).
    fn notify(&mut self, severity: LogSeverity, message: &str);

    /// Hint that render targets were released and a collection pass is
    /// worth running.
    fn request_resource_collection(&mut self) {}

    fn draw_debug_plane(&mut self, _plane: &FrustumPlane, _center: DVec3, _size: f64) {}

    fn draw_debug_text(&mut self, _location: DVec3, _text: &str) {}
}

/// Routes diagnostics to the engine logger.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn notify(&mut self, severity: LogSeverity, message: &str) {
        Engine::log(severity, "mirror3d::diagnostics", message.to_string());
    }

    fn request_resource_collection(&mut self) {
        crate::mirror_trace!("mirror3d::diagnostics", "Resource collection requested");
    }
}
