/// Display queries. Every method may come back empty when the
/// information is not available yet (no window, no headset).

use glam::DVec2;

pub trait DisplayInfo {
    /// Window viewport size in pixels.
    fn viewport_resolution(&self) -> Option<DVec2>;

    /// Head-mounted device ideal render target size (both eyes).
    fn device_resolution(&self) -> Option<DVec2> {
        None
    }

    /// Device interpupillary distance in centimetres.
    fn device_ipd_cm(&self) -> Option<f64> {
        None
    }

    /// Device horizontal field of view in degrees.
    fn device_fov_degrees(&self) -> Option<f64> {
        None
    }

    fn is_multi_view(&self) -> bool {
        false
    }
}
