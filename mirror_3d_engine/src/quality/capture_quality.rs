//! Distance → capture quality mapping.
//!
//! Quality is a multiplier on render target resolution. It is quantized
//! to one decimal so small changes in viewer distance do not rebuild
//! render targets every check.

/// Absorbs representation error before truncation (0.7 * 10 may land
/// just under 7).
const QUANTIZE_EPSILON: f64 = 1e-6;

/// Current capture quality scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureQualityState {
    pub scale: f64,
}

impl CaptureQualityState {
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }
}

/// Distance range over which quality interpolates.
///
/// `range_start < range_end` is checked when the owning config is
/// validated, not here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityRange {
    pub range_start: f64,
    pub range_end: f64,
    pub quality_at_start: f64,
    pub quality_at_end: f64,
}

impl QualityRange {
    /// Clamped linear map of `distance_squared` between the squared range
    /// bounds onto the quality bounds.
    pub fn interpolate(&self, distance_squared: f64) -> f64 {
        let start = self.range_start * self.range_start;
        let end = self.range_end * self.range_end;
        let t = ((distance_squared - start) / (end - start)).clamp(0.0, 1.0);
        self.quality_at_start + (self.quality_at_end - self.quality_at_start) * t
    }

    fn bounds(&self) -> (f64, f64) {
        (
            self.quality_at_start.min(self.quality_at_end),
            self.quality_at_start.max(self.quality_at_end),
        )
    }
}

/// Truncate to one decimal place.
pub fn quantize_quality(quality: f64) -> f64 {
    (quality * 10.0 + QUANTIZE_EPSILON).trunc() / 10.0
}

/// Recompute quality for the viewer's squared distance.
///
/// Returns the new state and whether it differs from `state`. The result
/// never leaves the configured quality bounds, even when an endpoint is
/// not a multiple of 0.1.
pub fn update_quality(
    state: CaptureQualityState,
    distance_squared: f64,
    range: &QualityRange,
) -> (CaptureQualityState, bool) {
    let (low, high) = range.bounds();
    let scale = quantize_quality(range.interpolate(distance_squared)).clamp(low, high);
    let changed = scale != state.scale;
    (CaptureQualityState::new(scale), changed)
}

#[cfg(test)]
#[path = "capture_quality_tests.rs"]
mod tests;
