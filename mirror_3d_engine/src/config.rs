/// Mirror configuration
///
/// One `MirrorConfig` per mirror. Values are checked once by `validate()`
/// when the mirror is created; nothing downstream re-checks them.

use std::time::Duration;
use bitflags::bitflags;
use crate::error::Result;
use crate::host::{ActorId, TraceChannel};
use crate::math::Pose;
use crate::mirror_bail;
use crate::quality::QualityRange;
use crate::reflection::{EyeLayout, MirrorSurface};

const SOURCE: &str = "mirror3d::MirrorConfig";

/// Lowest capture quality any mirror may use
pub const MIN_CAPTURE_QUALITY: f64 = 0.1;
/// Highest capture quality for mono mirrors
pub const MAX_MONO_CAPTURE_QUALITY: f64 = 1.0;
/// Highest capture quality for stereo mirrors (oversampling)
pub const MAX_STEREO_CAPTURE_QUALITY: f64 = 2.0;

bitflags! {
    /// Debug overlays drawn through `Diagnostics`
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct DebugDisplay: u32 {
        /// Draw the six culling planes every captured frame
        const CULLING_PLANES  = 0b0000_0001;
        /// Report quality changes
        const CAPTURE_QUALITY = 0b0000_0010;
        /// Show trigger occupancy every tick
        const ACTIVE_TRIGGERS = 0b0000_0100;
    }
}

/// Distance-driven capture quality
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicQualityConfig {
    /// Period of the quality check
    pub check_interval: Duration,
    /// Delay before the first check
    pub initial_delay: Duration,
    /// Quality used at and beyond `range_end`
    pub lowest_quality: f64,
    /// Distance up to which the configured capture quality is kept
    pub range_start: f64,
    /// Distance from which `lowest_quality` is used
    pub range_end: f64,
}

impl Default for DynamicQualityConfig {
    fn default() -> Self {
        Self {
            check_interval: Duration::from_secs(1),
            initial_delay: Duration::from_secs(1),
            lowest_quality: 0.5,
            range_start: 500.0,
            range_end: 2500.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MirrorConfig {
    pub eye_layout: EyeLayout,

    /// Restrict captures to actors inside the reflected view volume
    pub culling_enabled: bool,
    /// Channel of the culling sweep (required when culling is enabled)
    pub culling_trace_channel: Option<TraceChannel>,
    /// Sweep length and far plane distance
    pub culling_trace_distance: f64,
    /// Inflates the mirror extent used for the culling frustum, in [1, 2]
    pub culling_buffer_multiplier: f64,
    /// Shown in every culled capture regardless of classification
    pub always_visible: Vec<ActorId>,

    /// Render target scale relative to the display resolution
    pub capture_quality: f64,
    /// Beyond this viewer distance the mirror stops capturing
    pub capture_max_distance: f64,
    pub dynamic_quality: Option<DynamicQualityConfig>,

    /// Interpupillary distance override in centimetres, 0 = automatic
    pub custom_ipd_cm: f64,

    /// When non-empty, capture only while the viewer is inside one of these
    pub capture_triggers: Vec<ActorId>,

    pub debug_display: DebugDisplay,

    /// Delay before the first initialization; viewport size is not known
    /// when the mirror is created
    pub init_delay: Duration,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            eye_layout: EyeLayout::Mono,
            culling_enabled: false,
            culling_trace_channel: None,
            culling_trace_distance: 10_000.0,
            culling_buffer_multiplier: 1.0,
            always_visible: Vec::new(),
            capture_quality: 1.0,
            capture_max_distance: 5_000.0,
            dynamic_quality: None,
            custom_ipd_cm: 0.0,
            capture_triggers: Vec::new(),
            debug_display: DebugDisplay::empty(),
            init_delay: Duration::from_millis(200),
        }
    }
}

impl MirrorConfig {
    pub fn stereo() -> Self {
        Self {
            eye_layout: EyeLayout::Stereo,
            ..Self::default()
        }
    }

    pub fn max_capture_quality(&self) -> f64 {
        match self.eye_layout {
            EyeLayout::Mono => MAX_MONO_CAPTURE_QUALITY,
            EyeLayout::Stereo => MAX_STEREO_CAPTURE_QUALITY,
        }
    }

    pub fn uses_capture_triggers(&self) -> bool {
        !self.capture_triggers.is_empty()
    }

    /// Surface for a mirror mesh with this config's view distance.
    pub fn surface(&self, pose: Pose, half_width: f64, half_height: f64) -> MirrorSurface {
        MirrorSurface::new(pose, half_width, half_height, self.capture_max_distance)
    }

    /// Interpolation range of the dynamic quality check, if enabled.
    pub fn quality_range(&self) -> Option<QualityRange> {
        self.dynamic_quality.as_ref().map(|dynamic| QualityRange {
            range_start: dynamic.range_start,
            range_end: dynamic.range_end,
            quality_at_start: self.capture_quality,
            quality_at_end: dynamic.lowest_quality,
        })
    }

    pub fn validate(&self) -> Result<()> {
        let max_quality = self.max_capture_quality();
        if !(MIN_CAPTURE_QUALITY..=max_quality).contains(&self.capture_quality) {
            mirror_bail!(SOURCE, InvalidConfig,
                "capture_quality {} outside [{}, {}]",
                self.capture_quality, MIN_CAPTURE_QUALITY, max_quality);
        }
        if !(self.capture_max_distance > 0.0) {
            mirror_bail!(SOURCE, InvalidConfig,
                "capture_max_distance must be positive, got {}", self.capture_max_distance);
        }
        if self.culling_enabled {
            if self.culling_trace_channel.is_none() {
                mirror_bail!(SOURCE, InvalidConfig, "culling is enabled but no trace channel is set");
            }
            if !(self.culling_trace_distance > 0.0) {
                mirror_bail!(SOURCE, InvalidConfig,
                    "culling_trace_distance must be positive, got {}", self.culling_trace_distance);
            }
        }
        if !(1.0..=2.0).contains(&self.culling_buffer_multiplier) {
            mirror_bail!(SOURCE, InvalidConfig,
                "culling_buffer_multiplier {} outside [1, 2]", self.culling_buffer_multiplier);
        }
        if !(self.custom_ipd_cm >= 0.0 && self.custom_ipd_cm.is_finite()) {
            mirror_bail!(SOURCE, InvalidConfig,
                "custom_ipd_cm must be finite and >= 0, got {}", self.custom_ipd_cm);
        }
        if self.debug_display.contains(DebugDisplay::CULLING_PLANES) && !self.culling_enabled {
            mirror_bail!(SOURCE, InvalidConfig, "CULLING_PLANES debug display requires culling");
        }
        if let Some(dynamic) = &self.dynamic_quality {
            if dynamic.check_interval.is_zero() {
                mirror_bail!(SOURCE, InvalidConfig, "dynamic quality check_interval must be non-zero");
            }
            if !(MIN_CAPTURE_QUALITY..=self.capture_quality).contains(&dynamic.lowest_quality) {
                mirror_bail!(SOURCE, InvalidConfig,
                    "lowest_quality {} outside [{}, capture_quality {}]",
                    dynamic.lowest_quality, MIN_CAPTURE_QUALITY, self.capture_quality);
            }
            if !(dynamic.range_start >= 0.0 && dynamic.range_start < dynamic.range_end) {
                mirror_bail!(SOURCE, InvalidConfig,
                    "dynamic quality range must satisfy 0 <= start < end, got [{}, {}]",
                    dynamic.range_start, dynamic.range_end);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
