//! Capture gating - the per-frame decision whether a mirror captures at
//! all, and the trigger zone occupancy feeding it.

mod gate;
mod triggers;

pub use gate::{CaptureGate, GateInput, SkipReasons};
pub use triggers::TriggerOccupancy;
