//! Host collaborators
//!
//! The mirror core never reaches into the host engine directly. Camera
//! discovery, display queries, spatial queries, rendering, timers and
//! diagnostics all come in through the traits declared here.

mod ids;
mod scene;
mod display;
mod render;
mod scheduler;
mod diagnostics;
mod services;
pub mod mock_host;

pub use ids::{ActorId, TraceChannel};
pub use scene::{SceneQuery, ViewerState};
pub use display::DisplayInfo;
pub use render::{CaptureView, ClipPlane, MirrorMaterialParams, RenderBackend, RenderTargetId};
pub use scheduler::{MirrorTask, Scheduler, TimerQueue};
pub use diagnostics::{Diagnostics, LogDiagnostics};
pub use services::MirrorHost;
pub use mock_host::{MockHost, MockHostState};

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod scheduler_tests;
