/*!
# Mirror 3D Engine

Planar mirror reflections for real-time renderers.

For each mirror the engine computes the mirrored virtual camera (one per
eye for head-mounted viewers), decides whether a capture is worth running
this frame, narrows the capture down to the actors actually visible
through the mirror, and scales render target resolution with viewing
distance. Rendering itself stays with the host: everything the engine
needs from it goes through the traits in `mirror3d::host`.

## Architecture

- **MirrorSystem**: owns the mirrors, the exclusion registry and the host
- **Mirror**: per-mirror state (config, surface, quality, render targets)
- **reflection**: mirrored camera poses and stereo eye offsets
- **culling**: six-plane reflected frustum and show-list construction
- **capture**: per-frame capture gate and trigger occupancy
- **quality**: distance-driven capture quality and render target sizing
- **registry**: keeps mirrors out of each other's reflections
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod math;
pub mod reflection;
pub mod quality;
pub mod culling;
pub mod capture;
pub mod registry;
pub mod config;
pub mod host;
pub mod mirror;
pub mod system;

// Main mirror3d namespace module
pub mod mirror3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Process-wide logger slot
    pub use crate::engine::Engine;

    // Orchestration
    pub use crate::system::MirrorSystem;
    pub use crate::mirror::{Mirror, RenderBinding, TickOutcome};
    pub use crate::config::{DebugDisplay, DynamicQualityConfig, MirrorConfig};
    pub use crate::registry::MirrorKey;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    pub mod math {
        pub use crate::math::*;
    }

    pub mod reflection {
        pub use crate::reflection::*;
    }

    pub mod culling {
        pub use crate::culling::*;
    }

    pub mod capture {
        pub use crate::capture::*;
    }

    pub mod quality {
        pub use crate::quality::*;
    }

    pub mod host {
        pub use crate::host::*;
    }
}

// Re-export math library at crate root
pub use glam;
