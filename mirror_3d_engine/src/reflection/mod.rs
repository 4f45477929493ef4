//! Reflection module - mirror surfaces, mirrored camera poses and
//! per-eye offsets.
//!
//! Pure functions over value types; no state is kept between frames.

mod surface;
mod reflector;
mod stereo;

pub use surface::MirrorSurface;
pub use reflector::{reflect, reflect_direction};
pub use stereo::{split_eyes, EyeLayout, EyePoses, DEFAULT_IPD_CM};

#[cfg(test)]
#[path = "reflection_tests.rs"]
mod tests;
