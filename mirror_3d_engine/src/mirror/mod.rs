//! Mirror - one reflective surface with its capture state.

mod mirror;

pub use mirror::{Mirror, RenderBinding, TickOutcome, DEFAULT_FOV_DEGREES};
