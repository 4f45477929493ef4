//! Mirror system - owns every live mirror, the mutual exclusion registry
//! and the host collaborators.

mod mirror_system;

pub use mirror_system::MirrorSystem;
