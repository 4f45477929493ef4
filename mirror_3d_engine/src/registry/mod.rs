//! Mirror registry - mutual exclusion of mirror surfaces between live
//! mirrors.

mod mirror_registry;

pub use mirror_registry::{MirrorKey, MirrorRegistry};
