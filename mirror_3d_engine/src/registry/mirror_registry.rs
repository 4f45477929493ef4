/// Keeps every live mirror's surface out of every other live mirror's
/// capture, so two facing mirrors never recurse into each other.
///
/// Mirrors are referenced by `MirrorKey` only. Each entry stores the
/// surface actor and the set of keys it excludes; the relation is kept
/// symmetric and irreflexive by `on_create` / `on_destroy`.

use rustc_hash::FxHashSet;
use slotmap::{new_key_type, SecondaryMap};
use crate::host::ActorId;

new_key_type! {
    /// Stable handle to a mirror owned by a `MirrorSystem`.
    pub struct MirrorKey;
}

#[derive(Debug, Clone)]
struct RegistryEntry {
    surface: ActorId,
    excludes: FxHashSet<MirrorKey>,
}

#[derive(Debug, Default)]
pub struct MirrorRegistry {
    entries: SecondaryMap<MirrorKey, RegistryEntry>,
}

impl MirrorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mirror and cross-link it with every live mirror.
    /// Registering a key twice leaves the registry unchanged apart from
    /// the surface actor.
    pub fn on_create(&mut self, key: MirrorKey, surface: ActorId) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.surface = surface;
            return;
        }

        let mut excludes = FxHashSet::default();
        for (other_key, other) in self.entries.iter_mut() {
            other.excludes.insert(key);
            excludes.insert(other_key);
        }
        self.entries.insert(key, RegistryEntry { surface, excludes });
    }

    /// Unregister a mirror and scrub it from every other exclusion set.
    /// Unknown keys are ignored.
    pub fn on_destroy(&mut self, key: MirrorKey) {
        if self.entries.remove(key).is_none() {
            return;
        }
        for (_, other) in self.entries.iter_mut() {
            other.excludes.remove(&key);
        }
    }

    pub fn contains(&self, key: MirrorKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn active_ids(&self) -> FxHashSet<MirrorKey> {
        self.entries.keys().collect()
    }

    /// Keys of the mirrors hidden from `key`'s capture.
    pub fn exclusions(&self, key: MirrorKey) -> FxHashSet<MirrorKey> {
        self.entries
            .get(key)
            .map(|entry| entry.excludes.clone())
            .unwrap_or_default()
    }

    pub fn excludes(&self, key: MirrorKey, other: MirrorKey) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| entry.excludes.contains(&other))
    }

    /// Surface actors the host must hide from `key`'s capture, sorted for
    /// stable output.
    pub fn hidden_surfaces(&self, key: MirrorKey) -> Vec<ActorId> {
        let Some(entry) = self.entries.get(key) else {
            return Vec::new();
        };
        let mut surfaces: Vec<ActorId> = entry
            .excludes
            .iter()
            .filter_map(|other| self.entries.get(*other).map(|e| e.surface))
            .collect();
        surfaces.sort();
        surfaces
    }
}

#[cfg(test)]
#[path = "mirror_registry_tests.rs"]
mod tests;
