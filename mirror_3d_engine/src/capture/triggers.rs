/// Trigger zone occupancy for the tracked viewer actor.
///
/// Fed by the host's overlap begin/end events. Only events for this
/// mirror's triggers and the tracked actor count; the count never drops
/// below zero even when end events arrive without a matching begin.

use rustc_hash::FxHashSet;
use crate::host::ActorId;

#[derive(Debug, Clone, Default)]
pub struct TriggerOccupancy {
    triggers: FxHashSet<ActorId>,
    tracked: Option<ActorId>,
    count: u32,
}

impl TriggerOccupancy {
    pub fn new(triggers: &[ActorId]) -> Self {
        Self {
            triggers: triggers.iter().copied().collect(),
            tracked: None,
            count: 0,
        }
    }

    /// Captures are gated on occupancy only when triggers are configured.
    pub fn is_required(&self) -> bool {
        !self.triggers.is_empty()
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn tracked(&self) -> Option<ActorId> {
        self.tracked
    }

    pub fn triggers(&self) -> impl Iterator<Item = &ActorId> {
        self.triggers.iter()
    }

    /// Track a new viewer actor. The count restarts from zero; call
    /// `seed` afterwards for actors already inside a trigger.
    pub fn track(&mut self, actor: Option<ActorId>) {
        self.tracked = actor;
        self.count = 0;
    }

    /// Count `trigger` as occupied if the tracked actor is already inside.
    pub fn seed(&mut self, trigger: ActorId, overlapping: &[ActorId]) {
        if !self.triggers.contains(&trigger) {
            return;
        }
        if let Some(tracked) = self.tracked {
            if overlapping.contains(&tracked) {
                self.count += 1;
            }
        }
    }

    /// Returns true when the event changed the count.
    pub fn on_begin_overlap(&mut self, trigger: ActorId, actor: ActorId) -> bool {
        if !self.is_relevant(trigger, actor) {
            return false;
        }
        self.count += 1;
        true
    }

    /// Returns true when the event changed the count.
    pub fn on_end_overlap(&mut self, trigger: ActorId, actor: ActorId) -> bool {
        if !self.is_relevant(trigger, actor) || self.count == 0 {
            return false;
        }
        self.count -= 1;
        true
    }

    fn is_relevant(&self, trigger: ActorId, actor: ActorId) -> bool {
        self.triggers.contains(&trigger) && self.tracked == Some(actor)
    }
}

#[cfg(test)]
#[path = "triggers_tests.rs"]
mod tests;
