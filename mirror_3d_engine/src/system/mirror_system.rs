/// Central mirror manager.
///
/// Mirrors live in a `SlotMap` and are referenced by `MirrorKey` only.
/// Scheduled tasks carry the key and are resolved here, so a task firing
/// after its mirror was destroyed is a no-op.

use slotmap::SlotMap;
use crate::config::MirrorConfig;
use crate::error::Result;
use crate::host::{ActorId, MirrorHost, MirrorTask};
use crate::mirror::{Mirror, TickOutcome};
use crate::reflection::MirrorSurface;
use crate::registry::{MirrorKey, MirrorRegistry};
use crate::{mirror_debug, mirror_error, mirror_info, mirror_trace};

const SOURCE: &str = "mirror3d::MirrorSystem";

pub struct MirrorSystem {
    mirrors: SlotMap<MirrorKey, Mirror>,
    registry: MirrorRegistry,
    host: MirrorHost,
}

impl MirrorSystem {
    /// Create an empty mirror system over `host`
    pub fn new(host: MirrorHost) -> Self {
        Self {
            mirrors: SlotMap::with_key(),
            registry: MirrorRegistry::new(),
            host,
        }
    }

    pub fn host(&self) -> &MirrorHost {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut MirrorHost {
        &mut self.host
    }

    pub fn registry(&self) -> &MirrorRegistry {
        &self.registry
    }

    // ===== LIFECYCLE =====

    /// Create a mirror, register it against every live mirror and
    /// schedule its deferred initialization (and quality checks when
    /// dynamic quality is enabled).
    ///
    /// # Errors
    ///
    /// Returns an error if the config or the surface is invalid. Nothing
    /// is registered or scheduled in that case.
    pub fn create_mirror(
        &mut self,
        actor: ActorId,
        surface: MirrorSurface,
        config: MirrorConfig,
    ) -> Result<MirrorKey> {
        let mut mirror = Mirror::new(actor, surface, config)?;

        let viewer_actor = self.host.scene.active_viewer().and_then(|viewer| viewer.actor);
        mirror.setup_triggers(&mut self.host, viewer_actor);

        let init_delay = mirror.config().init_delay;
        let dynamic = mirror.config().dynamic_quality.clone();

        let key = self.mirrors.insert(mirror);
        self.registry.on_create(key, actor);

        self.host.scheduler.schedule_once(init_delay, MirrorTask::Initialize(key));
        if let Some(dynamic) = dynamic {
            self.host.scheduler.schedule_repeating(
                dynamic.initial_delay,
                dynamic.check_interval,
                MirrorTask::CheckQuality(key),
            );
        }

        mirror_info!(SOURCE, "Mirror {:?} created ({} live)", actor, self.mirrors.len());
        Ok(key)
    }

    /// Destroy a mirror: release its render targets, scrub it from the
    /// registry and drop its pending tasks.
    ///
    /// Returns false if `key` was not live.
    pub fn destroy_mirror(&mut self, key: MirrorKey) -> bool {
        let Some(mut mirror) = self.mirrors.remove(key) else {
            mirror_trace!(SOURCE, "destroy_mirror: {:?} is not live", key);
            return false;
        };
        mirror.release(&mut self.host);
        self.registry.on_destroy(key);
        self.host.scheduler.cancel(key);
        mirror_info!(SOURCE, "Mirror {:?} destroyed ({} live)", mirror.actor(), self.mirrors.len());
        true
    }

    pub fn destroy_all_mirrors(&mut self) {
        let keys: Vec<MirrorKey> = self.mirrors.keys().collect();
        for key in keys {
            self.destroy_mirror(key);
        }
    }

    // ===== ACCESSORS =====

    pub fn mirror_count(&self) -> usize {
        self.mirrors.len()
    }

    pub fn mirror(&self, key: MirrorKey) -> Option<&Mirror> {
        self.mirrors.get(key)
    }

    pub fn mirror_mut(&mut self, key: MirrorKey) -> Option<&mut Mirror> {
        self.mirrors.get_mut(key)
    }

    pub fn mirror_keys(&self) -> Vec<MirrorKey> {
        self.mirrors.keys().collect()
    }

    /// Surfaces of every other live mirror, hidden from `key`'s capture.
    pub fn hidden_actors(&self, key: MirrorKey) -> Vec<ActorId> {
        self.registry.hidden_surfaces(key)
    }

    // ===== PER FRAME =====

    /// Tick every mirror once. A mirror whose capture fails is logged and
    /// left out of the result; the others still run.
    pub fn tick(&mut self) -> Vec<(MirrorKey, TickOutcome)> {
        let mut outcomes = Vec::with_capacity(self.mirrors.len());
        for (key, mirror) in self.mirrors.iter_mut() {
            let hidden = self.registry.hidden_surfaces(key);
            match mirror.tick(&mut self.host, &hidden) {
                Ok(outcome) => outcomes.push((key, outcome)),
                Err(error) => {
                    mirror_error!(SOURCE, "Mirror {:?} capture failed: {}", mirror.actor(), error);
                }
            }
        }
        outcomes
    }

    // ===== SCHEDULED TASKS =====

    /// Run a task handed back by the scheduler.
    ///
    /// Returns Ok(false) when the task's mirror no longer exists.
    pub fn run_task(&mut self, task: MirrorTask) -> Result<bool> {
        let key = task.mirror();
        let Some(mirror) = self.mirrors.get_mut(key) else {
            mirror_trace!(SOURCE, "Dropping {:?}: mirror is gone", task);
            return Ok(false);
        };
        match task {
            MirrorTask::Initialize(_) => mirror.initialize(&mut self.host)?,
            MirrorTask::CheckQuality(_) => {
                mirror.check_dynamic_quality(&mut self.host)?;
            }
        }
        Ok(true)
    }

    /// Run every task, logging failures instead of stopping.
    pub fn run_tasks(&mut self, tasks: impl IntoIterator<Item = MirrorTask>) {
        for task in tasks {
            if let Err(error) = self.run_task(task) {
                mirror_error!(SOURCE, "{:?} failed: {}", task, error);
            }
        }
    }

    // ===== HOST EVENTS =====

    /// Re-initialize every mirror with the new viewport size.
    pub fn on_viewport_resized(&mut self) {
        mirror_debug!(SOURCE, "Viewport resized, re-initializing {} mirror(s)", self.mirrors.len());
        self.initialize_all();
    }

    /// Re-bind every mirror to the new active viewer: trigger tracking is
    /// reset and render targets are recreated.
    pub fn on_active_viewer_changed(&mut self) {
        let viewer_actor = self.host.scene.active_viewer().and_then(|viewer| viewer.actor);
        mirror_debug!(SOURCE, "Active viewer changed to {:?}", viewer_actor);
        for mirror in self.mirrors.values_mut() {
            mirror.setup_triggers(&mut self.host, viewer_actor);
        }
        self.initialize_all();
        self.host.diagnostics.request_resource_collection();
    }

    pub fn on_trigger_begin_overlap(&mut self, trigger: ActorId, actor: ActorId) {
        for mirror in self.mirrors.values_mut() {
            mirror.on_trigger_begin_overlap(trigger, actor);
        }
    }

    pub fn on_trigger_end_overlap(&mut self, trigger: ActorId, actor: ActorId) {
        for mirror in self.mirrors.values_mut() {
            mirror.on_trigger_end_overlap(trigger, actor);
        }
    }

    fn initialize_all(&mut self) {
        for mirror in self.mirrors.values_mut() {
            if let Err(error) = mirror.initialize(&mut self.host) {
                mirror_error!(SOURCE, "Mirror {:?} re-initialization failed: {}", mirror.actor(), error);
            }
        }
    }
}

#[cfg(test)]
#[path = "mirror_system_tests.rs"]
mod tests;
