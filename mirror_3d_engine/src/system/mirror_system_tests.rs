//! Tests for MirrorSystem
//!
//! A shared `MockHost` scripts the scene and records backend calls; a
//! shared `TimerQueue` drives the scheduled tasks.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use glam::{DVec2, DVec3};
use crate::config::DynamicQualityConfig;
use crate::host::{MockHost, TimerQueue, ViewerState};
use crate::math::Pose;
use crate::mirror::TickOutcome;
use crate::capture::SkipReasons;
use super::*;

const PLAYER: ActorId = ActorId(50);

// ============================================================================
// TEST HELPERS
// ============================================================================

struct Fixture {
    mock: MockHost,
    queue: Rc<RefCell<TimerQueue>>,
    system: MirrorSystem,
}

impl Fixture {
    fn new() -> Self {
        let mock = MockHost::new();
        {
            let mut state = mock.state_mut();
            state.viewport = Some(DVec2::new(1920.0, 1080.0));
            state.viewer = Some(viewer_at(DVec3::new(500.0, 0.0, 0.0)));
        }
        let queue = Rc::new(RefCell::new(TimerQueue::new()));
        let host = MirrorHost::new(mock.clone(), mock.clone(), mock.clone(), mock.clone(), queue.clone());
        Self { mock, queue, system: MirrorSystem::new(host) }
    }

    fn create(&mut self, actor: u64) -> MirrorKey {
        self.create_with(actor, MirrorConfig::default())
    }

    fn create_with(&mut self, actor: u64, config: MirrorConfig) -> MirrorKey {
        let surface = MirrorSurface::new(Pose::IDENTITY, 100.0, 100.0, 5000.0);
        self.system.create_mirror(ActorId(actor), surface, config).unwrap()
    }

    /// Advance the shared clock and run what fired
    fn advance(&mut self, millis: u64) -> usize {
        let tasks = self.queue.borrow_mut().advance(Duration::from_millis(millis));
        let count = tasks.len();
        self.system.run_tasks(tasks);
        count
    }
}

fn viewer_at(position: DVec3) -> ViewerState {
    ViewerState::new(Pose::looking_at(position, DVec3::ZERO, DVec3::Z), 90.0).with_actor(PLAYER)
}

// ============================================================================
// LIFECYCLE
// ============================================================================

#[test]
fn test_create_registers_and_schedules_init() {
    let mut fixture = Fixture::new();
    let key = fixture.create(1);

    assert_eq!(fixture.system.mirror_count(), 1);
    assert!(fixture.system.registry().contains(key));
    assert_eq!(fixture.queue.borrow().pending(), 1);
    assert!(!fixture.system.mirror(key).unwrap().is_initialized());
}

#[test]
fn test_create_invalid_config_registers_nothing() {
    let mut fixture = Fixture::new();
    let surface = MirrorSurface::new(Pose::IDENTITY, 100.0, 100.0, 5000.0);
    let config = MirrorConfig { capture_quality: 0.0, ..MirrorConfig::default() };

    assert!(fixture.system.create_mirror(ActorId(1), surface, config).is_err());
    assert_eq!(fixture.system.mirror_count(), 0);
    assert!(fixture.system.registry().is_empty());
    assert_eq!(fixture.queue.borrow().pending(), 0);
}

#[test]
fn test_deferred_init_after_delay() {
    let mut fixture = Fixture::new();
    let key = fixture.create(1);

    assert_eq!(fixture.advance(199), 0);
    assert!(!fixture.system.mirror(key).unwrap().is_initialized());
    assert_eq!(fixture.advance(1), 1);
    assert!(fixture.system.mirror(key).unwrap().is_initialized());
}

#[test]
fn test_dynamic_quality_schedules_repeating_check() {
    let mut fixture = Fixture::new();
    let config = MirrorConfig {
        dynamic_quality: Some(DynamicQualityConfig::default()),
        ..MirrorConfig::default()
    };
    let key = fixture.create_with(1, config);
    assert_eq!(fixture.queue.borrow().pending(), 2);

    fixture.advance(200);
    fixture.mock.set_viewer(Some(viewer_at(DVec3::new(3000.0, 0.0, 0.0))));
    assert_eq!(fixture.advance(800), 1);

    assert_eq!(fixture.system.mirror(key).unwrap().quality().scale, 0.5);
    assert_eq!(fixture.mock.state().collections, 1);
}

#[test]
fn test_destroy_releases_and_unregisters() {
    let mut fixture = Fixture::new();
    let key = fixture.create(1);
    fixture.advance(200);

    assert!(fixture.system.destroy_mirror(key));

    assert_eq!(fixture.system.mirror_count(), 0);
    assert!(!fixture.system.registry().contains(key));
    assert_eq!(fixture.mock.state().live_targets(), 0);
    assert!(!fixture.system.destroy_mirror(key));
}

#[test]
fn test_destroy_all_mirrors() {
    let mut fixture = Fixture::new();
    fixture.create(1);
    fixture.create(2);
    fixture.create(3);

    fixture.system.destroy_all_mirrors();

    assert_eq!(fixture.system.mirror_count(), 0);
    assert!(fixture.system.registry().is_empty());
    assert_eq!(fixture.queue.borrow().pending(), 0);
}

// ============================================================================
// TASK LIVENESS
// ============================================================================

#[test]
fn test_task_for_destroyed_mirror_is_noop() {
    let mut fixture = Fixture::new();
    let key = fixture.create(1);
    fixture.system.destroy_mirror(key);

    assert!(!fixture.system.run_task(MirrorTask::Initialize(key)).unwrap());
    assert!(!fixture.system.run_task(MirrorTask::CheckQuality(key)).unwrap());
    assert!(fixture.mock.state().created_targets.is_empty());
}

#[test]
fn test_stale_key_does_not_reach_new_mirror() {
    let mut fixture = Fixture::new();
    let old = fixture.create(1);
    fixture.system.destroy_mirror(old);
    let new = fixture.create(2);

    assert_ne!(old, new);
    assert!(!fixture.system.run_task(MirrorTask::Initialize(old)).unwrap());
    assert!(!fixture.system.mirror(new).unwrap().is_initialized());
}

#[test]
fn test_failed_task_reports_error() {
    let mut fixture = Fixture::new();
    fixture.mock.state_mut().viewport = None;
    let key = fixture.create(1);

    assert!(fixture.system.run_task(MirrorTask::Initialize(key)).is_err());
}

// ============================================================================
// MUTUAL EXCLUSION
// ============================================================================

#[test]
fn test_hidden_actors_follow_registry() {
    let mut fixture = Fixture::new();
    let a = fixture.create(1);
    let b = fixture.create(2);

    assert_eq!(fixture.system.hidden_actors(a), vec![ActorId(2)]);
    assert_eq!(fixture.system.hidden_actors(b), vec![ActorId(1)]);

    fixture.system.destroy_mirror(a);
    assert!(fixture.system.hidden_actors(b).is_empty());
}

#[test]
fn test_tick_passes_other_mirrors_as_hidden() {
    let mut fixture = Fixture::new();
    fixture.create(1);
    fixture.create(2);
    fixture.advance(200);

    let outcomes = fixture.system.tick();

    assert_eq!(outcomes.len(), 2);
    let state = fixture.mock.state();
    assert_eq!(state.captures_of(ActorId(1))[0].hidden, vec![ActorId(2)]);
    assert_eq!(state.captures_of(ActorId(2))[0].hidden, vec![ActorId(1)]);
}

// ============================================================================
// HOST EVENTS
// ============================================================================

#[test]
fn test_viewport_resize_reinitializes() {
    let mut fixture = Fixture::new();
    let key = fixture.create(1);
    fixture.advance(200);
    fixture.mock.state_mut().viewport = Some(DVec2::new(1280.0, 720.0));

    fixture.system.on_viewport_resized();

    let binding = fixture.system.mirror(key).unwrap().binding().unwrap();
    assert_eq!(binding.size.width, 1280);
    assert_eq!(fixture.mock.state().live_targets(), 1);
}

#[test]
fn test_viewer_change_retracks_triggers() {
    let mut fixture = Fixture::new();
    let trigger = ActorId(70);
    let other_player = ActorId(51);
    let config = MirrorConfig { capture_triggers: vec![trigger], ..MirrorConfig::default() };
    let key = fixture.create_with(1, config);
    fixture.advance(200);

    fixture.system.on_trigger_begin_overlap(trigger, PLAYER);
    assert!(matches!(fixture.system.tick()[0].1, TickOutcome::Captured { .. }));

    fixture.mock.set_viewer(Some(viewer_at(DVec3::new(500.0, 0.0, 0.0)).with_actor(other_player)));
    fixture.system.on_active_viewer_changed();

    let mirror = fixture.system.mirror(key).unwrap();
    assert_eq!(mirror.occupancy().tracked(), Some(other_player));
    assert_eq!(mirror.occupancy().count(), 0);
    assert_eq!(fixture.system.tick()[0].1, TickOutcome::Skipped(SkipReasons::TRIGGERS_EMPTY));
    assert_eq!(fixture.mock.state().collections, 1);
}

#[test]
fn test_trigger_events_for_other_actor_ignored() {
    let mut fixture = Fixture::new();
    let trigger = ActorId(70);
    let config = MirrorConfig { capture_triggers: vec![trigger], ..MirrorConfig::default() };
    let key = fixture.create_with(1, config);

    fixture.system.on_trigger_begin_overlap(trigger, ActorId(99));
    assert_eq!(fixture.system.mirror(key).unwrap().occupancy().count(), 0);

    fixture.system.on_trigger_end_overlap(trigger, PLAYER);
    assert_eq!(fixture.system.mirror(key).unwrap().occupancy().count(), 0);
}
