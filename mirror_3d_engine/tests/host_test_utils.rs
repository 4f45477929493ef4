//! Shared fixtures for integration tests: a scripted `MockHost`, a shared
//! `TimerQueue` and a `MirrorSystem` wired to both.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use mirror_3d_engine::glam::{DVec2, DVec3};
use mirror_3d_engine::mirror3d::host::{ActorId, MirrorHost, MockHost, TimerQueue, ViewerState};
use mirror_3d_engine::mirror3d::math::Pose;
use mirror_3d_engine::mirror3d::MirrorSystem;

pub const PLAYER: ActorId = ActorId(500);

pub struct TestWorld {
    pub mock: MockHost,
    pub queue: Rc<RefCell<TimerQueue>>,
    pub system: MirrorSystem,
}

impl TestWorld {
    /// Mono-ready world: 1920x1080 viewport, viewer at (500, 0, 0)
    /// looking at the origin.
    pub fn new() -> Self {
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

    /// Stereo-ready world: adds a 4000x2000 head-mounted device.
    pub fn stereo() -> Self {
        let world = Self::new();
        world.mock.state_mut().device_resolution = Some(DVec2::new(4000.0, 2000.0));
        world
    }

    /// Advance the shared clock and run whatever fired.
    pub fn advance(&mut self, duration: Duration) -> usize {
        let tasks = self.queue.borrow_mut().advance(duration);
        let count = tasks.len();
        self.system.run_tasks(tasks);
        count
    }
}

pub fn viewer_at(position: DVec3) -> ViewerState {
    ViewerState::new(Pose::looking_at(position, DVec3::ZERO, DVec3::Z), 90.0).with_actor(PLAYER)
}
