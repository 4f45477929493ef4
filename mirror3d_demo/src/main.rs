//! Headless mirror demo
//!
//! Runs a `MirrorSystem` against the in-memory host: a viewer walks down
//! a corridor between two facing mirrors while the engine gates,
//! culls and rescales the captures. Engine log entries are forwarded to
//! the `log` facade and printed by `env_logger` (`RUST_LOG=debug` for more).
//!
//! Pass `--stereo` to run the mirrors with a simulated headset.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use glam::{DVec2, DVec3};
use mirror_3d_engine::mirror3d::culling::QueryHit;
use mirror_3d_engine::mirror3d::host::{ActorId, MirrorHost, MockHost, TimerQueue, TraceChannel, ViewerState};
use mirror_3d_engine::mirror3d::log::{LogEntry, LogSeverity, Logger};
use mirror_3d_engine::mirror3d::math::{BoundingSphere, Pose};
use mirror_3d_engine::mirror3d::reflection::MirrorSurface;
use mirror_3d_engine::mirror3d::{DynamicQualityConfig, Engine, MirrorConfig, MirrorSystem, TickOutcome};

const FRAME: Duration = Duration::from_millis(33);
const FRAMES: u32 = 240;
const PLAYER: ActorId = ActorId(1000);

/// Forwards engine log entries to the `log` facade.
struct LogBridge;

impl Logger for LogBridge {
    fn log(&self, entry: &LogEntry) {
        let level = match entry.severity {
            LogSeverity::Trace => log::Level::Trace,
            LogSeverity::Debug => log::Level::Debug,
            LogSeverity::Info => log::Level::Info,
            LogSeverity::Warn => log::Level::Warn,
            LogSeverity::Error => log::Level::Error,
        };
        match entry.location() {
            Some((file, line)) => {
                log::log!(target: "mirror3d", level, "[{}] {} ({}:{})", entry.source, entry.message, file, line)
            }
            _ => log::log!(target: "mirror3d", level, "[{}] {}", entry.source, entry.message),
        }
    }
}

fn mirror_surface(position: DVec3, forward: DVec3) -> MirrorSurface {
    let right = DVec3::Z.cross(forward);
    MirrorSurface::new(Pose::from_forward_right(position, forward, right), 120.0, 180.0, 5000.0)
}

fn build_host(stereo: bool) -> (MockHost, Rc<RefCell<TimerQueue>>, MirrorHost) {
    let mock = MockHost::new();
    {
        let mut state = mock.state_mut();
        state.viewport = Some(DVec2::new(1280.0, 720.0));
        if stereo {
            state.device_resolution = Some(DVec2::new(3664.0, 1920.0));
            state.device_fov_degrees = Some(104.3);
            state.device_ipd_cm = Some(6.3);
        }
        state.scene_hits = vec![
            QueryHit { actor: ActorId(1), sphere: BoundingSphere::new(DVec3::new(200.0, 50.0, 0.0), 40.0) },
            QueryHit { actor: ActorId(2), sphere: BoundingSphere::new(DVec3::new(900.0, -600.0, 0.0), 60.0) },
            QueryHit { actor: ActorId(3), sphere: BoundingSphere::new(DVec3::new(-400.0, 0.0, 0.0), 30.0) },
            QueryHit { actor: ActorId(1), sphere: BoundingSphere::new(DVec3::new(220.0, 60.0, 80.0), 10.0) },
        ];
    }
    let queue = Rc::new(RefCell::new(TimerQueue::new()));
    let host = MirrorHost::new(mock.clone(), mock.clone(), mock.clone(), mock.clone(), queue.clone());
    (mock, queue, host)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    Engine::set_logger(LogBridge);

    let stereo = std::env::args().any(|arg| arg == "--stereo");
    let (mock, queue, host) = build_host(stereo);
    let mut system = MirrorSystem::new(host);

    let base = if stereo { MirrorConfig::stereo() } else { MirrorConfig::default() };
    let hallway = MirrorConfig {
        culling_enabled: true,
        culling_trace_channel: Some(TraceChannel(1)),
        always_visible: vec![ActorId(99)],
        dynamic_quality: Some(DynamicQualityConfig {
            check_interval: Duration::from_millis(500),
            ..DynamicQualityConfig::default()
        }),
        ..base.clone()
    };

    let front = match system.create_mirror(ActorId(10), mirror_surface(DVec3::ZERO, DVec3::X), hallway) {
        Ok(key) => key,
        Err(error) => {
            log::error!("failed to create hallway mirror: {}", error);
            return;
        }
    };
    let back = match system.create_mirror(
        ActorId(11),
        mirror_surface(DVec3::new(4000.0, 0.0, 0.0), DVec3::NEG_X),
        base,
    ) {
        Ok(key) => key,
        Err(error) => {
            log::error!("failed to create back mirror: {}", error);
            return;
        }
    };

    let mut captured = 0usize;
    for frame in 0..FRAMES {
        // Walk from the front mirror toward the back one
        let x = 300.0 + 3400.0 * frame as f64 / FRAMES as f64;
        let position = DVec3::new(x, 40.0, 0.0);
        let target = if frame < FRAMES / 2 { DVec3::ZERO } else { DVec3::new(4000.0, 0.0, 0.0) };
        let viewer = ViewerState::new(Pose::looking_at(position, target, DVec3::Z), 90.0).with_actor(PLAYER);
        mock.set_viewer(Some(viewer));

        let tasks = queue.borrow_mut().advance(FRAME);
        system.run_tasks(tasks);

        for (key, outcome) in system.tick() {
            if let TickOutcome::Captured { .. } = outcome {
                captured += 1;
            }
            if frame % 30 == 0 {
                let name = if key == front { "front" } else { "back" };
                log::info!("frame {:3} x={:6.0} {}: {:?}", frame, x, name, outcome);
            }
        }
    }

    for (name, key) in [("front", front), ("back", back)] {
        if let Some(mirror) = system.mirror(key) {
            log::info!(
                "{} mirror: quality {:.1}, render target {:?}",
                name,
                mirror.quality().scale,
                mirror.binding().map(|binding| binding.size)
            );
        }
    }

    let state = mock.state();
    log::info!(
        "{} captures over {} frames, {} render targets created, {} released",
        captured,
        FRAMES,
        state.created_targets.len(),
        state.released_targets.len()
    );
    drop(state);

    system.destroy_all_mirrors();
    Engine::reset_logger();
}
