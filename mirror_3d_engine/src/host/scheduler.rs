/// Scheduler seam for the two low-frequency mirror callbacks: deferred
/// initialization and the periodic quality check.
///
/// Tasks are plain values carrying the mirror key. The host hands fired
/// tasks back to `MirrorSystem::run_task`, which checks the mirror is
/// still alive before acting.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use crate::registry::MirrorKey;

/// Shortest interval a repeating task may use
const MIN_REPEAT_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MirrorTask {
    /// Resolve resolution, FOV and IPD, create render targets
    Initialize(MirrorKey),
    /// Re-evaluate distance-driven capture quality
    CheckQuality(MirrorKey),
}

impl MirrorTask {
    pub fn mirror(&self) -> MirrorKey {
        match self {
            MirrorTask::Initialize(key) | MirrorTask::CheckQuality(key) => *key,
        }
    }
}

pub trait Scheduler {
    fn schedule_once(&mut self, delay: Duration, task: MirrorTask);

    fn schedule_repeating(&mut self, initial_delay: Duration, interval: Duration, task: MirrorTask);

    /// Drop pending tasks for a mirror. Best effort: hosts that cannot
    /// cancel may ignore this, fired tasks for dead mirrors are no-ops.
    fn cancel(&mut self, _mirror: MirrorKey) {}
}

#[derive(Debug, Clone)]
struct Timer {
    due: Duration,
    interval: Option<Duration>,
    sequence: u64,
    task: MirrorTask,
}

/// Deterministic in-process scheduler driven by explicit time steps.
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    timers: Vec<Timer>,
    next_sequence: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Advance the clock and return every task that came due, in firing
    /// order. A repeating task fires once per elapsed interval.
    pub fn advance(&mut self, delta: Duration) -> Vec<MirrorTask> {
        self.now += delta;
        let now = self.now;
        let mut fired: Vec<(Duration, u64, MirrorTask)> = Vec::new();

        self.timers.retain_mut(|timer| {
            while timer.due <= now {
                fired.push((timer.due, timer.sequence, timer.task));
                match timer.interval {
                    Some(interval) => timer.due += interval,
                    None => return false,
                }
            }
            true
        });

        fired.sort_by_key(|(due, sequence, _)| (*due, *sequence));
        fired.into_iter().map(|(_, _, task)| task).collect()
    }

    fn push(&mut self, delay: Duration, interval: Option<Duration>, task: MirrorTask) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.timers.push(Timer {
            due: self.now + delay,
            interval,
            sequence,
            task,
        });
    }
}

impl Scheduler for TimerQueue {
    fn schedule_once(&mut self, delay: Duration, task: MirrorTask) {
        self.push(delay, None, task);
    }

    fn schedule_repeating(&mut self, initial_delay: Duration, interval: Duration, task: MirrorTask) {
        self.push(initial_delay, Some(interval.max(MIN_REPEAT_INTERVAL)), task);
    }

    fn cancel(&mut self, mirror: MirrorKey) {
        self.timers.retain(|timer| timer.task.mirror() != mirror);
    }
}

/// Shared handle so the host can keep advancing a queue the system owns.
impl Scheduler for Rc<RefCell<TimerQueue>> {
    fn schedule_once(&mut self, delay: Duration, task: MirrorTask) {
        self.borrow_mut().schedule_once(delay, task);
    }

    fn schedule_repeating(&mut self, initial_delay: Duration, interval: Duration, task: MirrorTask) {
        self.borrow_mut().schedule_repeating(initial_delay, interval, task);
    }

    fn cancel(&mut self, mirror: MirrorKey) {
        self.borrow_mut().cancel(mirror);
    }
}
