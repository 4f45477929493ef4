use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use slotmap::SlotMap;
use crate::host::{MirrorTask, Scheduler, TimerQueue};
use crate::registry::MirrorKey;

fn keys(count: usize) -> Vec<MirrorKey> {
    let mut map: SlotMap<MirrorKey, ()> = SlotMap::with_key();
    (0..count).map(|_| map.insert(())).collect()
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

// ============================================================================
// One-shot tasks
// ============================================================================

#[test]
fn test_once_fires_when_due() {
    let key = keys(1)[0];
    let mut queue = TimerQueue::new();
    queue.schedule_once(ms(200), MirrorTask::Initialize(key));

    assert!(queue.advance(ms(199)).is_empty());
    assert_eq!(queue.advance(ms(1)), vec![MirrorTask::Initialize(key)]);
    assert_eq!(queue.pending(), 0);
}

#[test]
fn test_once_fires_only_once() {
    let key = keys(1)[0];
    let mut queue = TimerQueue::new();
    queue.schedule_once(ms(10), MirrorTask::Initialize(key));

    assert_eq!(queue.advance(ms(50)).len(), 1);
    assert!(queue.advance(ms(50)).is_empty());
}

#[test]
fn test_zero_delay_fires_on_next_advance() {
    let key = keys(1)[0];
    let mut queue = TimerQueue::new();
    queue.schedule_once(Duration::ZERO, MirrorTask::Initialize(key));
    assert_eq!(queue.advance(Duration::ZERO), vec![MirrorTask::Initialize(key)]);
}

// ============================================================================
// Repeating tasks
// ============================================================================

#[test]
fn test_repeating_honours_initial_delay_then_interval() {
    let key = keys(1)[0];
    let mut queue = TimerQueue::new();
    queue.schedule_repeating(ms(1000), ms(500), MirrorTask::CheckQuality(key));

    assert!(queue.advance(ms(999)).is_empty());
    assert_eq!(queue.advance(ms(1)).len(), 1);
    assert!(queue.advance(ms(499)).is_empty());
    assert_eq!(queue.advance(ms(1)).len(), 1);
    assert_eq!(queue.pending(), 1);
}

#[test]
fn test_repeating_catches_up_on_large_step() {
    let key = keys(1)[0];
    let mut queue = TimerQueue::new();
    queue.schedule_repeating(ms(100), ms(100), MirrorTask::CheckQuality(key));
    assert_eq!(queue.advance(ms(350)).len(), 3);
}

#[test]
fn test_zero_interval_does_not_spin() {
    let key = keys(1)[0];
    let mut queue = TimerQueue::new();
    queue.schedule_repeating(Duration::ZERO, Duration::ZERO, MirrorTask::CheckQuality(key));
    assert_eq!(queue.advance(ms(3)).len(), 4);
}

// ============================================================================
// Ordering and cancellation
// ============================================================================

#[test]
fn test_tasks_fire_in_due_order() {
    let ids = keys(2);
    let mut queue = TimerQueue::new();
    queue.schedule_once(ms(300), MirrorTask::Initialize(ids[0]));
    queue.schedule_once(ms(100), MirrorTask::Initialize(ids[1]));
    queue.schedule_repeating(ms(200), ms(1000), MirrorTask::CheckQuality(ids[0]));

    assert_eq!(
        queue.advance(ms(400)),
        vec![
            MirrorTask::Initialize(ids[1]),
            MirrorTask::CheckQuality(ids[0]),
            MirrorTask::Initialize(ids[0]),
        ]
    );
}

#[test]
fn test_cancel_drops_only_that_mirror() {
    let ids = keys(2);
    let mut queue = TimerQueue::new();
    queue.schedule_once(ms(10), MirrorTask::Initialize(ids[0]));
    queue.schedule_repeating(ms(10), ms(10), MirrorTask::CheckQuality(ids[0]));
    queue.schedule_once(ms(10), MirrorTask::Initialize(ids[1]));

    queue.cancel(ids[0]);

    assert_eq!(queue.advance(ms(10)), vec![MirrorTask::Initialize(ids[1])]);
}

#[test]
fn test_task_reports_its_mirror() {
    let key = keys(1)[0];
    assert_eq!(MirrorTask::Initialize(key).mirror(), key);
    assert_eq!(MirrorTask::CheckQuality(key).mirror(), key);
}

#[test]
fn test_shared_handle_schedules_into_queue() {
    let key = keys(1)[0];
    let queue = Rc::new(RefCell::new(TimerQueue::new()));
    let mut handle: Box<dyn Scheduler> = Box::new(queue.clone());

    handle.schedule_once(ms(5), MirrorTask::Initialize(key));

    assert_eq!(queue.borrow().pending(), 1);
    assert_eq!(queue.borrow_mut().advance(ms(5)), vec![MirrorTask::Initialize(key)]);
}
