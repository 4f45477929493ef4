use super::*;

const TRIGGER_A: ActorId = ActorId(100);
const TRIGGER_B: ActorId = ActorId(101);
const PLAYER: ActorId = ActorId(1);
const OTHER: ActorId = ActorId(2);

fn tracking_player() -> TriggerOccupancy {
    let mut occupancy = TriggerOccupancy::new(&[TRIGGER_A, TRIGGER_B]);
    occupancy.track(Some(PLAYER));
    occupancy
}

#[test]
fn test_no_triggers_not_required() {
    let occupancy = TriggerOccupancy::new(&[]);
    assert!(!occupancy.is_required());
    assert_eq!(occupancy.count(), 0);
}

#[test]
fn test_begin_and_end_for_tracked_actor() {
    let mut occupancy = tracking_player();
    assert!(occupancy.is_required());

    assert!(occupancy.on_begin_overlap(TRIGGER_A, PLAYER));
    assert!(occupancy.on_begin_overlap(TRIGGER_B, PLAYER));
    assert_eq!(occupancy.count(), 2);

    assert!(occupancy.on_end_overlap(TRIGGER_A, PLAYER));
    assert_eq!(occupancy.count(), 1);
}

#[test]
fn test_other_actors_ignored() {
    let mut occupancy = tracking_player();
    assert!(!occupancy.on_begin_overlap(TRIGGER_A, OTHER));
    assert!(!occupancy.on_end_overlap(TRIGGER_A, OTHER));
    assert_eq!(occupancy.count(), 0);
}

#[test]
fn test_foreign_trigger_ignored() {
    let mut occupancy = tracking_player();
    assert!(!occupancy.on_begin_overlap(ActorId(999), PLAYER));
    assert_eq!(occupancy.count(), 0);
}

#[test]
fn test_never_below_zero() {
    let mut occupancy = tracking_player();
    assert!(!occupancy.on_end_overlap(TRIGGER_A, PLAYER));
    assert!(!occupancy.on_end_overlap(TRIGGER_B, PLAYER));
    assert_eq!(occupancy.count(), 0);

    occupancy.on_begin_overlap(TRIGGER_A, PLAYER);
    assert_eq!(occupancy.count(), 1);
}

#[test]
fn test_untracked_counts_nothing() {
    let mut occupancy = TriggerOccupancy::new(&[TRIGGER_A]);
    assert!(!occupancy.on_begin_overlap(TRIGGER_A, PLAYER));
    occupancy.seed(TRIGGER_A, &[PLAYER]);
    assert_eq!(occupancy.count(), 0);
}

#[test]
fn test_seed_counts_actor_already_inside() {
    let mut occupancy = tracking_player();
    occupancy.seed(TRIGGER_A, &[OTHER, PLAYER]);
    occupancy.seed(TRIGGER_B, &[OTHER]);
    assert_eq!(occupancy.count(), 1);
}

#[test]
fn test_track_resets_count() {
    let mut occupancy = tracking_player();
    occupancy.on_begin_overlap(TRIGGER_A, PLAYER);
    occupancy.track(Some(OTHER));
    assert_eq!(occupancy.count(), 0);
    assert_eq!(occupancy.tracked(), Some(OTHER));
    assert!(occupancy.on_begin_overlap(TRIGGER_B, OTHER));
}
