use glam::DVec3;
use crate::host::{ActorId, TraceChannel};
use crate::math::{BoundingSphere, Pose};
use crate::reflection::{reflect, MirrorSurface};
use super::*;
use crate::culling::{FrustumParams, MirrorFrustum};

fn setup() -> (MirrorSurface, Pose, MirrorFrustum) {
    let mirror = MirrorSurface::new(Pose::IDENTITY, 100.0, 100.0, 5000.0);
    let viewer = Pose::looking_at(DVec3::new(500.0, 0.0, 0.0), DVec3::ZERO, DVec3::Z);
    let reflected = reflect(&mirror, &viewer);
    let frustum = MirrorFrustum::build(
        &mirror,
        &reflected,
        &FrustumParams {
            buffer_multiplier: 1.0,
            ipd_half: 0.0,
            far_distance: 1000.0,
            horizontal_fov_degrees: 90.0,
        },
    );
    (mirror, reflected, frustum)
}

fn hit(actor: u64, x: f64, y: f64, z: f64, radius: f64) -> QueryHit {
    QueryHit {
        actor: ActorId(actor),
        sphere: BoundingSphere::new(DVec3::new(x, y, z), radius),
    }
}

// ============================================================================
// TraceVolume
// ============================================================================

#[test]
fn test_trace_volume_spans_from_mirror_along_mirrored_forward() {
    let (mirror, reflected, frustum) = setup();
    let volume = TraceVolume::new(&mirror, &reflected, &frustum, 1000.0, TraceChannel(3));

    assert_eq!(volume.start, DVec3::ZERO);
    assert!(volume.end.abs_diff_eq(DVec3::new(1000.0, 0.0, 0.0), 1e-9));
    assert!(volume.half_extents.abs_diff_eq(DVec3::new(TRACE_BOX_HALF_DEPTH, 1500.0, 1500.0), 1e-6));
    assert_eq!(volume.orientation, reflected.rotation);
    assert_eq!(volume.channel, TraceChannel(3));
}

// ============================================================================
// MirrorCuller
// ============================================================================

#[test]
fn test_cull_keeps_visible_and_drops_culled() {
    let (_, _, frustum) = setup();
    let hits = [
        hit(1, 0.0, 0.0, 0.0, 10.0),
        hit(2, 0.0, 0.0, 5000.0, 1.0),
        hit(3, 400.0, 50.0, 0.0, 5.0),
    ];
    let show = MirrorCuller::new().cull(&frustum, &hits, &[]);
    assert_eq!(show.actors(), &[ActorId(1), ActorId(3)]);
}

#[test]
fn test_cull_actor_shown_when_any_component_visible() {
    let (_, _, frustum) = setup();
    let hits = [
        hit(7, 0.0, 0.0, 5000.0, 1.0), // culled component
        hit(7, 300.0, 0.0, 0.0, 1.0),  // visible component
        hit(7, 200.0, 0.0, 0.0, 1.0),  // skipped, already shown
    ];
    let show = MirrorCuller::new().cull(&frustum, &hits, &[]);
    assert_eq!(show.actors(), &[ActorId(7)]);
}

#[test]
fn test_cull_unions_always_visible_actors() {
    let (_, _, frustum) = setup();
    let hits = [hit(1, 0.0, 0.0, 0.0, 10.0), hit(2, 0.0, 0.0, 5000.0, 1.0)];
    let show = MirrorCuller::new().cull(&frustum, &hits, &[ActorId(99), ActorId(1)]);

    assert_eq!(show.len(), 2);
    assert!(show.contains(ActorId(1)));
    assert!(show.contains(ActorId(99)));
    assert!(!show.contains(ActorId(2)));
}

#[test]
fn test_cull_no_hits_yields_only_overrides() {
    let (_, _, frustum) = setup();
    let show = MirrorCuller::default().cull(&frustum, &[], &[]);
    assert!(show.is_empty());
}

#[test]
fn test_show_list_insert_deduplicates() {
    let mut show = ShowList::new();
    assert!(show.insert(ActorId(5)));
    assert!(!show.insert(ActorId(5)));
    assert_eq!(show.len(), 1);
}
