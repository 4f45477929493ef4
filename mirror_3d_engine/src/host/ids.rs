/// Opaque identifiers owned by the host scene.

/// Host-side object identifier (actor, trigger zone, mirror mesh owner).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(pub u64);

/// Host collision channel used by the culling trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceChannel(pub u8);
