use glam::DVec3;

/// Bounding sphere of one scene component, supplied by the host's
/// collision/render system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: DVec3,
    /// Never negative
    pub radius: f64,
}

impl BoundingSphere {
    /// Negative radii are clamped to zero.
    pub fn new(center: DVec3, radius: f64) -> Self {
        Self { center, radius: radius.max(0.0) }
    }

    pub fn point(center: DVec3) -> Self {
        Self { center, radius: 0.0 }
    }
}

#[cfg(test)]
#[path = "bounds_tests.rs"]
mod tests;
