use geo::Coord;
use nalgebra::{Rotation2, Vector2};

/// Rotation of (lng, lat) coordinates about a fixed pivot.
///
/// Points are mapped into a local equirectangular frame (longitude offsets
/// scaled by the cosine of the pivot latitude) so that the rotation preserves
/// ground angles, rotated there, and mapped back. The same instance must be
/// used for the forward and inverse transform of one planning call.
#[derive(Debug, Clone, Copy)]
pub struct PivotRotation {
    pivot: Coord<f64>,
    lng_scale: f64,
    forward: Rotation2<f64>,
    inverse: Rotation2<f64>,
}

impl PivotRotation {
    /// Rotation taking flight bearing `bearing_deg` (clockwise from north)
    /// onto the canonical north axis.
    pub fn new(pivot: Coord<f64>, bearing_deg: f64) -> Self {
        // Counter-clockwise by the bearing == clockwise by its negative
        let forward = Rotation2::new(bearing_deg.to_radians());
        Self {
            pivot,
            lng_scale: pivot.y.to_radians().cos().abs().max(1e-12),
            forward,
            inverse: forward.inverse(),
        }
    }

    /// Original frame -> canonical (flight direction points north)
    pub fn normalize(&self, c: Coord<f64>) -> Coord<f64> {
        self.apply(&self.forward, c)
    }

    /// Canonical frame -> original
    pub fn restore(&self, c: Coord<f64>) -> Coord<f64> {
        self.apply(&self.inverse, c)
    }

    fn apply(&self, rotation: &Rotation2<f64>, c: Coord<f64>) -> Coord<f64> {
        let local = Vector2::new((c.x - self.pivot.x) * self.lng_scale, c.y - self.pivot.y);
        let rotated = rotation * local;
        Coord {
            x: self.pivot.x + rotated.x / self.lng_scale,
            y: self.pivot.y + rotated.y,
        }
    }
}
