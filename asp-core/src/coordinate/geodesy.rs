use geo::{Coord, HaversineBearing, HaversineDestination, HaversineDistance, Point};

/// Great-circle distance in meters on the mean-radius sphere
pub fn distance_m(a: Coord<f64>, b: Coord<f64>) -> f64 {
    Point::from(a).haversine_distance(&Point::from(b))
}

/// Initial bearing from `a` to `b` in degrees
pub fn bearing_deg(a: Coord<f64>, b: Coord<f64>) -> f64 {
    Point::from(a).haversine_bearing(Point::from(b))
}

/// Point reached travelling `distance_m` from `origin` on `bearing_deg`
pub fn destination(origin: Coord<f64>, bearing_deg: f64, distance_m: f64) -> Coord<f64> {
    Point::from(origin)
        .haversine_destination(bearing_deg, distance_m)
        .into()
}

/// Point `offset_m` along the great circle from `start` towards `end`.
///
/// Offsets past the end continue on the same bearing.
pub fn along(start: Coord<f64>, end: Coord<f64>, offset_m: f64) -> Coord<f64> {
    if offset_m <= 0.0 {
        return start;
    }
    destination(start, bearing_deg(start, end), offset_m)
}

/// Planar midpoint in degrees; adequate for containment probes on short segments
pub fn midpoint(a: Coord<f64>, b: Coord<f64>) -> Coord<f64> {
    Coord {
        x: (a.x + b.x) * 0.5,
        y: (a.y + b.y) * 0.5,
    }
}
