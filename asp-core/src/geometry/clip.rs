use geo::{Coord, LineString};

/// Clip the vertical line `x` between `y_min` and `y_max` against a closed ring.
///
/// Crossings use the half-open rule (an edge crosses when exactly one of its
/// endpoints lies at or left of `x`), so for a closed ring they always pair up.
/// Segments are returned as (bottom, top) pairs ordered by increasing `y` and
/// may be zero-length where the line grazes a vertex; callers filter those.
pub fn clip_vertical(
    ring: &LineString<f64>,
    x: f64,
    y_min: f64,
    y_max: f64,
) -> Vec<(Coord<f64>, Coord<f64>)> {
    let mut crossings: Vec<f64> = ring
        .lines()
        .filter_map(|edge| {
            let (a, b) = (edge.start, edge.end);
            if (a.x <= x) == (b.x <= x) {
                return None;
            }
            let t = (x - a.x) / (b.x - a.x);
            Some(a.y + t * (b.y - a.y))
        })
        .collect();
    crossings.sort_by(f64::total_cmp);

    crossings
        .chunks_exact(2)
        .filter_map(|pair| {
            let lo = pair[0].max(y_min);
            let hi = pair[1].min(y_max);
            (lo <= hi).then_some((Coord { x, y: lo }, Coord { x, y: hi }))
        })
        .collect()
}
