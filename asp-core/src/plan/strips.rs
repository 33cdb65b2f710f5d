use geo::Coord;

use super::normalize::NormalizedArea;
use crate::coordinate::{destination, distance_m, midpoint};
use crate::error::{AspError, Result};
use crate::geometry::clip_vertical;

/// Half length of each scan line; far beyond any realistic survey
const SCAN_HALF_LENGTH_M: f64 = 50_000.0;

/// Clipped chords shorter than this are vertex grazes, not strips
const MIN_CHORD_M: f64 = 1e-3;

/// Candidate scan lines across a normalized area
#[derive(Debug, Clone, Copy)]
pub(crate) struct StripLayout {
    /// Longitude of the bounding box's west edge, where candidate 1 sits
    west_x: f64,
    /// Longitude step of one strip spacing at the box's mid latitude
    step_x: f64,
    spacing_m: f64,
    candidates: usize,
    y_min: f64,
    y_max: f64,
}

impl StripLayout {
    /// Lay out `ceil((span + spacing) / spacing)` candidates starting one
    /// spacing west of the bounding box.
    pub fn new(area: &NormalizedArea, spacing_m: f64, max_strips: usize) -> Result<Self> {
        let bounds = area.bounds();
        let mid_y = (bounds.min().y + bounds.max().y) * 0.5;
        let west = Coord { x: bounds.min().x, y: mid_y };
        let east = Coord { x: bounds.max().x, y: mid_y };
        let span_m = distance_m(west, east);

        let count = ((span_m + spacing_m) / spacing_m).ceil();
        if !count.is_finite() || count > max_strips as f64 {
            return Err(AspError::StripLimit {
                candidates: count,
                limit: max_strips,
            });
        }

        let step_x = destination(west, 90.0, spacing_m).x - west.x;
        let south = destination(west, 180.0, SCAN_HALF_LENGTH_M);
        let north = destination(west, 0.0, SCAN_HALF_LENGTH_M);

        Ok(Self {
            west_x: west.x,
            step_x,
            spacing_m,
            candidates: count as usize,
            y_min: south.y.min(bounds.min().y),
            y_max: north.y.max(bounds.max().y),
        })
    }

    pub fn candidates(&self) -> usize {
        self.candidates
    }

    pub fn spacing_m(&self) -> f64 {
        self.spacing_m
    }

    /// Longitude of candidate `index` in the normalized frame.
    ///
    /// Candidate 0 lies one spacing west of the box and candidate 1 lies
    /// exactly on its west edge.
    pub fn scan_x(&self, index: usize) -> f64 {
        self.west_x + (index as f64 - 1.0) * self.step_x
    }

    /// Clip candidate `index` against the area, keeping segments of non-zero
    /// length whose midpoint lies strictly inside. Segments run south to north.
    pub fn scan(&self, area: &NormalizedArea, index: usize) -> Vec<(Coord<f64>, Coord<f64>)> {
        clip_vertical(area.ring(), self.scan_x(index), self.y_min, self.y_max)
            .into_iter()
            .filter(|&(a, b)| distance_m(a, b) >= MIN_CHORD_M && area.contains(midpoint(a, b)))
            .collect()
    }
}
