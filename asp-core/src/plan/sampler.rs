use geo::Coord;

use crate::coordinate::{PivotRotation, along};
use crate::error::{AspError, Result};
use crate::geometry::SurveyArea;

/// Upper bound on samples drawn from one segment
const MAX_SEGMENT_SAMPLES: f64 = 1_000_000.0;

/// Places photo capture points along normalized-frame segments
#[derive(Debug, Clone, Copy)]
pub(crate) struct PhotoSampler<'a> {
    area: &'a SurveyArea,
    rotation: &'a PivotRotation,
    spacing_m: f64,
    min_segment_length_m: f64,
}

impl<'a> PhotoSampler<'a> {
    pub fn new(
        area: &'a SurveyArea,
        rotation: &'a PivotRotation,
        spacing_m: f64,
        min_segment_length_m: f64,
    ) -> Self {
        Self {
            area,
            rotation,
            spacing_m,
            min_segment_length_m,
        }
    }

    /// Sample at `0, spacing, .., floor(length / spacing) * spacing` from
    /// `start`, restore each point to the original frame and keep those
    /// strictly inside the original polygon.
    pub fn sample(
        &self,
        start: Coord<f64>,
        end: Coord<f64>,
        length_m: f64,
    ) -> Result<Vec<Coord<f64>>> {
        if length_m < self.min_segment_length_m {
            return Ok(Vec::new());
        }

        let steps = (length_m / self.spacing_m).floor();
        if !steps.is_finite() || steps > MAX_SEGMENT_SAMPLES {
            return Err(AspError::InvalidOption(format!(
                "photo spacing {:.3} m yields {} samples on a {:.1} m segment",
                self.spacing_m, steps, length_m
            )));
        }

        let points = (0..=steps as usize)
            .map(|k| along(start, end, k as f64 * self.spacing_m))
            .map(|p| self.rotation.restore(p))
            .filter(|&p| self.area.contains(p))
            .collect();
        Ok(points)
    }
}
