use serde::{Deserialize, Serialize};

use crate::error::{AspError, Result};

/// Flight parameters for one planning call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightOptions {
    /// Height above ground in meters
    pub height_m: f64,
    /// Overlap between consecutive photos of a strip, in `[0, 1)`
    #[serde(default = "default_frontlap")]
    pub frontlap: f64,
    /// Overlap between adjacent strips, in `[0, 1)`
    #[serde(default = "default_sidelap")]
    pub sidelap: f64,
    /// Flight bearing in degrees clockwise from north
    #[serde(default)]
    pub direction_deg: f64,
    /// Segments shorter than this are kept as geometry but not sampled
    #[serde(default = "default_min_segment_length")]
    pub min_segment_length_m: f64,
    /// Upper bound on candidate scan lines
    #[serde(default = "default_max_strips")]
    pub max_strips: usize,
}

fn default_frontlap() -> f64 {
    0.7
}

fn default_sidelap() -> f64 {
    0.6
}

fn default_min_segment_length() -> f64 {
    1.0
}

fn default_max_strips() -> usize {
    10_000
}

impl FlightOptions {
    /// Options at `height_m` with every other field at its default
    pub fn new(height_m: f64) -> Self {
        Self {
            height_m,
            frontlap: default_frontlap(),
            sidelap: default_sidelap(),
            direction_deg: 0.0,
            min_segment_length_m: default_min_segment_length(),
            max_strips: default_max_strips(),
        }
    }

    pub fn with_overlaps(mut self, frontlap: f64, sidelap: f64) -> Self {
        self.frontlap = frontlap;
        self.sidelap = sidelap;
        self
    }

    pub fn with_direction(mut self, direction_deg: f64) -> Self {
        self.direction_deg = direction_deg;
        self
    }

    /// Check ranges and return a copy with the direction wrapped into `[0, 360)`.
    ///
    /// Height is checked by the footprint calculation.
    pub fn validate(&self) -> Result<Self> {
        let overlap_ok = |v: f64| v.is_finite() && (0.0..1.0).contains(&v);
        if !overlap_ok(self.frontlap) {
            return Err(AspError::InvalidOption(format!(
                "frontlap must be in [0, 1), got {}",
                self.frontlap
            )));
        }
        if !overlap_ok(self.sidelap) {
            return Err(AspError::InvalidOption(format!(
                "sidelap must be in [0, 1), got {}",
                self.sidelap
            )));
        }
        if !self.direction_deg.is_finite() {
            return Err(AspError::InvalidOption(format!(
                "direction must be finite, got {}",
                self.direction_deg
            )));
        }
        if !(self.min_segment_length_m.is_finite() && self.min_segment_length_m >= 0.0) {
            return Err(AspError::InvalidOption(format!(
                "min segment length must be non-negative, got {}",
                self.min_segment_length_m
            )));
        }
        if self.max_strips == 0 {
            return Err(AspError::InvalidOption("max strips must be positive".to_string()));
        }

        Ok(Self {
            direction_deg: self.direction_deg.rem_euclid(360.0),
            ..self.clone()
        })
    }
}
