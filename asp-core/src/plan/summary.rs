use serde::{Deserialize, Serialize};

/// Assumed cruise speed for time estimates
pub const CRUISE_SPEED_M_S: f64 = 10.0;

/// Aggregate statistics of a plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub area_ha: f64,
    pub num_strips: usize,
    pub num_photos: usize,
    /// Sum of strip segment lengths, rounded to 0.01 km
    pub total_length_km: f64,
    pub est_time_min: u64,
}

impl SummaryStats {
    pub fn compute(area_m2: f64, num_strips: usize, num_photos: usize, total_length_m: f64) -> Self {
        let total_length_km = (total_length_m / 1000.0 * 100.0).round() / 100.0;
        let km_per_min = CRUISE_SPEED_M_S * 60.0 / 1000.0;
        Self {
            area_ha: area_m2 / 10_000.0,
            num_strips,
            num_photos,
            total_length_km,
            est_time_min: (total_length_km / km_per_min).ceil() as u64,
        }
    }
}
