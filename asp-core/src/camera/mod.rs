//! Camera optics and ground footprint

mod footprint;

pub use footprint::Footprint;

use serde::{Deserialize, Serialize};

/// Sensor geometry and lens of a survey camera.
///
/// Every field is optional on input; footprint derivation fails if any of
/// them is absent or not strictly positive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraModel {
    /// Sensor width in pixels
    pub sensor_width_px: Option<u32>,
    /// Sensor height in pixels
    pub sensor_height_px: Option<u32>,
    /// Physical size of one pixel in micrometers
    pub pixel_pitch_um: Option<f64>,
    /// Focal length in millimeters
    pub focal_length_mm: Option<f64>,
}

/// (name, width px, height px, pitch um, focal mm)
const PRESETS: &[(&str, u32, u32, f64, f64)] = &[
    ("phantom4pro", 5472, 3648, 2.41, 8.8),
    ("mavic3e", 5280, 3956, 3.3, 12.29),
    ("rx1r2", 7952, 5304, 4.5, 35.0),
    ("a7r4-35", 9504, 6336, 3.76, 35.0),
];

impl CameraModel {
    /// Create a camera with all parameters present
    pub fn new(width_px: u32, height_px: u32, pixel_pitch_um: f64, focal_length_mm: f64) -> Self {
        Self {
            sensor_width_px: Some(width_px),
            sensor_height_px: Some(height_px),
            pixel_pitch_um: Some(pixel_pitch_um),
            focal_length_mm: Some(focal_length_mm),
        }
    }

    /// Look up a built-in camera by name (case-insensitive)
    pub fn preset(name: &str) -> Option<Self> {
        PRESETS
            .iter()
            .find(|(n, ..)| n.eq_ignore_ascii_case(name))
            .map(|&(_, w, h, pitch, focal)| Self::new(w, h, pitch, focal))
    }

    /// Names of the built-in cameras
    pub fn preset_names() -> impl Iterator<Item = &'static str> {
        PRESETS.iter().map(|(n, ..)| *n)
    }

    /// Physical sensor size (width, height) in millimeters, if known
    pub fn sensor_size_mm(&self) -> Option<(f64, f64)> {
        let pitch_mm = self.pixel_pitch_um? * 1e-3;
        Some((
            self.sensor_width_px? as f64 * pitch_mm,
            self.sensor_height_px? as f64 * pitch_mm,
        ))
    }
}
