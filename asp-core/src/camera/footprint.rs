use super::CameraModel;
use crate::error::{MissingParameterError, Result};
use serde::{Deserialize, Serialize};

/// Ground area covered by one photo, in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    /// Across-track extent (sensor width axis)
    pub width_m: f64,
    /// Along-track extent (sensor height axis)
    pub height_m: f64,
}

impl Footprint {
    /// Project the sensor onto flat ground from `height_m`.
    ///
    /// Each axis is `height * pixels * pitch / focal`.
    pub fn compute(camera: &CameraModel, height_m: f64) -> Result<Self> {
        if !(height_m.is_finite() && height_m > 0.0) {
            return Err(MissingParameterError::Height(height_m).into());
        }

        let width_px = positive_px(camera.sensor_width_px, "sensor_width_px")?;
        let height_px = positive_px(camera.sensor_height_px, "sensor_height_px")?;
        let pitch_um = positive(camera.pixel_pitch_um, "pixel_pitch_um")?;
        let focal_mm = positive(camera.focal_length_mm, "focal_length_mm")?;

        // um -> mm so both sensor size and focal length share units
        let pitch_mm = pitch_um * 1e-3;
        let footprint = Self {
            width_m: height_m * width_px * pitch_mm / focal_mm,
            height_m: height_m * height_px * pitch_mm / focal_mm,
        };

        if !(footprint.width_m > 0.0 && footprint.height_m > 0.0)
            || !footprint.width_m.is_finite()
            || !footprint.height_m.is_finite()
        {
            return Err(MissingParameterError::ZeroFootprint.into());
        }

        Ok(footprint)
    }

    /// Distance between adjacent strips for the given sidelap
    pub fn strip_spacing(&self, sidelap: f64) -> f64 {
        self.width_m * (1.0 - sidelap)
    }

    /// Distance between consecutive photos in a strip for the given frontlap
    pub fn photo_spacing(&self, frontlap: f64) -> f64 {
        self.height_m * (1.0 - frontlap)
    }
}

fn positive_px(value: Option<u32>, name: &'static str) -> Result<f64> {
    match value {
        Some(v) if v > 0 => Ok(v as f64),
        _ => Err(MissingParameterError::Camera(name).into()),
    }
}

fn positive(value: Option<f64>, name: &'static str) -> Result<f64> {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(MissingParameterError::Camera(name).into()),
    }
}
