use std::fs;
use std::path::Path;

use asp_core::{AspError, CameraModel, FlightOptions};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Camera and flight settings for a planning run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanConfig {
    /// Built-in camera to start from; explicit `camera` fields override it
    #[serde(default)]
    pub camera_preset: Option<String>,
    #[serde(default)]
    pub camera: CameraModel,
    pub flight: FlightOptions,
}

impl PlanConfig {
    /// Camera with preset values filled in where `camera` leaves a field unset
    pub fn resolved_camera(&self) -> Result<CameraModel> {
        let Some(name) = &self.camera_preset else {
            return Ok(self.camera.clone());
        };
        let preset = CameraModel::preset(name)
            .ok_or_else(|| AspError::InvalidOption(format!("unknown camera preset `{name}`")))?;
        Ok(CameraModel {
            sensor_width_px: self.camera.sensor_width_px.or(preset.sensor_width_px),
            sensor_height_px: self.camera.sensor_height_px.or(preset.sensor_height_px),
            pixel_pitch_um: self.camera.pixel_pitch_um.or(preset.pixel_pitch_um),
            focal_length_mm: self.camera.focal_length_mm.or(preset.focal_length_mm),
        })
    }
}

pub fn load_config(path: &Path) -> Result<PlanConfig> {
    let contents = fs::read_to_string(path)?;
    let config: PlanConfig = serde_json::from_str(&contents)?;
    Ok(config)
}
