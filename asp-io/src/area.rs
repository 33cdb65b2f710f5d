use std::fs;
use std::path::Path;

use asp_core::{InputTypeError, SurveyArea};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::Result;

/// Load a survey area from a GeoJSON file
pub fn load_survey_area(path: &Path) -> Result<SurveyArea> {
    let contents = fs::read_to_string(path)?;
    let area = parse_survey_area(&contents)?;
    debug!(path = %path.display(), vertices = area.exterior().0.len(), "loaded survey area");
    Ok(area)
}

/// Parse a GeoJSON `Polygon`, a `Feature` holding one, or a
/// `FeatureCollection` whose first feature holds one.
pub fn parse_survey_area(geojson: &str) -> Result<SurveyArea> {
    let value: Value = serde_json::from_str(geojson)?;
    let geometry = geometry_of(&value)?;

    match type_of(geometry) {
        "Polygon" => {}
        other => return Err(InputTypeError::NotPolygon(other.to_string()).into()),
    }

    let rings: Vec<Vec<Vec<f64>>> = serde_json::from_value(geometry["coordinates"].clone())?;
    let mut rings = rings.into_iter();
    let exterior = rings.next().ok_or(InputTypeError::Missing)?;
    let holes = rings.count();
    if holes > 0 {
        warn!(holes, "survey area holes are not supported, ignoring");
    }

    let ring = exterior
        .iter()
        .map(|position| match position.as_slice() {
            [lng, lat, ..] => Ok([*lng, *lat]),
            _ => Err(InputTypeError::NotPolygon("Polygon with malformed position".to_string())),
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(SurveyArea::from_ring(&ring)?)
}

fn geometry_of(value: &Value) -> Result<&Value> {
    let geometry = match type_of(value) {
        "FeatureCollection" => value["features"]
            .as_array()
            .and_then(|features| features.first())
            .map(|feature| &feature["geometry"])
            .ok_or(InputTypeError::Missing)?,
        "Feature" => &value["geometry"],
        _ => value,
    };
    if geometry.is_null() {
        return Err(InputTypeError::Missing.into());
    }
    Ok(geometry)
}

fn type_of(value: &Value) -> &str {
    value["type"].as_str().unwrap_or("unknown")
}
