use geo::{BoundingRect, Contains, Coord, LineString, MapCoords, Point, Polygon, Rect};

use crate::coordinate::PivotRotation;
use crate::error::{InputTypeError, Result};
use crate::geometry::SurveyArea;

/// Survey polygon rotated so the flight direction points north
#[derive(Debug, Clone)]
pub(crate) struct NormalizedArea {
    rotation: PivotRotation,
    polygon: Polygon<f64>,
    bounds: Rect<f64>,
}

impl NormalizedArea {
    /// Rotate `area` about its centroid by the negative of `direction_deg`
    pub fn new(area: &SurveyArea, direction_deg: f64) -> Result<Self> {
        let rotation = PivotRotation::new(area.centroid(), direction_deg);
        let polygon = area.polygon().map_coords(|c| rotation.normalize(c));
        let bounds = polygon.bounding_rect().ok_or(InputTypeError::Degenerate)?;
        Ok(Self {
            rotation,
            polygon,
            bounds,
        })
    }

    /// The rotation used for this area; reuse it for every inverse transform
    pub fn rotation(&self) -> &PivotRotation {
        &self.rotation
    }

    pub fn ring(&self) -> &LineString<f64> {
        self.polygon.exterior()
    }

    pub fn bounds(&self) -> Rect<f64> {
        self.bounds
    }

    pub fn contains(&self, c: Coord<f64>) -> bool {
        self.polygon.contains(&Point::from(c))
    }
}
