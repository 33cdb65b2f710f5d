use geo::{
    BoundingRect, Centroid, ChamberlainDuquetteArea, Contains, Coord, Geometry, Intersects, Line,
    LineString, Point, Polygon, Rect,
};
use tracing::warn;

use crate::error::{AspError, InputTypeError, Result};

/// A validated survey polygon: one closed exterior ring of (lng, lat) vertices
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyArea {
    polygon: Polygon<f64>,
    centroid: Coord<f64>,
}

impl SurveyArea {
    /// Build from an explicit ring whose first vertex is repeated as the last
    pub fn from_ring(ring: &[[f64; 2]]) -> Result<Self> {
        if ring.is_empty() {
            return Err(InputTypeError::Missing.into());
        }
        if ring.len() < 4 {
            return Err(InputTypeError::TooFewVertices(ring.len()).into());
        }
        if ring.first() != ring.last() {
            return Err(InputTypeError::OpenRing.into());
        }

        let exterior: LineString<f64> = ring.iter().map(|&[x, y]| Coord { x, y }).collect();
        Self::from_polygon(Polygon::new(exterior, vec![]))
    }

    /// Validate a `geo` polygon. Interior rings are discarded.
    pub fn from_polygon(polygon: Polygon<f64>) -> Result<Self> {
        let (exterior, interiors) = polygon.into_inner();
        if !interiors.is_empty() {
            warn!(holes = interiors.len(), "survey area holes are not supported, ignoring");
        }

        let n = exterior.0.len();
        if n == 0 {
            return Err(InputTypeError::Missing.into());
        }
        if n < 4 {
            return Err(InputTypeError::TooFewVertices(n).into());
        }
        if !exterior.is_closed() {
            return Err(InputTypeError::OpenRing.into());
        }
        for c in exterior.coords() {
            if !(c.x.is_finite() && c.y.is_finite()) {
                return Err(InputTypeError::NonFiniteCoordinate.into());
            }
            if c.x.abs() > 180.0 || c.y.abs() >= 90.0 {
                return Err(InputTypeError::OutOfRange { lng: c.x, lat: c.y }.into());
            }
        }

        if self_intersects(&exterior) {
            return Err(InputTypeError::SelfIntersecting.into());
        }

        let polygon = Polygon::new(exterior, vec![]);
        if polygon.chamberlain_duquette_unsigned_area() <= 0.0 {
            return Err(InputTypeError::Degenerate.into());
        }
        let centroid = polygon
            .centroid()
            .ok_or(InputTypeError::Degenerate)?
            .into();

        Ok(Self { polygon, centroid })
    }

    pub fn polygon(&self) -> &Polygon<f64> {
        &self.polygon
    }

    pub fn exterior(&self) -> &LineString<f64> {
        self.polygon.exterior()
    }

    /// Area-weighted centroid, the rotation pivot for planning
    pub fn centroid(&self) -> Coord<f64> {
        self.centroid
    }

    /// Strict interior test; points on the boundary are outside
    pub fn contains(&self, c: Coord<f64>) -> bool {
        self.polygon.contains(&Point::from(c))
    }

    pub fn bounding_rect(&self) -> Option<Rect<f64>> {
        self.polygon.bounding_rect()
    }

    /// Spherical area in square meters
    pub fn area_m2(&self) -> f64 {
        self.polygon.chamberlain_duquette_unsigned_area()
    }
}

impl TryFrom<Geometry<f64>> for SurveyArea {
    type Error = AspError;

    fn try_from(geometry: Geometry<f64>) -> Result<Self> {
        match geometry {
            Geometry::Polygon(p) => Self::from_polygon(p),
            other => Err(InputTypeError::NotPolygon(geometry_kind(&other).to_string()).into()),
        }
    }
}

/// True when two non-adjacent edges of a closed ring touch or cross.
/// Repeated vertices are skipped so they do not count as contacts.
fn self_intersects(ring: &LineString<f64>) -> bool {
    let edges: Vec<Line<f64>> = ring.lines().filter(|e| e.start != e.end).collect();
    let n = edges.len();
    (0..n).any(|i| {
        (i + 2..n)
            .filter(|&j| !(i == 0 && j == n - 1))
            .any(|j| edges[i].intersects(&edges[j]))
    })
}

fn geometry_kind(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}
