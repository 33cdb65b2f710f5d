use thiserror::Error;

/// Common errors across the survey planning pipeline
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AspError {
    #[error("Input type error: {0}")]
    InputType(#[from] InputTypeError),

    #[error("Missing parameter: {0}")]
    MissingParameter(#[from] MissingParameterError),

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("Strip limit exceeded: {candidates} candidate strips (limit {limit})")]
    StripLimit { candidates: f64, limit: usize },
}

/// The survey area is absent or is not a usable polygon ring
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputTypeError {
    #[error("Survey area is missing")]
    Missing,

    #[error("Expected a polygon, found {0}")]
    NotPolygon(String),

    #[error("Ring has {0} vertices (need at least 4 including the closing vertex)")]
    TooFewVertices(usize),

    #[error("Ring is not closed (first and last vertex differ)")]
    OpenRing,

    #[error("Ring contains a non-finite coordinate")]
    NonFiniteCoordinate,

    #[error("Coordinate out of range: lng {lng}, lat {lat}")]
    OutOfRange { lng: f64, lat: f64 },

    #[error("Ring intersects itself")]
    SelfIntersecting,

    #[error("Polygon is degenerate (zero area)")]
    Degenerate,
}

/// Camera or flight parameters that resolve to no usable footprint
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MissingParameterError {
    #[error("Camera parameter `{0}` is missing or not positive")]
    Camera(&'static str),

    #[error("Flight height must be positive, got {0}")]
    Height(f64),

    #[error("Footprint resolves to zero")]
    ZeroFootprint,
}

pub type Result<T> = std::result::Result<T, AspError>;
