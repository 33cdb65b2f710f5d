pub mod camera;
pub mod coordinate;
pub mod error;
pub mod geometry;
pub mod plan;

pub use camera::{CameraModel, Footprint};
pub use error::{AspError, InputTypeError, MissingParameterError, Result};
pub use geometry::SurveyArea;
pub use plan::{
    FlightOptions, PhotoPoint, StripLine, SummaryStats, SurveyPlan, plan_survey,
    plan_survey_parallel,
};
