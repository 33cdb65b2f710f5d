//! Input loading and downstream collaborators for survey plans

pub mod area;
pub mod config;
pub mod error;
pub mod mission;

pub use area::{load_survey_area, parse_survey_area};
pub use config::{PlanConfig, load_config};
pub use error::{IoError, Result};
pub use mission::{ElevationSource, FlatTerrain, MissionContext, StripPath, Waypoint};
