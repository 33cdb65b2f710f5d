//! Survey-area polygon and scan-line clipping

mod area;
mod clip;

pub use area::SurveyArea;
pub use clip::clip_vertical;
