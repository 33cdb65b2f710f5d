//! Strip and photo-point planning over a survey area
//!
//! The pipeline rotates the area so the flight direction points north, lays
//! out vertical scan lines at the strip spacing, clips them to the area,
//! samples photo points along each surviving segment and rotates everything
//! back. Candidate scan lines are independent of each other, so they can be
//! processed in parallel; logical strip indices are assigned afterwards in
//! candidate order.

mod normalize;
mod options;
mod sampler;
mod strips;
mod summary;

pub use options::FlightOptions;
pub use summary::{CRUISE_SPEED_M_S, SummaryStats};

use normalize::NormalizedArea;
use sampler::PhotoSampler;
use strips::StripLayout;

use geo::Coord;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::camera::{CameraModel, Footprint};
use crate::coordinate::distance_m;
use crate::error::Result;
use crate::geometry::SurveyArea;

/// One photo capture position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoPoint {
    pub lat: f64,
    pub lng: f64,
    /// Logical strip that produced the point
    pub strip_index: usize,
    /// Position within the producing segment, restarting at 0 per segment
    pub point_index: usize,
}

/// One clipped strip segment in the original frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StripLine {
    /// `{strip_index}-{segment_index}`
    pub id: String,
    pub strip_index: usize,
    pub segment_index: usize,
    /// (lng, lat) vertices
    pub coordinates: Vec<[f64; 2]>,
}

/// Complete output of one planning call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyPlan {
    pub photo_points: Vec<PhotoPoint>,
    pub strip_lines: Vec<StripLine>,
    pub summary_stats: SummaryStats,
    pub footprint: Footprint,
    pub strip_spacing_m: f64,
    pub photo_spacing_m: f64,
}

/// Plan strips and photo points for `area`.
pub fn plan_survey(
    area: &SurveyArea,
    camera: &CameraModel,
    options: &FlightOptions,
) -> Result<SurveyPlan> {
    let planner = Planner::new(area, camera, options)?;
    let candidates = (0..planner.layout.candidates())
        .map(|i| planner.scan_candidate(i))
        .collect::<Result<Vec<_>>>()?;
    Ok(planner.merge(candidates))
}

/// Same result as [`plan_survey`], with candidate strips processed on the
/// rayon thread pool.
pub fn plan_survey_parallel(
    area: &SurveyArea,
    camera: &CameraModel,
    options: &FlightOptions,
) -> Result<SurveyPlan> {
    let planner = Planner::new(area, camera, options)?;
    let candidates = (0..planner.layout.candidates())
        .into_par_iter()
        .map(|i| planner.scan_candidate(i))
        .collect::<Result<Vec<_>>>()?;
    Ok(planner.merge(candidates))
}

/// A clipped segment before index assignment
#[derive(Debug, Clone)]
struct ScannedSegment {
    coordinates: [Coord<f64>; 2],
    length_m: f64,
    photos: Vec<Coord<f64>>,
}

struct Planner<'a> {
    area: &'a SurveyArea,
    footprint: Footprint,
    normalized: NormalizedArea,
    layout: StripLayout,
    photo_spacing_m: f64,
    min_segment_length_m: f64,
}

impl<'a> Planner<'a> {
    fn new(area: &'a SurveyArea, camera: &CameraModel, options: &FlightOptions) -> Result<Self> {
        let options = options.validate()?;
        let footprint = Footprint::compute(camera, options.height_m)?;
        let strip_spacing_m = footprint.strip_spacing(options.sidelap);
        let photo_spacing_m = footprint.photo_spacing(options.frontlap);

        let normalized = NormalizedArea::new(area, options.direction_deg)?;
        let layout = StripLayout::new(&normalized, strip_spacing_m, options.max_strips)?;

        debug!(
            width_m = footprint.width_m,
            height_m = footprint.height_m,
            strip_spacing_m,
            photo_spacing_m,
            candidates = layout.candidates(),
            direction_deg = options.direction_deg,
            "strip layout ready"
        );

        Ok(Self {
            area,
            footprint,
            normalized,
            layout,
            photo_spacing_m,
            min_segment_length_m: options.min_segment_length_m,
        })
    }

    fn scan_candidate(&self, index: usize) -> Result<Vec<ScannedSegment>> {
        let rotation = self.normalized.rotation();
        let sampler = PhotoSampler::new(
            self.area,
            rotation,
            self.photo_spacing_m,
            self.min_segment_length_m,
        );

        self.layout
            .scan(&self.normalized, index)
            .into_iter()
            .map(|(start, end)| {
                let length_m = distance_m(start, end);
                Ok(ScannedSegment {
                    coordinates: [rotation.restore(start), rotation.restore(end)],
                    length_m,
                    photos: sampler.sample(start, end, length_m)?,
                })
            })
            .collect()
    }

    /// Assign logical strip indices in candidate order, skipping candidates
    /// that produced no segment.
    fn merge(&self, candidates: Vec<Vec<ScannedSegment>>) -> SurveyPlan {
        let mut strip_lines = Vec::new();
        let mut photo_points = Vec::new();
        let mut total_length_m = 0.0;
        let mut strip_count = 0;

        for segments in candidates.into_iter().filter(|s| !s.is_empty()) {
            for (segment_index, segment) in segments.into_iter().enumerate() {
                total_length_m += segment.length_m;
                photo_points.extend(segment.photos.iter().enumerate().map(|(point_index, p)| {
                    PhotoPoint {
                        lat: p.y,
                        lng: p.x,
                        strip_index: strip_count,
                        point_index,
                    }
                }));
                strip_lines.push(StripLine {
                    id: format!("{strip_count}-{segment_index}"),
                    strip_index: strip_count,
                    segment_index,
                    coordinates: segment.coordinates.iter().map(|c| [c.x, c.y]).collect(),
                });
            }
            strip_count += 1;
        }

        let summary_stats = SummaryStats::compute(
            self.area.area_m2(),
            strip_count,
            photo_points.len(),
            total_length_m,
        );
        info!(
            strips = summary_stats.num_strips,
            photos = summary_stats.num_photos,
            length_km = summary_stats.total_length_km,
            "survey plan complete"
        );

        SurveyPlan {
            photo_points,
            strip_lines,
            summary_stats,
            footprint: self.footprint,
            strip_spacing_m: self.layout.spacing_m(),
            photo_spacing_m: self.photo_spacing_m,
        }
    }
}
