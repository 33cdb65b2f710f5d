//! Plan handoff to elevation lookup and downstream consumers
//!
//! A [`MissionContext`] owns one plan together with the ground elevation of
//! every photo point and strip vertex. Elevation lookups are batched; a batch
//! that fails falls back to zero elevation for its points.

use asp_core::SurveyPlan;
use geo::Coord;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{IoError, Result};

/// Terrain elevation provider
pub trait ElevationSource {
    /// Ground elevation in meters for each coordinate, in input order
    fn elevations(&self, coords: &[Coord<f64>]) -> Result<Vec<f64>>;
}

/// Constant ground elevation everywhere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatTerrain(pub f64);

impl ElevationSource for FlatTerrain {
    fn elevations(&self, coords: &[Coord<f64>]) -> Result<Vec<f64>> {
        Ok(vec![self.0; coords.len()])
    }
}

/// Photo point annotated with altitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Waypoint {
    pub lat: f64,
    pub lng: f64,
    pub strip_index: usize,
    pub point_index: usize,
    pub ground_elevation_m: f64,
    /// Ground elevation plus flight height
    pub absolute_altitude_m: f64,
}

/// Strip segment with (lng, lat, absolute altitude) vertices
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StripPath {
    pub id: String,
    pub strip_index: usize,
    pub vertices: Vec<[f64; 3]>,
}

#[derive(Debug, Clone)]
pub struct MissionContext {
    plan: SurveyPlan,
    flight_height_m: f64,
    photo_elevations: Vec<f64>,
    /// Strip vertices in `strip_lines` order, flattened
    vertex_elevations: Vec<f64>,
}

impl MissionContext {
    /// Wrap a plan with every elevation at zero
    pub fn new(plan: SurveyPlan, flight_height_m: f64) -> Self {
        let vertices = plan.strip_lines.iter().map(|l| l.coordinates.len()).sum();
        Self {
            photo_elevations: vec![0.0; plan.photo_points.len()],
            vertex_elevations: vec![0.0; vertices],
            plan,
            flight_height_m,
        }
    }

    pub fn plan(&self) -> &SurveyPlan {
        &self.plan
    }

    pub fn flight_height_m(&self) -> f64 {
        self.flight_height_m
    }

    /// Look up elevations for photo points, then strip vertices, in batches
    /// of `batch_size`. Returns the number of batches that fell back to zero.
    pub fn resolve_elevations<S>(&mut self, source: &S, batch_size: usize) -> usize
    where
        S: ElevationSource + ?Sized,
    {
        let photos: Vec<Coord<f64>> = self
            .plan
            .photo_points
            .iter()
            .map(|p| Coord { x: p.lng, y: p.lat })
            .collect();
        let vertices: Vec<Coord<f64>> = self
            .plan
            .strip_lines
            .iter()
            .flat_map(|l| l.coordinates.iter().map(|&[x, y]| Coord { x, y }))
            .collect();

        let (photo_elevations, photo_failures) = lookup_batched(source, &photos, batch_size);
        let (vertex_elevations, vertex_failures) = lookup_batched(source, &vertices, batch_size);
        self.photo_elevations = photo_elevations;
        self.vertex_elevations = vertex_elevations;

        debug!(
            photos = photos.len(),
            vertices = vertices.len(),
            failed_batches = photo_failures + vertex_failures,
            "elevations resolved"
        );
        photo_failures + vertex_failures
    }

    pub fn waypoints(&self) -> Vec<Waypoint> {
        self.plan
            .photo_points
            .iter()
            .zip(&self.photo_elevations)
            .map(|(p, &ground)| Waypoint {
                lat: p.lat,
                lng: p.lng,
                strip_index: p.strip_index,
                point_index: p.point_index,
                ground_elevation_m: ground,
                absolute_altitude_m: ground + self.flight_height_m,
            })
            .collect()
    }

    pub fn strip_paths(&self) -> Vec<StripPath> {
        let mut elevations = self.vertex_elevations.iter();
        self.plan
            .strip_lines
            .iter()
            .map(|line| StripPath {
                id: line.id.clone(),
                strip_index: line.strip_index,
                vertices: line
                    .coordinates
                    .iter()
                    .map(|&[lng, lat]| {
                        let ground = elevations.next().copied().unwrap_or(0.0);
                        [lng, lat, ground + self.flight_height_m]
                    })
                    .collect(),
            })
            .collect()
    }
}

fn lookup_batched<S>(source: &S, coords: &[Coord<f64>], batch_size: usize) -> (Vec<f64>, usize)
where
    S: ElevationSource + ?Sized,
{
    let mut elevations = Vec::with_capacity(coords.len());
    let mut failures = 0;

    for batch in coords.chunks(batch_size.max(1)) {
        let result = source.elevations(batch).and_then(|values| {
            if values.len() == batch.len() {
                Ok(values)
            } else {
                Err(IoError::Elevation(format!(
                    "expected {} values, got {}",
                    batch.len(),
                    values.len()
                )))
            }
        });
        match result {
            Ok(values) => elevations.extend(values),
            Err(err) => {
                warn!(error = %err, points = batch.len(), "elevation batch failed, using 0 m");
                elevations.extend(std::iter::repeat_n(0.0, batch.len()));
                failures += 1;
            }
        }
    }

    (elevations, failures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use asp_core::{CameraModel, FlightOptions, SurveyArea, plan_survey};
    use std::cell::Cell;

    fn plan() -> SurveyPlan {
        let area = SurveyArea::from_ring(&[
            [11.0, 48.0],
            [11.004, 48.0],
            [11.004, 48.003],
            [11.0, 48.003],
            [11.0, 48.0],
        ])
        .unwrap();
        plan_survey(
            &area,
            &CameraModel::new(4000, 3000, 4.4, 25.0),
            &FlightOptions::new(100.0),
        )
        .unwrap()
    }

    /// Elevation = latitude, failing every `fail_every`-th call
    struct FlakyTerrain {
        calls: Cell<usize>,
        fail_every: usize,
    }

    impl ElevationSource for FlakyTerrain {
        fn elevations(&self, coords: &[Coord<f64>]) -> Result<Vec<f64>> {
            let n = self.calls.get() + 1;
            self.calls.set(n);
            if n % self.fail_every == 0 {
                return Err(IoError::Elevation("service unavailable".to_string()));
            }
            Ok(coords.iter().map(|c| c.y).collect())
        }
    }

    #[test]
    fn test_defaults_to_zero_elevation() {
        let ctx = MissionContext::new(plan(), 100.0);
        let waypoints = ctx.waypoints();
        assert_eq!(waypoints.len(), ctx.plan().photo_points.len());
        assert!(waypoints.iter().all(|w| w.absolute_altitude_m == 100.0));
    }

    #[test]
    fn test_flat_terrain() {
        let mut ctx = MissionContext::new(plan(), 100.0);
        assert_eq!(ctx.resolve_elevations(&FlatTerrain(420.0), 50), 0);
        assert!(ctx.waypoints().iter().all(|w| w.absolute_altitude_m == 520.0));
        for path in ctx.strip_paths() {
            assert_eq!(path.vertices.len(), 2);
            assert!(path.vertices.iter().all(|v| v[2] == 520.0));
        }
    }

    #[test]
    fn test_failed_batch_falls_back_to_zero() {
        let mut ctx = MissionContext::new(plan(), 100.0);
        let source = FlakyTerrain {
            calls: Cell::new(0),
            fail_every: 2,
        };
        let batch = 10;
        let failed = ctx.resolve_elevations(&source, batch);
        assert!(failed > 0);

        let waypoints = ctx.waypoints();
        // second batch of photo points failed
        assert!(waypoints.len() > batch);
        assert!(waypoints[..batch].iter().all(|w| w.ground_elevation_m == w.lat));
        let second = &waypoints[batch..(2 * batch).min(waypoints.len())];
        assert!(second.iter().all(|w| w.ground_elevation_m == 0.0));
        assert!(second.iter().all(|w| w.absolute_altitude_m == 100.0));
    }

    #[test]
    fn test_short_response_is_failure() {
        struct Short;
        impl ElevationSource for Short {
            fn elevations(&self, coords: &[Coord<f64>]) -> Result<Vec<f64>> {
                Ok(vec![5.0; coords.len().saturating_sub(1)])
            }
        }

        let mut ctx = MissionContext::new(plan(), 50.0);
        let failed = ctx.resolve_elevations(&Short, 1000);
        assert_eq!(failed, 2);
        assert!(ctx.waypoints().iter().all(|w| w.absolute_altitude_m == 50.0));
    }

    #[test]
    fn test_strip_paths_follow_plan() {
        let ctx = MissionContext::new(plan(), 100.0);
        let paths = ctx.strip_paths();
        assert_eq!(paths.len(), ctx.plan().strip_lines.len());
        for (path, line) in paths.iter().zip(&ctx.plan().strip_lines) {
            assert_eq!(path.id, line.id);
            assert_eq!(path.vertices[0][0], line.coordinates[0][0]);
        }
    }
}
