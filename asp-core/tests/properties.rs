//! Pipeline-level properties of survey planning.

use approx::assert_relative_eq;
use asp_core::coordinate::{destination, distance_m};
use asp_core::*;
use geo::Coord;
use proptest::prelude::*;

const M_PER_DEG: f64 = 111_195.08;

fn camera() -> CameraModel {
    CameraModel::new(4000, 3000, 4.4, 25.0)
}

/// Axis-aligned `side_m` square with its south-west corner at (11E, 48N)
fn square(side_m: f64) -> SurveyArea {
    let dlat = side_m / M_PER_DEG;
    let dlng = dlat / 48.0_f64.to_radians().cos();
    SurveyArea::from_ring(&[
        [11.0, 48.0],
        [11.0 + dlng, 48.0],
        [11.0 + dlng, 48.0 + dlat],
        [11.0, 48.0 + dlat],
        [11.0, 48.0],
    ])
    .unwrap()
}

/// Convex hexagon about (11E, 48N) with circumradius `radius_m`
fn hexagon(radius_m: f64) -> SurveyArea {
    let center = Coord { x: 11.0, y: 48.0 };
    let mut ring: Vec<[f64; 2]> = (0..6)
        .map(|k| {
            let c = destination(center, 15.0 + 60.0 * k as f64, radius_m);
            [c.x, c.y]
        })
        .collect();
    ring.push(ring[0]);
    SurveyArea::from_ring(&ring).unwrap()
}

fn plan(area: &SurveyArea, options: &FlightOptions) -> SurveyPlan {
    plan_survey(area, &camera(), options).unwrap()
}

fn assert_consistent(area: &SurveyArea, plan: &SurveyPlan) {
    assert_eq!(plan.summary_stats.num_photos, plan.photo_points.len());

    let strips: std::collections::BTreeSet<_> =
        plan.strip_lines.iter().map(|l| l.strip_index).collect();
    assert_eq!(plan.summary_stats.num_strips, strips.len());
    // logical indices are dense
    assert!(strips.iter().copied().eq(0..strips.len()));

    for p in &plan.photo_points {
        assert!(
            area.contains(Coord { x: p.lng, y: p.lat }),
            "photo point outside survey area: {p:?}"
        );
        assert!(strips.contains(&p.strip_index));
    }
}

#[test]
fn test_one_km_square_scenario() {
    let area = square(1000.0);
    let options = FlightOptions::new(100.0).with_overlaps(0.7, 0.6);
    let plan = plan(&area, &options);

    assert_relative_eq!(plan.footprint.width_m, 70.4, epsilon = 1e-9);
    assert_relative_eq!(plan.footprint.height_m, 52.8, epsilon = 1e-9);
    assert_relative_eq!(plan.strip_spacing_m, 28.16, epsilon = 1e-9);
    assert_relative_eq!(plan.photo_spacing_m, 15.84, epsilon = 1e-9);

    // Candidate 1 sits on the west edge and is dropped; every multiple of the
    // spacing strictly inside the span yields one strip.
    let rect = area.bounding_rect().unwrap();
    let mid_y = (rect.min().y + rect.max().y) * 0.5;
    let span = distance_m(
        Coord { x: rect.min().x, y: mid_y },
        Coord { x: rect.max().x, y: mid_y },
    );
    let expected_strips = (1..)
        .take_while(|&i| i as f64 * plan.strip_spacing_m < span)
        .count();
    let strips = plan.summary_stats.num_strips;
    assert_eq!(strips, expected_strips);
    assert_eq!(strips, 35);

    // Samples at k * spacing for k = 0..=floor(L / spacing); k = 0 lies on
    // the southern border and is not strictly inside.
    let length = distance_m(
        Coord { x: rect.min().x, y: rect.min().y },
        Coord { x: rect.min().x, y: rect.max().y },
    );
    let per_strip = (length / plan.photo_spacing_m).floor() as usize;
    assert_eq!(per_strip, 63);
    let mut counts = vec![0usize; strips];
    for p in &plan.photo_points {
        counts[p.strip_index] += 1;
    }
    assert!(counts.iter().all(|&c| c == per_strip), "{counts:?}");
    assert_eq!(plan.summary_stats.num_photos, strips * per_strip);
    assert_eq!(plan.summary_stats.num_photos, 2205);

    for line in &plan.strip_lines {
        let [a, b] = [line.coordinates[0], line.coordinates[1]];
        let chord = distance_m(Coord { x: a[0], y: a[1] }, Coord { x: b[0], y: b[1] });
        assert_relative_eq!(chord, length, max_relative = 1e-6);
    }

    assert_relative_eq!(plan.summary_stats.area_ha, 100.0, max_relative = 1e-2);
    assert_relative_eq!(
        plan.summary_stats.total_length_km,
        strips as f64,
        max_relative = 1e-2
    );
    assert_eq!(
        plan.summary_stats.est_time_min,
        (plan.summary_stats.total_length_km / 0.6).ceil() as u64
    );
    assert_consistent(&area, &plan);
}

/// Regular `n`-gon about (11E, 48N) with circumradius `radius_m`
fn regular_polygon(n: usize, radius_m: f64) -> SurveyArea {
    let center = Coord { x: 11.0, y: 48.0 };
    let mut ring: Vec<[f64; 2]> = (0..n)
        .map(|k| {
            let c = destination(center, 360.0 * k as f64 / n as f64, radius_m);
            [c.x, c.y]
        })
        .collect();
    ring.push(ring[0]);
    SurveyArea::from_ring(&ring).unwrap()
}

fn assert_reverse_symmetric(area: &SurveyArea, direction: f64) {
    let forward = plan(area, &FlightOptions::new(100.0).with_direction(direction));
    let reverse = plan(
        area,
        &FlightOptions::new(100.0).with_direction(direction + 180.0),
    );

    let (a, b) = (forward.summary_stats, reverse.summary_stats);
    assert_eq!(a.num_strips, b.num_strips, "direction {direction}: {a:?} vs {b:?}");
    // at most one chord of the polygon (its circumdiameter) apart
    assert!(
        (a.total_length_km - b.total_length_km).abs() <= 1.2 + 0.02,
        "direction {direction}: {a:?} vs {b:?}"
    );

    // no zero-length edge strip takes logical index 0
    for plan in [&forward, &reverse] {
        let first = &plan.strip_lines[0].coordinates;
        let chord = distance_m(
            Coord { x: first[0][0], y: first[0][1] },
            Coord { x: first[1][0], y: first[1][1] },
        );
        assert!(chord > 1.0, "direction {direction}: first chord {chord} m");
    }
}

#[test]
fn test_reverse_direction_symmetry() {
    let area = hexagon(600.0);
    for direction in [0.0, 30.0, 75.0, 140.0] {
        assert_reverse_symmetric(&area, direction);
    }
}

#[test]
fn test_reverse_direction_symmetry_regular_polygons() {
    for n in [4, 6, 8] {
        let area = regular_polygon(n, 600.0);
        for direction in (3..180).step_by(20) {
            assert_reverse_symmetric(&area, direction as f64);
        }
    }
    // directions whose west-edge strip used to flip between reversals
    let square = regular_polygon(4, 600.0);
    assert_reverse_symmetric(&square, 3.0);
    assert_reverse_symmetric(&square, 143.0);
}

#[test]
fn test_wider_strip_spacing_never_adds_strips() {
    let area = hexagon(700.0);
    let counts: Vec<usize> = [0.8, 0.6, 0.4, 0.2, 0.0]
        .iter()
        .map(|&sidelap| {
            plan(&area, &FlightOptions::new(100.0).with_overlaps(0.7, sidelap))
                .summary_stats
                .num_strips
        })
        .collect();
    assert!(counts.windows(2).all(|w| w[1] <= w[0]), "{counts:?}");
}

#[test]
fn test_wider_photo_spacing_never_adds_photos_per_strip() {
    let area = square(800.0);
    let per_strip = |frontlap: f64| {
        let plan = plan(&area, &FlightOptions::new(100.0).with_overlaps(frontlap, 0.6));
        let mut counts = vec![0usize; plan.summary_stats.num_strips];
        for p in &plan.photo_points {
            counts[p.strip_index] += 1;
        }
        counts
    };

    let runs: Vec<Vec<usize>> = [0.9, 0.7, 0.5, 0.3].iter().map(|&f| per_strip(f)).collect();
    for pair in runs.windows(2) {
        assert_eq!(pair[0].len(), pair[1].len());
        assert!(pair[0].iter().zip(&pair[1]).all(|(a, b)| b <= a));
    }
}

#[test]
fn test_repeated_calls_identical() {
    let area = hexagon(500.0);
    let options = FlightOptions::new(90.0).with_direction(123.4);
    let a = plan(&area, &options);
    let b = plan(&area, &options);
    assert_eq!(a, b);
    for (p, q) in a.photo_points.iter().zip(&b.photo_points) {
        assert_eq!(p.lat.to_bits(), q.lat.to_bits());
        assert_eq!(p.lng.to_bits(), q.lng.to_bits());
    }
}

#[test]
fn test_area_smaller_than_footprint() {
    let area = square(10.0);
    for direction in [0.0, 45.0, 90.0] {
        let plan = plan(&area, &FlightOptions::new(100.0).with_direction(direction));
        assert_consistent(&area, &plan);
        assert!(plan.summary_stats.num_strips <= 1);
    }
}

#[test]
fn test_missing_focal_length_is_missing_parameter() {
    let camera = CameraModel {
        focal_length_mm: None,
        ..camera()
    };
    let result = plan_survey(&square(1000.0), &camera, &FlightOptions::new(100.0));
    assert!(matches!(result, Err(AspError::MissingParameter(_))));
}

#[test]
fn test_sidelap_near_one_is_rejected() {
    let options = FlightOptions::new(100.0).with_overlaps(0.7, 0.999_999);
    let result = plan_survey(&square(1000.0), &camera(), &options);
    assert!(matches!(result, Err(AspError::StripLimit { .. })));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn photo_points_stay_inside(
        direction in 0.0_f64..360.0,
        frontlap in 0.3_f64..0.85,
        sidelap in 0.2_f64..0.8,
    ) {
        let area = hexagon(400.0);
        let options = FlightOptions::new(100.0)
            .with_direction(direction)
            .with_overlaps(frontlap, sidelap);
        let plan = plan_survey(&area, &camera(), &options).unwrap();

        prop_assert_eq!(plan.summary_stats.num_photos, plan.photo_points.len());
        for p in &plan.photo_points {
            let c = Coord { x: p.lng, y: p.lat };
            prop_assert!(area.contains(c), "photo point outside survey area: {:?}", p);
        }
    }

    #[test]
    fn parallel_matches_sequential(direction in 0.0_f64..360.0) {
        let area = hexagon(400.0);
        let options = FlightOptions::new(100.0).with_direction(direction);
        let a = plan_survey(&area, &camera(), &options).unwrap();
        let b = plan_survey_parallel(&area, &camera(), &options).unwrap();
        prop_assert_eq!(a, b);
    }
}
