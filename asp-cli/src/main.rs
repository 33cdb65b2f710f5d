//! asp CLI: plan aerial photo-survey strips and capture points.

use asp_core::{CameraModel, Footprint, plan_survey, plan_survey_parallel};
use asp_io::{FlatTerrain, MissionContext, PlanConfig, load_config, load_survey_area};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "asp")]
#[command(about = "Plan parallel flight strips and photo points over a survey polygon")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan strips and photo points for a survey area.
    Plan(PlanArgs),

    /// Print the ground footprint and spacings for a configuration.
    Footprint(FootprintArgs),

    /// List built-in camera presets.
    Cameras,
}

#[derive(Debug, Clone, Args)]
struct FlightOverrides {
    /// Path to the plan configuration (JSON).
    #[arg(long)]
    config: PathBuf,

    /// Flight height above ground in meters.
    #[arg(long)]
    height: Option<f64>,

    /// Frontlap fraction in [0, 1).
    #[arg(long)]
    frontlap: Option<f64>,

    /// Sidelap fraction in [0, 1).
    #[arg(long)]
    sidelap: Option<f64>,

    /// Flight direction in degrees clockwise from north.
    #[arg(long)]
    direction: Option<f64>,

    /// Segments shorter than this (meters) get no photo points.
    #[arg(long)]
    min_segment_length: Option<f64>,
}

#[derive(Debug, Clone, Args)]
struct PlanArgs {
    /// Path to the survey area (GeoJSON Polygon, Feature or FeatureCollection).
    #[arg(long)]
    area: PathBuf,

    #[command(flatten)]
    flight: FlightOverrides,

    /// Constant ground elevation in meters used for absolute altitudes.
    #[arg(long, default_value = "0.0")]
    ground_elevation: f64,

    /// Process candidate strips on all cores.
    #[arg(long)]
    parallel: bool,

    /// Print the full plan as JSON instead of the summary.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Args)]
struct FootprintArgs {
    #[command(flatten)]
    flight: FlightOverrides,
}

fn load_with_overrides(args: &FlightOverrides) -> CliResult<PlanConfig> {
    let mut config = load_config(&args.config)?;
    let flight = &mut config.flight;
    if let Some(height) = args.height {
        flight.height_m = height;
    }
    if let Some(frontlap) = args.frontlap {
        flight.frontlap = frontlap;
    }
    if let Some(sidelap) = args.sidelap {
        flight.sidelap = sidelap;
    }
    if let Some(direction) = args.direction {
        flight.direction_deg = direction;
    }
    if let Some(min_len) = args.min_segment_length {
        flight.min_segment_length_m = min_len;
    }
    Ok(config)
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Plan(args) => run_plan(&args),
        Commands::Footprint(args) => run_footprint(&args),
        Commands::Cameras => run_cameras(),
    }
}

// ── plan ──────────────────────────────────────────────────────────────

fn run_plan(args: &PlanArgs) -> CliResult<()> {
    let config = load_with_overrides(&args.flight)?;
    let camera = config.resolved_camera()?;
    let area = load_survey_area(&args.area)?;

    tracing::info!(
        area = %args.area.display(),
        height_m = config.flight.height_m,
        direction_deg = config.flight.direction_deg,
        parallel = args.parallel,
        "planning survey"
    );

    let plan = if args.parallel {
        plan_survey_parallel(&area, &camera, &config.flight)?
    } else {
        plan_survey(&area, &camera, &config.flight)?
    };

    let mut mission = MissionContext::new(plan, config.flight.height_m);
    let failed = mission.resolve_elevations(&FlatTerrain(args.ground_elevation), 500);
    if failed > 0 {
        tracing::warn!(failed_batches = failed, "elevation lookups fell back to 0 m");
    }

    if args.json {
        let out = serde_json::json!({
            "plan": mission.plan(),
            "waypoints": mission.waypoints(),
            "stripPaths": mission.strip_paths(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let plan = mission.plan();
    let stats = &plan.summary_stats;
    println!("survey plan");
    println!(
        "  footprint:       {:.1} x {:.1} m",
        plan.footprint.width_m, plan.footprint.height_m
    );
    println!("  strip spacing:   {:.1} m", plan.strip_spacing_m);
    println!("  photo spacing:   {:.1} m", plan.photo_spacing_m);
    println!("  area:            {:.2} ha", stats.area_ha);
    println!("  strips:          {}", stats.num_strips);
    println!("  segments:        {}", plan.strip_lines.len());
    println!("  photos:          {}", stats.num_photos);
    println!("  path length:     {:.2} km", stats.total_length_km);
    println!("  est. time:       {} min", stats.est_time_min);
    println!(
        "  altitude (AMSL): {:.1} m",
        args.ground_elevation + mission.flight_height_m()
    );

    Ok(())
}

// ── footprint ─────────────────────────────────────────────────────────

fn run_footprint(args: &FootprintArgs) -> CliResult<()> {
    let config = load_with_overrides(&args.flight)?;
    let camera = config.resolved_camera()?;
    let flight = config.flight.validate()?;
    let footprint = Footprint::compute(&camera, flight.height_m)?;

    println!("footprint at {:.1} m", flight.height_m);
    println!("  across-track:    {:.2} m", footprint.width_m);
    println!("  along-track:     {:.2} m", footprint.height_m);
    println!(
        "  strip spacing:   {:.2} m (sidelap {:.0}%)",
        footprint.strip_spacing(flight.sidelap),
        flight.sidelap * 100.0
    );
    println!(
        "  photo spacing:   {:.2} m (frontlap {:.0}%)",
        footprint.photo_spacing(flight.frontlap),
        flight.frontlap * 100.0
    );

    Ok(())
}

// ── cameras ───────────────────────────────────────────────────────────

fn run_cameras() -> CliResult<()> {
    println!("built-in cameras");
    for name in CameraModel::preset_names() {
        if let Some(camera) = CameraModel::preset(name) {
            let (w_mm, h_mm) = camera.sensor_size_mm().unwrap_or((0.0, 0.0));
            println!(
                "  {:<12} {}x{} px  {:.1}x{:.1} mm  f={} mm",
                name,
                camera.sensor_width_px.unwrap_or(0),
                camera.sensor_height_px.unwrap_or(0),
                w_mm,
                h_mm,
                camera.focal_length_mm.unwrap_or(0.0)
            );
        }
    }
    Ok(())
}
