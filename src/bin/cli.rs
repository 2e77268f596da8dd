//! trailprofile CLI - Debug tool for elevation profiles
//!
//! Usage:
//!   trailprofile-cli metrics <gpx files...> [--pitch-resolution <m>] [--json]
//!   trailprofile-cli profile <gpx> --target-resolution <m> [--output <file>]
//!   trailprofile-cli reconstruct <gpx> <profile.json>
//!
//! Reads GPX tracks and shows the derived terrain metrics, or captures and
//! replays stored elevation profiles. Each track segment is its own path.

use clap::{Parser, Subcommand};
use gpx::{Gpx, read};
use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use trailprofile::{ElevationData, ElevationProfile, GpsPoint, ProfileConfig, ProfileEngine};

#[derive(Parser)]
#[command(name = "trailprofile-cli")]
#[command(about = "Debug tool for trail elevation profiles", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose debug output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute ascent, descent and pitch for GPX tracks
    Metrics {
        /// GPX files to process
        files: Vec<PathBuf>,

        /// Chunk length in meters for maximum pitch
        #[arg(long, default_value = "25")]
        pitch_resolution: f64,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Capture a stored elevation profile from a GPX track
    Profile {
        /// GPX file with elevations
        file: PathBuf,

        /// Maximum spacing between samples in meters
        #[arg(short, long, default_value = "10")]
        target_resolution: f64,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Rebuild an elevated track from a stored profile and show its metrics
    Reconstruct {
        /// GPX file providing the 2-D geometry
        file: PathBuf,

        /// Profile JSON produced by `profile`
        profile: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format(|buf, record| writeln!(buf, "[{:5}] {}", record.level(), record.args()))
        .init();

    let result = match cli.command {
        Commands::Metrics {
            files,
            pitch_resolution,
            json,
        } => run_metrics(&files, pitch_resolution, json),
        Commands::Profile {
            file,
            target_resolution,
            output,
        } => run_profile(&file, target_resolution, output.as_deref()),
        Commands::Reconstruct { file, profile } => run_reconstruct(&file, &profile),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Parse a GPX file into one path per track segment.
///
/// Segments are kept apart: joining them would bridge recording gaps with
/// straight lines.
fn load_segments(path: &Path) -> Result<Vec<Vec<GpsPoint>>, String> {
    let file = File::open(path).map_err(|e| e.to_string())?;
    let gpx: Gpx = read(BufReader::new(file)).map_err(|e| e.to_string())?;

    let segments: Vec<Vec<GpsPoint>> = gpx
        .tracks
        .iter()
        .flat_map(|track| &track.segments)
        .map(|segment| {
            segment
                .points
                .iter()
                .map(|pt| {
                    let p = pt.point();
                    GpsPoint {
                        latitude: p.y(),
                        longitude: p.x(),
                        elevation: pt.elevation,
                    }
                })
                .collect::<Vec<_>>()
        })
        .filter(|points| !points.is_empty())
        .collect();

    if segments.is_empty() {
        return Err(format!("no track points in {}", path.display()));
    }
    Ok(segments)
}

/// Load a file that must describe a single continuous path.
fn load_single_path(path: &Path) -> Result<Vec<GpsPoint>, String> {
    let mut segments = load_segments(path)?;
    if segments.len() > 1 {
        log::warn!(
            "{} has {} track segments, using the first",
            path.display(),
            segments.len()
        );
    }
    Ok(segments.swap_remove(0))
}

fn run_metrics(files: &[PathBuf], pitch_resolution: f64, json: bool) -> Result<(), String> {
    let engine = ProfileEngine::with_config(ProfileConfig {
        pitch_resolution_meters: pitch_resolution,
        ..ProfileConfig::default()
    });

    let mut failures = 0;
    let mut processed = 0;
    for file in files {
        let segments = match load_segments(file) {
            Ok(segments) => segments,
            Err(e) => {
                eprintln!("  [ERR] {}: {}", file.display(), e);
                failures += 1;
                processed += 1;
                continue;
            }
        };

        let count = segments.len();
        for (index, segment) in segments.iter().enumerate() {
            let label = if count > 1 {
                format!("{} (segment {}/{})", file.display(), index + 1, count)
            } else {
                file.display().to_string()
            };
            processed += 1;

            match engine.elevation_data(segment) {
                Ok(data) if json => {
                    let text = serde_json::to_string_pretty(&data).map_err(|e| e.to_string())?;
                    println!("{}", text);
                }
                Ok(data) => print_metrics(&label, &data),
                Err(e) => {
                    eprintln!("  [ERR] {}: {}", label, e);
                    failures += 1;
                }
            }
        }
    }

    if failures > 0 {
        return Err(format!("{} of {} paths failed", failures, processed));
    }
    Ok(())
}

fn run_profile(file: &Path, target_resolution: f64, output: Option<&Path>) -> Result<(), String> {
    let track = load_single_path(file)?;
    let engine = ProfileEngine::new();
    let profile = engine
        .profile_from_elevated_path(&track, target_resolution)
        .map_err(|e| e.to_string())?;

    log::info!(
        "Captured {} heights at {:.3}m (target {:.1}m)",
        profile.heights.len(),
        profile.resolution,
        profile.target_resolution
    );

    let text = serde_json::to_string(&profile).map_err(|e| e.to_string())?;
    match output {
        Some(path) => fs::write(path, text).map_err(|e| e.to_string()),
        None => {
            println!("{}", text);
            Ok(())
        }
    }
}

fn run_reconstruct(file: &Path, profile_path: &Path) -> Result<(), String> {
    let track = load_single_path(file)?;
    let content = fs::read_to_string(profile_path).map_err(|e| e.to_string())?;
    let profile: ElevationProfile = serde_json::from_str(&content).map_err(|e| e.to_string())?;

    let engine = ProfileEngine::new();
    let elevated = engine
        .reconstruct(&track, &profile)
        .map_err(|e| e.to_string())?;
    let data = engine
        .elevation_data(&elevated)
        .map_err(|e| e.to_string())?;

    print_metrics(&file.display().to_string(), &data);
    Ok(())
}

fn format_pitch(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.1}%", v))
}

fn print_metrics(label: &str, data: &ElevationData) {
    println!("\n{}", "=".repeat(60));
    println!("{}", label);
    println!("{}", "=".repeat(60));
    println!(
        "  ascent {:.1}m, descent {:.1}m",
        data.ascent_in_meters, data.descent_in_meters
    );
    println!(
        "  elevation {:.1}m - {:.1}m (vertical {:.1}m)",
        data.min_elevation_in_meters, data.max_elevation_in_meters, data.vertical_in_meters
    );
    println!(
        "  pitch avg {}, max {} (over {:.1}m), overall {}",
        format_pitch(data.average_pitch_in_percent.value()),
        format_pitch(data.max_pitch_in_percent.value()),
        data.pitch_calculation_resolution_in_meters,
        format_pitch(data.overall_pitch_in_percent.value())
    );
    println!("  inclined length {:.1}m", data.inclined_length_in_meters);
}
