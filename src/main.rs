use anyhow::Result;
use clap::Parser;
use log::{debug, error, info};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

mod course;

use course::CourseRunner;
use robocode_common::{CourseConfig, OutputConfig, Waypoint};

/// Runs an agent through a course of moves described in a TOML file.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to the course configuration
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,
}

fn main() -> Result<()> {
    // Initialize the logger
    env_logger::init();
    let args = Args::parse();

    info!("Starting Robocode course runner...");

    // --- Load Configuration ---
    let config = CourseConfig::load(&args.config)?;
    debug!("Course configuration: {:#?}", config);

    let mut runner = CourseRunner::new(config);
    let total_moves = runner.total_moves();
    info!(
        "Agent starts at {} heading {:.4} rad with {} moves queued.",
        runner.position(),
        runner.heading(),
        total_moves
    );

    // --- Course Loop ---
    let start_time = Instant::now();
    let report_every = (total_moves / 10).max(1);
    let mut applied = 0;
    while runner.step()? {
        applied += 1;
        if applied % report_every == 0 || applied == total_moves {
            info!(
                "Move [{}/{}] | Position: {} | Heading: {:.4} rad | Travelled: {:.3}",
                applied,
                total_moves,
                runner.position(),
                runner.heading(),
                runner.travelled()
            );
        }
    }

    info!(
        "Course finished in {:.3} ms. Final position {} after travelling {:.3}.",
        start_time.elapsed().as_secs_f64() * 1000.0,
        runner.position(),
        runner.travelled()
    );
    let outside = runner.waypoints().iter().filter(|w| !w.in_arena).count();
    if outside > 0 {
        info!("{} of {} waypoints were outside the arena.", outside, runner.waypoints().len());
    }

    // --- Save Recorded Data ---
    let output = &runner.config().output;
    if output.save_trajectory {
        let filename = trajectory_filename(output);
        save_trajectory_json(Path::new(&filename), runner.waypoints())?;
    } else {
        info!("Skipping saving trajectory as per config (save_trajectory is false).");
    }

    if output.save_positions {
        let filename = format!("{}_final_positions.csv", output.base_filename);
        save_positions_csv(Path::new(&filename), runner.waypoints())?;
    }

    info!("Course Complete.");
    Ok(())
}

/// Trajectory file name for the configured format. Only JSON is written;
/// anything else falls back to it.
fn trajectory_filename(output: &OutputConfig) -> String {
    let format = output.format.as_deref().unwrap_or("json");
    if format != "json" {
        error!("Unknown output format: {}. Using JSON instead.", format);
    }
    format!("{}_trajectory.json", output.base_filename)
}

fn save_trajectory_json(path: &Path, waypoints: &[Waypoint]) -> Result<()> {
    let mut file = File::create(path)
        .map_err(|e| anyhow::anyhow!("Error creating trajectory file '{}': {}", path.display(), e))?;
    let json_string = serde_json::to_string_pretty(waypoints)?;
    file.write_all(json_string.as_bytes())?;
    info!("Trajectory with {} waypoints saved to {}", waypoints.len(), path.display());
    Ok(())
}

// One x,y row per waypoint, starting pose first
fn save_positions_csv(path: &Path, waypoints: &[Waypoint]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| anyhow::anyhow!("Error creating CSV file '{}': {}", path.display(), e))?;
    writer.write_record(["x", "y"])?;
    for waypoint in waypoints {
        writer.write_record(&[
            format!("{:.6}", waypoint.position.x()),
            format!("{:.6}", waypoint.position.y()),
        ])?;
    }
    writer.flush()?;
    info!("Positions saved to {}", path.display());
    Ok(())
}
