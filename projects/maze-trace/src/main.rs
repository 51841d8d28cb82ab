mod cli;
mod config;
mod pipeline;
mod run_artifacts;
mod run_context;
mod video;

use anyhow::Result;
use cli::Args;
use pipeline::orchestrator::run_extraction;
use pipeline::types::{Action, Cell};

fn format_trajectory(trajectory: &[Cell]) -> String {
    let cells: Vec<String> = trajectory
        .iter()
        .map(|c| format!("[{}, {}]", c.col, c.row))
        .collect();
    format!("[{}]", cells.join(", "))
}

fn format_actions(actions: &[Action]) -> String {
    let names: Vec<String> = actions.iter().map(|a| format!("{:?}", a)).collect();
    format!("[{}]", names.join(", "))
}

fn main() -> Result<()> {
    // Load environment variables from .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = Args::parse_args().into_config();
    let outcome = run_extraction(&config)?;

    let trajectory = format_trajectory(&outcome.result.trajectory);
    let actions = format_actions(&outcome.result.actions);
    tracing::info!(
        "Extraction complete: trajectory={} actions={} detected_frames={}",
        trajectory,
        actions,
        outcome.detected_frames
    );

    println!("Extraction complete");
    println!("Trajectory: {}", trajectory);
    println!("Actions: {}", actions);
    println!("Detected frames: {}", outcome.detected_frames);

    Ok(())
}
