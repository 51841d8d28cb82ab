use crate::config::{
    ExtractionConfig, GridShape, HsvColor, HsvRange, OutOfBounds, DEFAULT_GRID_COLS,
    DEFAULT_GRID_ROWS, DEFAULT_OUTPUT, DEFAULT_STRIDE,
};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Extract a cell trajectory and move sequence from a maze video", long_about = None)]
pub struct Args {
    /// Input video of the marker moving through the maze
    #[arg(long, env = "MAZE_TRACE_VIDEO")]
    pub video: PathBuf,

    /// Trace JSON output path
    #[arg(long, env = "MAZE_TRACE_OUTPUT", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Optional run summary JSON (frame counts, detection rate)
    #[arg(long, env = "MAZE_TRACE_SUMMARY_OUTPUT")]
    pub summary_output: Option<PathBuf>,

    /// Number of maze columns
    #[arg(long, env = "MAZE_TRACE_GRID_COLS", default_value_t = DEFAULT_GRID_COLS, value_parser = clap::value_parser!(u32).range(1..))]
    pub grid_cols: u32,

    /// Number of maze rows
    #[arg(long, env = "MAZE_TRACE_GRID_ROWS", default_value_t = DEFAULT_GRID_ROWS, value_parser = clap::value_parser!(u32).range(1..))]
    pub grid_rows: u32,

    /// Sample every Nth frame
    #[arg(long, env = "MAZE_TRACE_STRIDE", default_value_t = DEFAULT_STRIDE, value_parser = clap::value_parser!(u32).range(1..))]
    pub stride: u32,

    /// Lower HSV bound of the marker colour as "h,s,v" (OpenCV scale: H 0-180)
    #[arg(long, env = "MAZE_TRACE_HSV_LOWER", default_value_t = HsvRange::RED.lower)]
    pub hsv_lower: HsvColor,

    /// Upper HSV bound of the marker colour as "h,s,v"
    #[arg(long, env = "MAZE_TRACE_HSV_UPPER", default_value_t = HsvRange::RED.upper)]
    pub hsv_upper: HsvColor,

    /// Handling of centroids that fall outside the frame
    #[arg(long, env = "MAZE_TRACE_OUT_OF_BOUNDS", value_enum, default_value_t = OutOfBounds::Clamp)]
    pub out_of_bounds: OutOfBounds,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn into_config(self) -> ExtractionConfig {
        let mut config = ExtractionConfig::new(self.video, self.output);
        config.summary_path = self.summary_output;
        config.grid = GridShape::new(self.grid_cols, self.grid_rows);
        config.stride = self.stride;
        config.marker = HsvRange {
            lower: self.hsv_lower,
            upper: self.hsv_upper,
        };
        config.out_of_bounds = self.out_of_bounds;
        config.show_progress = !self.no_progress;
        config
    }
}
