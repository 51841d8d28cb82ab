// Extraction configuration
//
// Everything a run needs is carried in an `ExtractionConfig` value that is
// handed to the orchestrator, so independent runs never share state.

use anyhow::{bail, Result};
use clap::ValueEnum;
use opencv::core::Scalar;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Upper bound of the hue channel in OpenCV's 8-bit HSV model.
pub const MAX_HUE: u8 = 180;

pub const DEFAULT_OUTPUT: &str = "output/trace.json";
pub const DEFAULT_GRID_COLS: u32 = 23;
pub const DEFAULT_GRID_ROWS: u32 = 23;
pub const DEFAULT_STRIDE: u32 = 10;

/// A colour in OpenCV's 8-bit HSV model (H in [0,180], S and V in [0,255]).
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HsvColor {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

impl HsvColor {
    pub const fn new(h: u8, s: u8, v: u8) -> Self {
        Self { h, s, v }
    }

    pub fn to_scalar(self) -> Scalar {
        Scalar::new(self.h as f64, self.s as f64, self.v as f64, 0.0)
    }
}

impl FromStr for HsvColor {
    type Err = anyhow::Error;

    /// Parses `"h,s,v"`, e.g. `"0,70,50"`.
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            bail!("Expected an HSV triple like '0,70,50', got '{}'", s);
        }

        let channel = |name: &str, raw: &str| -> Result<u8> {
            raw.parse::<u8>()
                .map_err(|e| anyhow::anyhow!("Invalid {} channel '{}': {}", name, raw, e))
        };

        Ok(Self {
            h: channel("hue", parts[0])?,
            s: channel("saturation", parts[1])?,
            v: channel("value", parts[2])?,
        })
    }
}

impl fmt::Display for HsvColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.h, self.s, self.v)
    }
}

/// Inclusive HSV bounds of the marker colour.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HsvRange {
    pub lower: HsvColor,
    pub upper: HsvColor,
}

impl HsvRange {
    /// The red agent marker of the recorded mazes.
    pub const RED: HsvRange = HsvRange {
        lower: HsvColor::new(0, 70, 50),
        upper: HsvColor::new(10, 255, 255),
    };

    pub fn validate(&self) -> Result<()> {
        for (label, c) in [("lower", self.lower), ("upper", self.upper)] {
            if c.h > MAX_HUE {
                bail!("HSV {} hue {} exceeds {}", label, c.h, MAX_HUE);
            }
        }

        let pairs = [
            ("hue", self.lower.h, self.upper.h),
            ("saturation", self.lower.s, self.upper.s),
            ("value", self.lower.v, self.upper.v),
        ];
        for (channel, lo, hi) in pairs {
            if lo > hi {
                bail!("HSV {} lower bound {} is above upper bound {}", channel, lo, hi);
            }
        }

        Ok(())
    }
}

/// Number of maze columns and rows the frame is divided into.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape {
    pub cols: u32,
    pub rows: u32,
}

impl GridShape {
    pub fn new(cols: u32, rows: u32) -> Self {
        Self { cols, rows }
    }
}

/// What to do with a centroid that falls outside the frame.
#[derive(ValueEnum, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutOfBounds {
    /// Snap the cell index onto the nearest edge cell.
    #[default]
    Clamp,
    /// Treat the frame as having no detection.
    Discard,
}

#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    pub video_path: PathBuf,
    pub output_path: PathBuf,
    pub summary_path: Option<PathBuf>,
    pub grid: GridShape,
    pub stride: u32,
    pub marker: HsvRange,
    pub out_of_bounds: OutOfBounds,
    pub show_progress: bool,
}

impl ExtractionConfig {
    pub fn new(video_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            video_path: video_path.into(),
            output_path: output_path.into(),
            summary_path: None,
            grid: GridShape::new(DEFAULT_GRID_COLS, DEFAULT_GRID_ROWS),
            stride: DEFAULT_STRIDE,
            marker: HsvRange::RED,
            out_of_bounds: OutOfBounds::Clamp,
            show_progress: true,
        }
    }

    /// Rejects configurations that would make the run meaningless.
    /// Called before the video is opened.
    pub fn validate(&self) -> Result<()> {
        if self.grid.cols == 0 || self.grid.rows == 0 {
            bail!(
                "Grid must have at least one column and row, got {}x{}",
                self.grid.cols,
                self.grid.rows
            );
        }
        if self.stride == 0 {
            bail!("Frame stride must be at least 1");
        }
        self.marker.validate()
    }
}
