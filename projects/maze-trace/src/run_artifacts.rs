// Run artifact struct definitions
//
// This module contains the structs that are persisted as JSON files at the
// end of a run.

use crate::config::GridShape;
use crate::pipeline::types::{Action, Cell};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The trace document: deduplicated cells and the actions between them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExtractionResult {
    pub trajectory: Vec<Cell>,
    pub actions: Vec<Action>,
}

/// Diagnostics for a run, written next to the trace when requested.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RunSummary {
    pub video: PathBuf,
    pub created_at: DateTime<Utc>,
    pub grid_cols: u32,
    pub grid_rows: u32,
    pub stride: u32,
    pub frames_read: usize,
    pub sampled_frames: usize,
    pub detected_frames: usize,
    /// detected_frames / sampled_frames, 0 when nothing was sampled.
    pub detection_rate: f64,
    pub trajectory_len: usize,
    pub action_count: usize,
    pub unknown_actions: usize,
}

impl RunSummary {
    pub fn new(
        video: PathBuf,
        grid: GridShape,
        stride: u32,
        frames_read: usize,
        sampled_frames: usize,
        detected_frames: usize,
        result: &ExtractionResult,
    ) -> Self {
        let detection_rate = if sampled_frames > 0 {
            detected_frames as f64 / sampled_frames as f64
        } else {
            0.0
        };

        Self {
            video,
            created_at: Utc::now(),
            grid_cols: grid.cols,
            grid_rows: grid.rows,
            stride,
            frames_read,
            sampled_frames,
            detected_frames,
            detection_rate,
            trajectory_len: result.trajectory.len(),
            action_count: result.actions.len(),
            unknown_actions: result
                .actions
                .iter()
                .filter(|a| **a == Action::Unknown)
                .count(),
        }
    }
}
