// Pipeline orchestrator: runs one extraction from an open video to the
// persisted trace.
//
// Sampling consumes the reader and releases it before the reduction runs.
// Reduction (deduplicate + translate) runs once on the finished trajectory.

use crate::config::ExtractionConfig;
use crate::pipeline::actions::translate;
use crate::pipeline::grid::GridQuantizer;
use crate::pipeline::sampler::{progress_bar, sample_trajectory};
use crate::pipeline::trajectory::deduplicate;
use crate::pipeline::types::Cell;
use crate::run_artifacts::{ExtractionResult, RunSummary};
use crate::run_context::write_json_artifact;
use crate::video::opencv_reader::OpencvReader;
use crate::video::VideoReader;
use anyhow::{anyhow, Result};
use std::num::NonZeroU32;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    pub result: ExtractionResult,
    pub frames_read: usize,
    pub sampled_frames: usize,
    pub detected_frames: usize,
}

/// Turns a raw per-frame trajectory into the final trace.
pub fn reduce(raw: Vec<Cell>) -> ExtractionResult {
    let trajectory = deduplicate(&raw);
    let actions = translate(&trajectory);
    ExtractionResult {
        trajectory,
        actions,
    }
}

/// Samples `reader` to the end and reduces the result. The reader is dropped
/// as soon as sampling finishes.
pub fn extract<R: VideoReader>(mut reader: R, config: &ExtractionConfig) -> Result<ExtractionOutcome> {
    config.validate()?;
    let stride = NonZeroU32::new(config.stride)
        .ok_or_else(|| anyhow!("Frame stride must be at least 1"))?;

    let (width, height) = reader.frame_size();
    let quantizer = GridQuantizer::new(width, height, config.grid, config.out_of_bounds)?;
    let (cell_w, cell_h) = quantizer.cell_size();
    tracing::info!(
        "Frame {}x{} (fps={:?}), cell size {:.2}x{:.2} px",
        width,
        height,
        reader.source_fps(),
        cell_w,
        cell_h
    );
    let pb = progress_bar(reader.frame_count(), stride, config.show_progress)?;

    let start = Instant::now();
    let report = sample_trajectory(&mut reader, &config.marker, &quantizer, stride, &pb);
    drop(reader);

    tracing::info!(
        "Sampling finished in {:.2}s: frames_read={}, sampled={}, detected={}",
        start.elapsed().as_secs_f64(),
        report.frames_read,
        report.sampled_frames,
        report.detected_frames
    );

    let result = reduce(report.raw);

    Ok(ExtractionOutcome {
        result,
        frames_read: report.frames_read,
        sampled_frames: report.sampled_frames,
        detected_frames: report.detected_frames,
    })
}

/// Writes the trace document and, if configured, the run summary.
pub fn persist(config: &ExtractionConfig, outcome: &ExtractionOutcome) -> Result<()> {
    write_json_artifact(&config.output_path, &outcome.result)?;
    tracing::info!("Trace written to {}", config.output_path.display());

    if let Some(summary_path) = &config.summary_path {
        let summary = RunSummary::new(
            config.video_path.clone(),
            config.grid,
            config.stride,
            outcome.frames_read,
            outcome.sampled_frames,
            outcome.detected_frames,
            &outcome.result,
        );
        write_json_artifact(summary_path, &summary)?;
        tracing::info!("Run summary written to {}", summary_path.display());
    }

    Ok(())
}

/// Full run: validate, open the video, extract, persist.
pub fn run_extraction(config: &ExtractionConfig) -> Result<ExtractionOutcome> {
    config.validate()?;

    tracing::info!(
        "Extracting maze trace from {} (grid {}x{}, stride {})",
        config.video_path.display(),
        config.grid.cols,
        config.grid.rows,
        config.stride
    );

    let reader = OpencvReader::open(&config.video_path)?;
    let outcome = extract(reader, config)?;
    persist(config, &outcome)?;

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridShape;
    use crate::pipeline::localizer::tests::{blank_frame, paint, RED_BGR};
    use crate::pipeline::types::Action;
    use crate::video::memory_reader::MemoryReader;
    use opencv::core::{Mat, Rect};
    use std::fs;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("maze_trace_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    fn test_config(dir: &std::path::Path, stride: u32) -> ExtractionConfig {
        let mut config = ExtractionConfig::new(dir.join("maze.mp4"), dir.join("out/trace.json"));
        config.grid = GridShape::new(25, 25);
        config.stride = stride;
        config.show_progress = false;
        config
    }

    /// 500x500 frame, marker centred in cell (col, row) of a 25x25 grid.
    fn marker_frame(col: i32, row: i32) -> Mat {
        let mut frame = blank_frame(500, 500);
        paint(&mut frame, Rect::new(col * 20 + 4, row * 20 + 4, 12, 12), RED_BGR);
        frame
    }

    #[test]
    fn test_reduce() {
        let raw = vec![
            Cell::new(3, 3),
            Cell::new(3, 3),
            Cell::new(3, 4),
            Cell::new(5, 4),
            Cell::new(5, 4),
        ];
        let result = reduce(raw);
        assert_eq!(
            result.trajectory,
            vec![Cell::new(3, 3), Cell::new(3, 4), Cell::new(5, 4)]
        );
        assert_eq!(result.actions, vec![Action::Down, Action::Unknown]);

        let empty = reduce(Vec::new());
        assert!(empty.trajectory.is_empty());
        assert!(empty.actions.is_empty());
    }

    #[test]
    fn test_end_to_end_right_then_down() {
        let dir = scratch_dir("e2e");
        let config = test_config(&dir, 1);

        let frames = vec![
            marker_frame(1, 1),
            marker_frame(1, 1),
            marker_frame(1, 1),
            marker_frame(2, 1),
            marker_frame(2, 1),
            marker_frame(2, 2),
        ];
        let outcome = extract(MemoryReader::new(500, 500, frames), &config).unwrap();
        assert_eq!(
            outcome.result.trajectory,
            vec![Cell::new(1, 1), Cell::new(2, 1), Cell::new(2, 2)]
        );
        assert_eq!(outcome.result.actions, vec![Action::Right, Action::Down]);
        assert_eq!(outcome.detected_frames, 6);

        persist(&config, &outcome).unwrap();
        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&config.output_path).unwrap()).unwrap();
        assert_eq!(
            written,
            serde_json::json!({
                "trajectory": [[1, 1], [2, 1], [2, 2]],
                "actions": ["Right", "Down"]
            })
        );

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_stride_longer_than_video() {
        let dir = scratch_dir("stride");
        let config = test_config(&dir, 10);

        // Frame 0 is blank; the markers in frames 1..4 are never looked at.
        let mut frames = vec![blank_frame(500, 500)];
        frames.extend((1..5).map(|i| marker_frame(i, i)));

        let outcome = extract(MemoryReader::new(500, 500, frames), &config).unwrap();
        assert_eq!(outcome.frames_read, 5);
        assert_eq!(outcome.sampled_frames, 1);
        assert_eq!(outcome.detected_frames, 0);
        assert!(outcome.result.trajectory.is_empty());
        assert!(outcome.result.actions.is_empty());
    }

    #[test]
    fn test_diagonal_jump_is_reported() {
        let dir = scratch_dir("diag");
        let config = test_config(&dir, 1);

        let frames = vec![marker_frame(0, 0), marker_frame(1, 1), marker_frame(1, 2)];
        let outcome = extract(MemoryReader::new(500, 500, frames), &config).unwrap();
        assert_eq!(outcome.result.actions, vec![Action::Unknown, Action::Down]);
    }

    #[test]
    fn test_summary_written_when_requested() {
        let dir = scratch_dir("summary");
        let mut config = test_config(&dir, 2);
        config.summary_path = Some(dir.join("out/summary.json"));

        let frames = vec![
            marker_frame(0, 0),
            marker_frame(0, 0),
            blank_frame(500, 500),
            blank_frame(500, 500),
            marker_frame(1, 0),
        ];
        let outcome = extract(MemoryReader::new(500, 500, frames), &config).unwrap();
        persist(&config, &outcome).unwrap();

        let summary: RunSummary = serde_json::from_str(
            &fs::read_to_string(config.summary_path.as_ref().unwrap()).unwrap(),
        )
        .unwrap();
        assert_eq!(summary.frames_read, 5);
        assert_eq!(summary.sampled_frames, 3);
        assert_eq!(summary.detected_frames, 2);
        assert_eq!(summary.trajectory_len, 2);
        assert_eq!(summary.action_count, 1);
        assert_eq!(summary.unknown_actions, 0);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_zero_frame_size_is_rejected() {
        let dir = scratch_dir("zero");
        let config = test_config(&dir, 1);
        assert!(extract(MemoryReader::new(0, 500, Vec::new()), &config).is_err());
    }

    #[test]
    fn test_extract_rejects_invalid_config() {
        let dir = scratch_dir("bad_extract");

        let mut config = test_config(&dir, 1);
        config.grid = GridShape::new(0, 25);
        let frames = vec![marker_frame(1, 1)];
        assert!(extract(MemoryReader::new(500, 500, frames), &config).is_err());

        let config = test_config(&dir, 0);
        let frames = vec![marker_frame(1, 1)];
        let err = extract(MemoryReader::new(500, 500, frames), &config)
            .unwrap_err()
            .to_string();
        assert!(err.contains("stride"), "unexpected error: {}", err);
    }

    #[test]
    fn test_unopenable_video_fails_before_writing() {
        let dir = scratch_dir("missing");
        let config = test_config(&dir, 1);

        assert!(run_extraction(&config).is_err());
        assert!(!config.output_path.exists());
    }

    #[test]
    fn test_invalid_config_fails_before_opening() {
        let dir = scratch_dir("invalid");
        let mut config = test_config(&dir, 1);
        config.stride = 0;

        let err = run_extraction(&config).unwrap_err().to_string();
        assert!(err.contains("stride"), "unexpected error: {}", err);
        assert!(!config.output_path.exists());
    }
}
