use crate::config::HsvRange;
use crate::pipeline::grid::GridQuantizer;
use crate::pipeline::localizer::locate_marker;
use crate::pipeline::types::Cell;
use crate::video::VideoReader;
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::num::NonZeroU32;

/// Output of the sampling pass over a video.
#[derive(Debug, Clone, Default)]
pub struct SampleReport {
    /// One cell per sampled frame with a detection, in frame order.
    pub raw: Vec<Cell>,
    pub frames_read: usize,
    pub sampled_frames: usize,
    /// Sampled frames that yielded a cell.
    pub detected_frames: usize,
}

/// Progress bar over the sampled frames, or a spinner when the frame count is unknown.
pub fn progress_bar(
    total_frames: Option<usize>,
    stride: NonZeroU32,
    visible: bool,
) -> Result<ProgressBar> {
    if !visible {
        return Ok(ProgressBar::hidden());
    }

    let pb = match total_frames {
        Some(total) => {
            let sampled = total.div_ceil(stride.get() as usize);
            let pb = ProgressBar::new(sampled as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec:.1.yellow} fps, {eta})")?
                    .progress_chars("#>-"),
            );
            pb
        }
        None => {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} [{elapsed_precise}] {pos} sampled frames ({per_sec:.1.yellow} fps)")?,
            );
            pb
        }
    };

    Ok(pb)
}

/// Reads `reader` to the end, localizing the marker on every `stride`-th frame.
///
/// A read error ends the pass. Frames without a detection, or whose
/// localization fails, contribute nothing to the trajectory.
pub fn sample_trajectory<R: VideoReader + ?Sized>(
    reader: &mut R,
    marker: &HsvRange,
    quantizer: &GridQuantizer,
    stride: NonZeroU32,
    pb: &ProgressBar,
) -> SampleReport {
    let stride = stride.get() as usize;
    let mut report = SampleReport::default();

    loop {
        let frame = match reader.next_frame() {
            Ok(frame) => frame,
            Err(e) => {
                tracing::debug!("End of stream after {} frames: {}", report.frames_read, e);
                break;
            }
        };

        let frame_id = report.frames_read;
        report.frames_read += 1;

        if frame_id % stride != 0 {
            continue;
        }
        report.sampled_frames += 1;
        pb.inc(1);

        let centroid = match locate_marker(&frame, marker) {
            Ok(Some(c)) => c,
            Ok(None) => continue,
            Err(e) => {
                tracing::warn!("Marker localization failed on frame {}: {}", frame_id, e);
                continue;
            }
        };

        if let Some(cell) = quantizer.quantize(centroid) {
            tracing::debug!(
                "frame {}: centroid=({:.1}, {:.1}) cell=({}, {})",
                frame_id,
                centroid.x,
                centroid.y,
                cell.col,
                cell.row
            );
            report.raw.push(cell);
            report.detected_frames += 1;
        }
    }

    pb.finish_and_clear();
    report
}
