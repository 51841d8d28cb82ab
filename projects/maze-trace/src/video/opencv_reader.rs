use super::VideoReader;
use anyhow::{anyhow, Context, Result};
use opencv::{
    prelude::*,
    videoio::{
        VideoCapture, CAP_ANY, CAP_PROP_FPS, CAP_PROP_FRAME_COUNT, CAP_PROP_FRAME_HEIGHT,
        CAP_PROP_FRAME_WIDTH,
    },
};
use std::path::Path;

/// Video file reader backed by `opencv::videoio`.
///
/// The capture is released when the reader is dropped.
pub struct OpencvReader {
    capture: VideoCapture,
    width: u32,
    height: u32,
    fps: Option<f64>,
    total_frames: Option<usize>,
}

impl OpencvReader {
    pub fn open(path: &Path) -> Result<Self> {
        let path_str = path
            .to_str()
            .ok_or_else(|| anyhow!("Video path is not valid UTF-8: {}", path.display()))?;

        let capture = VideoCapture::from_file(path_str, CAP_ANY)
            .with_context(|| format!("Failed to open video file: {}", path_str))?;
        if !capture.is_opened()? {
            return Err(anyhow!("Failed to open video file: {}", path_str));
        }

        let width = capture.get(CAP_PROP_FRAME_WIDTH)?;
        let height = capture.get(CAP_PROP_FRAME_HEIGHT)?;
        if width < 1.0 || height < 1.0 {
            return Err(anyhow!(
                "Video reports an empty frame size ({}x{}): {}",
                width,
                height,
                path_str
            ));
        }

        let fps = capture.get(CAP_PROP_FPS)?;
        let fps = if fps > 0.0 {
            Some(fps)
        } else {
            tracing::warn!("OpencvReader: no FPS in metadata for {}", path_str);
            None
        };

        // Some containers report 0 or a negative count; the sampler does not rely on it.
        let raw_count = capture.get(CAP_PROP_FRAME_COUNT)?;
        let total_frames = (raw_count >= 1.0).then_some(raw_count as usize);

        tracing::info!(
            "OpencvReader: opened {}, size={}x{}, fps={:?}, stream_frames={:?}",
            path_str,
            width,
            height,
            fps,
            total_frames
        );

        Ok(Self {
            capture,
            width: width as u32,
            height: height as u32,
            fps,
            total_frames,
        })
    }
}

impl VideoReader for OpencvReader {
    fn frame_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn frame_count(&self) -> Option<usize> {
        self.total_frames
    }

    fn source_fps(&self) -> Option<f64> {
        self.fps
    }

    fn next_frame(&mut self) -> Result<Mat> {
        let mut frame = Mat::default();
        let success = self.capture.read(&mut frame)?;
        if !success || frame.empty() {
            return Err(anyhow!("Failed to read frame"));
        }

        Ok(frame)
    }
}

impl Drop for OpencvReader {
    fn drop(&mut self) {
        if let Err(e) = self.capture.release() {
            tracing::warn!("OpencvReader: failed to release capture: {}", e);
        } else {
            tracing::debug!("OpencvReader: capture released");
        }
    }
}
