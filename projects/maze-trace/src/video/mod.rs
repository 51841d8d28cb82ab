pub mod memory_reader;
pub mod opencv_reader;

use anyhow::Result;
use opencv::core::Mat;

/// A forward-only source of BGR frames.
///
/// `next_frame` returning an error means the stream is exhausted; callers do
/// not retry.
pub trait VideoReader {
    /// Frame width and height in pixels.
    fn frame_size(&self) -> (u32, u32);
    /// Total number of frames, if the container reports one.
    fn frame_count(&self) -> Option<usize>;
    fn source_fps(&self) -> Option<f64>;
    fn next_frame(&mut self) -> Result<Mat>;
}
