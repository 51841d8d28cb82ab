#![allow(dead_code)]
use super::VideoReader;
use anyhow::{anyhow, Result};
use opencv::core::Mat;
use std::collections::VecDeque;

/// Serves a fixed list of frames from memory, then reports end of stream.
pub struct MemoryReader {
    frames: VecDeque<Mat>,
    width: u32,
    height: u32,
    total_frames: usize,
}

impl MemoryReader {
    pub fn new(width: u32, height: u32, frames: Vec<Mat>) -> Self {
        let total_frames = frames.len();
        Self {
            frames: frames.into(),
            width,
            height,
            total_frames,
        }
    }
}

impl VideoReader for MemoryReader {
    fn frame_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn frame_count(&self) -> Option<usize> {
        Some(self.total_frames)
    }

    fn source_fps(&self) -> Option<f64> {
        None
    }

    fn next_frame(&mut self) -> Result<Mat> {
        self.frames
            .pop_front()
            .ok_or_else(|| anyhow!("End of stream"))
    }
}
