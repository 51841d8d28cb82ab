use crate::config::HsvRange;
use crate::pipeline::types::Centroid;
use anyhow::Result;
use opencv::core::{self, Mat};
use opencv::imgproc;

/// Builds the binary mask of pixels whose HSV colour lies inside `range`.
pub fn marker_mask(frame: &Mat, range: &HsvRange) -> Result<Mat> {
    let mut hsv = Mat::default();
    imgproc::cvt_color(frame, &mut hsv, imgproc::COLOR_BGR2HSV, 0)?;

    let mut mask = Mat::default();
    core::in_range(
        &hsv,
        &range.lower.to_scalar(),
        &range.upper.to_scalar(),
        &mut mask,
    )?;

    Ok(mask)
}

/// Locates the marker as the global moment centroid of its colour mask.
///
/// Every matching pixel contributes, with no connectivity filtering.
/// Returns `None` when no pixel matches.
pub fn locate_marker(frame: &Mat, range: &HsvRange) -> Result<Option<Centroid>> {
    let mask = marker_mask(frame, range)?;
    let m = imgproc::moments(&mask, true)?;

    if m.m00 <= 0.0 {
        return Ok(None);
    }

    Ok(Some(Centroid {
        x: m.m10 / m.m00,
        y: m.m01 / m.m00,
    }))
}
