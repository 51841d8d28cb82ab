use crate::config::{GridShape, OutOfBounds};
use crate::pipeline::types::{Cell, Centroid};
use anyhow::{bail, Result};

/// Index of the cell of size `cell` containing `pos`, measured against the
/// boundaries `cell * k` so a position exactly on a boundary lands in the
/// upper cell.
fn axis_index(pos: f64, cell: f64) -> f64 {
    let mut idx = (pos / cell).floor();
    if cell * (idx + 1.0) <= pos {
        idx += 1.0;
    } else if idx > 0.0 && cell * idx > pos {
        idx -= 1.0;
    }
    idx
}

/// Maps pixel positions onto maze cells for one video.
///
/// Cell width and height are fractional (`W / cols`, `H / rows`), computed
/// once when the quantizer is built.
#[derive(Debug, Clone, Copy)]
pub struct GridQuantizer {
    grid: GridShape,
    cell_w: f64,
    cell_h: f64,
    out_of_bounds: OutOfBounds,
}

impl GridQuantizer {
    pub fn new(
        width: u32,
        height: u32,
        grid: GridShape,
        out_of_bounds: OutOfBounds,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            bail!("Cannot quantize frames of size {}x{}", width, height);
        }
        if grid.cols == 0 || grid.rows == 0 {
            bail!("Cannot quantize onto a {}x{} grid", grid.cols, grid.rows);
        }

        Ok(Self {
            grid,
            cell_w: width as f64 / grid.cols as f64,
            cell_h: height as f64 / grid.rows as f64,
            out_of_bounds,
        })
    }

    pub fn cell_size(&self) -> (f64, f64) {
        (self.cell_w, self.cell_h)
    }

    /// Returns the cell containing `c`, or `None` when the centroid is not
    /// finite or lies outside the frame under `OutOfBounds::Discard`.
    pub fn quantize(&self, c: Centroid) -> Option<Cell> {
        if !c.x.is_finite() || !c.y.is_finite() {
            return None;
        }

        let col = axis_index(c.x, self.cell_w);
        let row = axis_index(c.y, self.cell_h);

        let max_col = (self.grid.cols - 1) as f64;
        let max_row = (self.grid.rows - 1) as f64;
        let inside = (0.0..=max_col).contains(&col) && (0.0..=max_row).contains(&row);

        if inside {
            return Some(Cell::new(col as u32, row as u32));
        }

        match self.out_of_bounds {
            OutOfBounds::Clamp => Some(Cell::new(
                col.clamp(0.0, max_col) as u32,
                row.clamp(0.0, max_row) as u32,
            )),
            OutOfBounds::Discard => {
                tracing::debug!("Discarding out-of-frame centroid ({}, {})", c.x, c.y);
                None
            }
        }
    }
}
