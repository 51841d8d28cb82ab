use serde::{Deserialize, Serialize};

/// A quantized (column, row) maze cell. Serialized as `[col, row]`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct Cell {
    pub col: u32,
    pub row: u32,
}

impl Cell {
    pub const fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }
}

impl From<[u32; 2]> for Cell {
    fn from([col, row]: [u32; 2]) -> Self {
        Self { col, row }
    }
}

impl From<Cell> for [u32; 2] {
    fn from(cell: Cell) -> Self {
        [cell.col, cell.row]
    }
}

/// Moment centroid of the marker mask, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centroid {
    pub x: f64,
    pub y: f64,
}

/// Step between two consecutive cells of a deduplicated trajectory.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    /// Not a single cardinal step (diagonal or multi-cell jump).
    Unknown,
}
