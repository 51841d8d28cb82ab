use crate::pipeline::types::{Action, Cell};

impl Action {
    /// Classifies the step from `from` to `to`. Anything other than a single
    /// cardinal step is `Unknown`.
    pub fn between(from: Cell, to: Cell) -> Self {
        let step = |a: u32, b: u32| b.checked_sub(a) == Some(1);

        if from.row == to.row && step(from.col, to.col) {
            Action::Right
        } else if from.row == to.row && step(to.col, from.col) {
            Action::Left
        } else if from.col == to.col && step(from.row, to.row) {
            Action::Down
        } else if from.col == to.col && step(to.row, from.row) {
            Action::Up
        } else {
            Action::Unknown
        }
    }
}

/// One action per consecutive pair of the deduplicated trajectory.
pub fn translate(trajectory: &[Cell]) -> Vec<Action> {
    trajectory
        .windows(2)
        .map(|pair| Action::between(pair[0], pair[1]))
        .collect()
}
