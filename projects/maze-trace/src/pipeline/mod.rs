// Maze trace pipeline: sample -> deduplicate -> translate

pub mod actions;
pub mod grid;
pub mod localizer;
pub mod orchestrator;
pub mod sampler;
pub mod trajectory;
pub mod types;
