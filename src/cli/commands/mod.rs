//! CLI command implementations

pub mod check;
pub mod completions;
pub mod generate;
pub mod graph;
pub mod parts;
pub mod stats;
