//! partforge: weapon part build composer
//!
//! Aggregates part stat modifiers into a weapon profile, links parts that
//! can share a build into a compatibility graph, and searches a candidate
//! pool for the first build meeting stat thresholds.

pub mod cli;
pub mod core;
pub mod yaml;
