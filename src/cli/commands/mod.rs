//! CLI command implementations

pub mod utils;

pub mod breakdown;
pub mod completions;
pub mod config;
pub mod dashboard;
pub mod export;
pub mod filters;
pub mod interactive;
pub mod summary;
