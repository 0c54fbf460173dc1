//! CLI commands

pub mod scan;
pub mod start;
pub mod types;
pub mod utils;
