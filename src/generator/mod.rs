//! Task generation: configuration, per-task bundles, and batch dataset output.

/// Generator configuration.
pub mod config;
/// Bundle writing and parallel batch generation.
pub mod dataset;
/// Single-task generation.
pub mod task_gen;
