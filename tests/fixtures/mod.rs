//! Test fixtures for bikeway.
//!
//! Provides sample route traces:
//! - Hand-drawn shapes with known corners
//! - A longer generated trace for sequential/parallel comparisons

pub mod sample_paths;

pub use sample_paths::*;
