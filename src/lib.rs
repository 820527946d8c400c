//! bikeway route catalog core
//!
//! Corner filtering for submitted bike routes, plus the ingestion workflow
//! that stores the filtered points through a pluggable route store.

pub mod geometry;
pub mod path;
pub mod corner;
pub mod model;
pub mod traits;
pub mod memory;
pub mod http_store;
pub mod ingest;
