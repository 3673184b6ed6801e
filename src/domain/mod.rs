//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - dataset identifiers and their sample periods (`DatasetId`)
//! - dated observations and series (`Observation`, `Series`)
//! - output routing categories (`OutputCategory`)

pub mod types;

pub use types::*;
