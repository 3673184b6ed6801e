//! Dataset preparation: named sample periods over the ingested rate series.

pub mod datasets;

pub use datasets::*;
