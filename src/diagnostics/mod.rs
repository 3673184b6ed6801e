//! Specification tests and descriptive statistics for the return series.
//!
//! - closed-form tests (AR(1), Jarque–Bera, ARCH-LM, Ljung–Box, ADF) (`hypothesis`)
//! - per-dataset summaries and their tables (`summary`)

pub mod hypothesis;
pub mod summary;

pub use hypothesis::*;
pub use summary::*;
