//! `fx-vol-report` library crate.
//!
//! The binary (`fxvol`) is a thin wrapper around this library so that:
//!
//! - the formatting and export pipeline is testable without spawning processes
//! - an alternative `Estimator` can be plugged in from outside the binary

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
