//! Input/output helpers.
//!
//! - CSV ingest of the exchange-rate file (`ingest`)
//! - fit results and estimation requests on disk (`fits`)
//! - routing and serialization of tables, figures and series (`export`)

pub mod export;
pub mod fits;
pub mod ingest;

pub use export::*;
pub use fits::*;
pub use ingest::*;
