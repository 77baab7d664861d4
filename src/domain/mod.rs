//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - periodicities and hour-resolution timestamps (`Periodicity`, `Timestamp`)
//! - normalised input columns and run settings (`TaggedColumn`, `RunConfig`)
//! - engine input/output (`Series`, `Slot`, `RoughenedBundle`)

pub mod series;
pub mod types;

pub use series::*;
pub use types::*;
