//! Input/output helpers.
//!
//! - input directory scan (`discover`)
//! - tagged CSV ingest + normalisation (`ingest`)
//! - roughened table and manifest exports (`export`)

pub mod discover;
pub mod export;
pub mod ingest;

pub use discover::*;
pub use export::*;
pub use ingest::*;
