//! `roughen` library crate.
//!
//! Turns tagged time-series CSV files into per-column tables holding the same
//! values at hourly, daily, monthly and yearly resolution.
//!
//! The binary (`roughen`) is a thin wrapper around this library so that:
//!
//! - the roughening engine is testable without touching the filesystem
//! - the batch pipeline is testable without spawning processes

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod report;
pub mod roughen;

pub use crate::domain::{Periodicity, RoughenedBundle, Series, Timestamp};
pub use crate::roughen::roughen;
