//! staffcheck CLI library.
//!
//! Command implementations, histogram rendering and logging setup for the
//! `staffcheck` binary.

pub mod chart;
pub mod commands;
pub mod logging;
