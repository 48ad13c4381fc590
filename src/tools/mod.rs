//! The tools module provides helper functions for huffzip.
//!
//! The tools are:
//! - cli: Command line interface for huffzip.
//! - freq_count: Frequency count of a message.
//! - report: Table and size reports for the user.
//!
pub mod cli;
pub mod freq_count;
pub mod report;
