//! Command-line front end for the CronScope engine: job-list loading
//! and report rendering. The binary lives in `main.rs`; everything here
//! is plain functions so the output formats stay testable.

pub mod jobs;
pub mod report;
