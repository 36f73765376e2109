//! CronScope schedule engine: cron parsing, trigger simulation, and job
//! linting.
//!
//! Everything in this crate is pure and single-threaded. Temporal
//! references (`now`, horizon, timezone) are explicit inputs, never
//! ambient clock reads, so results are reproducible and independent
//! jobs can be simulated or linted concurrently by the caller.
//!
//! Split into submodules:
//! - [`cron`] - 5-field expression parsing and matching
//! - [`tz`] - timezone resolution and wall-clock projection
//! - [`simulate`] - forward enumeration of trigger instants
//! - [`lint`] - static lint rules over job definitions

pub mod cron;
pub mod lint;
pub mod simulate;
pub mod tz;

pub use cron::CronExpression;
pub use lint::lint_job;
pub use simulate::{simulate, MAX_TRIGGERS};
pub use tz::{cron_weekday, resolve, LocalFields, Zone};
