//! Shared value types for the CronScope schedule engine: job-list
//! records, validated schedules, lint findings, and the error taxonomy.

pub mod error;
pub mod job;

pub use error::{MalformedExpression, ScheduleError};
pub use job::{
    Finding, JobDefinition, JobList, PayloadSpec, Schedule, ScheduleSpec, Severity,
    KNOWN_PAYLOAD_KINDS, KNOWN_SCHEDULE_KINDS,
};
