//! Job-list data model: jobs, schedules, payloads, and lint findings.
//!
//! Wire shapes are deliberately loose. The linter has to inspect
//! half-formed definitions (unknown kinds, missing parameters,
//! non-integer timeouts), so [`ScheduleSpec`] and [`PayloadSpec`] keep
//! their raw representation and validation happens in
//! [`ScheduleSpec::resolve`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// Schedule kinds the engine understands on the wire.
pub const KNOWN_SCHEDULE_KINDS: [&str; 3] = ["at", "every", "cron"];

/// Payload kinds the runtime understands; anything else is flagged by lint.
pub const KNOWN_PAYLOAD_KINDS: [&str; 2] = ["agentTurn", "systemEvent"];

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Job list
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Top-level job-list document: `{"jobs": [...]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobList {
    pub jobs: Vec<JobDefinition>,
}

fn default_true() -> bool {
    true
}

/// One job definition as loaded from the job-list document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobDefinition {
    #[serde(default)]
    pub id: Option<String>,
    /// Legacy alias for `id` seen in older job lists.
    #[serde(default, rename = "jobId")]
    pub job_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub schedule: ScheduleSpec,
    #[serde(default)]
    pub payload: PayloadSpec,
}

impl JobDefinition {
    /// Job id for display; falls back to the legacy `jobId` key, then `"?"`.
    pub fn display_id(&self) -> &str {
        self.id
            .as_deref()
            .or(self.job_id.as_deref())
            .unwrap_or("?")
    }

    /// Job name for display.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("(unnamed)")
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Schedules
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Wire-level schedule record.
///
/// All fields optional: unknown kinds and missing parameters must be
/// representable so the linter can report them instead of the loader
/// rejecting the whole document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSpec {
    #[serde(default)]
    pub kind: Option<String>,
    /// Epoch milliseconds of the single trigger (`"at"` kind).
    #[serde(default)]
    pub at_ms: Option<i64>,
    /// Tick period in milliseconds (`"every"` kind).
    #[serde(default)]
    pub every_ms: Option<i64>,
    /// Epoch milliseconds the periodic progression counts from.
    #[serde(default)]
    pub anchor_ms: Option<i64>,
    /// 5-field cron expression (`"cron"` kind).
    #[serde(default)]
    pub expr: Option<String>,
    /// IANA timezone name the cron expression is evaluated in.
    #[serde(default)]
    pub tz: Option<String>,
}

impl ScheduleSpec {
    /// Validate the wire record into a typed [`Schedule`].
    ///
    /// Only the shape is checked here; cron expressions are parsed at
    /// simulation time so that parse errors stay attributable to the
    /// caller that asked for them.
    pub fn resolve(&self) -> Result<Schedule, ScheduleError> {
        match self.kind.as_deref() {
            Some("at") => {
                let ms = self
                    .at_ms
                    .ok_or(ScheduleError::MissingParameter { field: "atMs" })?;
                Ok(Schedule::At {
                    at: utc_from_ms(ms, "atMs")?,
                })
            }
            Some("every") => {
                let period_ms = self
                    .every_ms
                    .ok_or(ScheduleError::MissingParameter { field: "everyMs" })?;
                let anchor = match self.anchor_ms {
                    Some(ms) => Some(utc_from_ms(ms, "anchorMs")?),
                    None => None,
                };
                Ok(Schedule::Every { period_ms, anchor })
            }
            Some("cron") => {
                let expr = self
                    .expr
                    .clone()
                    .filter(|e| !e.is_empty())
                    .ok_or(ScheduleError::MissingParameter { field: "cron expr" })?;
                Ok(Schedule::Cron {
                    expr,
                    tz: self.tz.clone(),
                })
            }
            other => Err(ScheduleError::UnknownKind {
                kind: other.unwrap_or_default().to_string(),
            }),
        }
    }
}

fn utc_from_ms(ms: i64, field: &'static str) -> Result<DateTime<Utc>, ScheduleError> {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .ok_or(ScheduleError::InvalidTimestamp { field, ms })
}

/// Validated schedule, one of the three supported kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schedule {
    /// Single fixed trigger instant.
    At { at: DateTime<Utc> },
    /// Periodic ticks counted from an anchor; an absent anchor means the
    /// resolution-time "now" anchors the progression.
    Every {
        period_ms: i64,
        anchor: Option<DateTime<Utc>>,
    },
    /// 5-field cron expression evaluated in a named timezone.
    Cron { expr: String, tz: Option<String> },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Payloads
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Wire-level payload record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadSpec {
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Legacy alias for `message`.
    #[serde(default)]
    pub text: Option<String>,
    /// Kept as raw JSON so the linter can flag non-integer values.
    #[serde(default)]
    pub timeout_seconds: Option<serde_json::Value>,
}

impl PayloadSpec {
    /// Message body, falling back to the legacy `text` key.
    pub fn message_text(&self) -> &str {
        self.message
            .as_deref()
            .or(self.text.as_deref())
            .unwrap_or("")
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Findings
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Severity of a lint finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Error,
    Warn,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warn => write!(f, "WARN"),
            Severity::Info => write!(f, "INFO"),
        }
    }
}

/// One lint observation about a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub severity: Severity,
    pub job_id: String,
    pub job_name: String,
    pub message: String,
}

impl Finding {
    pub fn new(
        severity: Severity,
        job_id: impl Into<String>,
        job_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            job_id: job_id.into(),
            job_name: job_name.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_defaults_from_minimal_json() {
        let job: JobDefinition = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(job.enabled, "enabled defaults to true");
        assert_eq!(job.display_id(), "?");
        assert_eq!(job.display_name(), "(unnamed)");
        assert!(job.schedule.kind.is_none());
    }

    #[test]
    fn job_id_falls_back_to_legacy_key() {
        let job: JobDefinition =
            serde_json::from_value(serde_json::json!({"jobId": "legacy-7"})).unwrap();
        assert_eq!(job.display_id(), "legacy-7");

        let job: JobDefinition =
            serde_json::from_value(serde_json::json!({"id": "a", "jobId": "b"})).unwrap();
        assert_eq!(job.display_id(), "a", "id wins over jobId");
    }

    #[test]
    fn payload_message_falls_back_to_text() {
        let p: PayloadSpec =
            serde_json::from_value(serde_json::json!({"text": "hello"})).unwrap();
        assert_eq!(p.message_text(), "hello");

        let p: PayloadSpec =
            serde_json::from_value(serde_json::json!({"message": "m", "text": "t"})).unwrap();
        assert_eq!(p.message_text(), "m");
    }

    #[test]
    fn schedule_spec_parses_wire_field_names() {
        let spec: ScheduleSpec = serde_json::from_value(serde_json::json!({
            "kind": "every",
            "everyMs": 900_000,
            "anchorMs": 0,
        }))
        .unwrap();
        assert_eq!(spec.every_ms, Some(900_000));
        assert_eq!(spec.anchor_ms, Some(0));
    }

    #[test]
    fn resolve_at_schedule() {
        let spec: ScheduleSpec =
            serde_json::from_value(serde_json::json!({"kind": "at", "atMs": 1_000})).unwrap();
        match spec.resolve().unwrap() {
            Schedule::At { at } => assert_eq!(at.timestamp_millis(), 1_000),
            other => panic!("expected At, got {other:?}"),
        }
    }

    #[test]
    fn resolve_unknown_kind_is_an_error() {
        let spec: ScheduleSpec =
            serde_json::from_value(serde_json::json!({"kind": "hourly"})).unwrap();
        assert!(matches!(
            spec.resolve(),
            Err(ScheduleError::UnknownKind { kind }) if kind == "hourly"
        ));
    }

    #[test]
    fn resolve_missing_kind_is_an_error() {
        let spec = ScheduleSpec::default();
        assert!(matches!(
            spec.resolve(),
            Err(ScheduleError::UnknownKind { kind }) if kind.is_empty()
        ));
    }

    #[test]
    fn resolve_every_without_period_is_an_error() {
        let spec: ScheduleSpec =
            serde_json::from_value(serde_json::json!({"kind": "every"})).unwrap();
        assert!(matches!(
            spec.resolve(),
            Err(ScheduleError::MissingParameter { field: "everyMs" })
        ));
    }

    #[test]
    fn resolve_cron_with_empty_expr_is_an_error() {
        let spec: ScheduleSpec =
            serde_json::from_value(serde_json::json!({"kind": "cron", "expr": ""})).unwrap();
        assert!(matches!(
            spec.resolve(),
            Err(ScheduleError::MissingParameter { field: "cron expr" })
        ));
    }

    #[test]
    fn severity_displays_uppercase() {
        assert_eq!(Severity::Error.to_string(), "ERROR");
        assert_eq!(Severity::Warn.to_string(), "WARN");
        assert_eq!(Severity::Info.to_string(), "INFO");
    }

    #[test]
    fn finding_serializes_camel_case() {
        let f = Finding::new(Severity::Warn, "j1", "job one", "msg");
        let v = serde_json::to_value(&f).unwrap();
        assert_eq!(v["severity"], "WARN");
        assert_eq!(v["jobId"], "j1");
        assert_eq!(v["jobName"], "job one");
    }
}
