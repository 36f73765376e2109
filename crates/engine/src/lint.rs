//! Static lint rules for job definitions.
//!
//! A pure function of the raw definition: findings are advisory, come
//! back in rule order, and the linter never fails, whatever shape the
//! job is in. Cron parse errors are caught here and downgraded to ERROR
//! findings so linting a batch never aborts on one bad job.

use std::sync::LazyLock;

use regex::Regex;

use cs_domain::job::{
    Finding, JobDefinition, Severity, KNOWN_PAYLOAD_KINDS, KNOWN_SCHEDULE_KINDS,
};

use crate::cron::CronExpression;

// Footgun checks below are based on incidents we have actually hit with
// shell-wrapped agent jobs.
static ZSH_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bzsh\b").expect("static regex"));
static STATUS_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bstatus\b").expect("static regex"));
static PIPEFAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bset -euo pipefail\b").expect("static regex"));
static QUIET_HOURS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)quiet hours").expect("static regex"));

/// Seconds above which a timeout is worth a second look.
const LARGE_TIMEOUT_SECS: i64 = 1800;

/// Milliseconds below which an interval counts as very frequent.
const FREQUENT_INTERVAL_MS: i64 = 60_000;

/// Lint one job definition.
pub fn lint_job(job: &JobDefinition) -> Vec<Finding> {
    let jid = job.display_id();
    let name = job.display_name();

    let mut findings: Vec<Finding> = Vec::new();
    let mut push = |severity: Severity, message: String| {
        findings.push(Finding::new(severity, jid, name, message));
    };

    // 1. Schedule kind. An unknown kind suppresses the schedule-shape
    //    checks further down, but payload checks still run.
    let kind = job.schedule.kind.as_deref();
    let kind_known = matches!(kind, Some(k) if KNOWN_SCHEDULE_KINDS.contains(&k));
    if !kind_known {
        push(
            Severity::Error,
            format!("unknown schedule.kind={:?}", kind.unwrap_or("(missing)")),
        );
    }

    // 2. Disabled jobs are worth a note, nothing more.
    if !job.enabled {
        push(Severity::Info, "job is disabled".to_string());
    }

    // 3. Payload kind.
    let p_kind = job.payload.kind.as_deref();
    if !matches!(p_kind, Some(k) if KNOWN_PAYLOAD_KINDS.contains(&k)) {
        push(
            Severity::Warn,
            format!("unknown payload.kind={:?}", p_kind.unwrap_or("(missing)")),
        );
    }

    // 4-7. Message-body footguns.
    let msg = job.payload.message_text();
    if ZSH_WORD.is_match(msg) {
        push(
            Severity::Warn,
            "message references zsh; prefer /bin/bash -lc for cron jobs".to_string(),
        );
    }
    if STATUS_WORD.is_match(msg) && msg.contains("read-only variable: status") {
        push(
            Severity::Info,
            "mentions zsh status variable footgun".to_string(),
        );
    }
    if PIPEFAIL.is_match(msg) && !msg.contains("bash") {
        push(
            Severity::Warn,
            "uses 'set -euo pipefail' but doesn't specify bash; zsh behaves differently"
                .to_string(),
        );
    }
    if QUIET_HOURS.is_match(msg) && !msg.contains("TZ=") {
        push(
            Severity::Warn,
            "mentions quiet hours but does not specify TZ=...; time drift risk".to_string(),
        );
    }

    // 8. Timeouts.
    match &job.payload.timeout_seconds {
        None => push(
            Severity::Warn,
            "payload.timeoutSeconds not set (risk: hung job)".to_string(),
        ),
        Some(v) => match v.as_i64() {
            Some(t) if t <= 0 => push(Severity::Warn, "timeoutSeconds <= 0".to_string()),
            Some(t) if t > LARGE_TIMEOUT_SECS => {
                push(Severity::Info, format!("timeoutSeconds is large ({t})"))
            }
            Some(_) => {}
            None => push(Severity::Warn, format!("timeoutSeconds not an int: {v}")),
        },
    }

    // 9-10. Schedule shape, only when the kind itself made sense.
    if kind_known {
        match kind {
            Some("every") => match job.schedule.every_ms {
                None => push(Severity::Error, "everyMs missing".to_string()),
                Some(ms) if ms < FREQUENT_INTERVAL_MS => push(
                    Severity::Warn,
                    format!("interval is very frequent ({ms}ms)"),
                ),
                Some(_) => {}
            },
            Some("cron") => {
                match job.schedule.expr.as_deref().filter(|e| !e.is_empty()) {
                    None => push(Severity::Error, "cron expr missing".to_string()),
                    Some(expr) => {
                        if let Err(e) = CronExpression::parse(expr) {
                            push(Severity::Error, format!("cron expr parse error: {e}"));
                        }
                    }
                }
            }
            _ => {}
        }
    }

    findings
}
