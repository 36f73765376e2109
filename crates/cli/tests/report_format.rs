use chrono::{Duration, TimeZone, Utc};

use cs_cli::report::{render_json, render_text};
use cs_domain::job::JobDefinition;

fn jobs_from(value: serde_json::Value) -> Vec<JobDefinition> {
    serde_json::from_value(value).unwrap()
}

fn render_to_string(
    jobs: &[JobDefinition],
    tz_name: &str,
) -> (String, cs_cli::report::Summary) {
    let zone = cs_engine::resolve(tz_name);
    // 2026-02-01 07:59 JST.
    let now = Utc.with_ymd_and_hms(2026, 1, 31, 22, 59, 0).unwrap();
    let mut buf = Vec::new();
    let summary =
        render_text(&mut buf, jobs, now, Duration::hours(2), zone, tz_name).unwrap();
    (String::from_utf8(buf).unwrap(), summary)
}

#[test]
fn text_report_shows_header_findings_and_next_runs() {
    let jobs = jobs_from(serde_json::json!([
        {
            "id": "brief",
            "name": "Morning brief",
            "enabled": true,
            "schedule": {"kind": "cron", "expr": "0 8 * * *", "tz": "Asia/Tokyo"},
            "payload": {"kind": "agentTurn", "message": "summarize inbox", "timeoutSeconds": 120},
        },
    ]));
    let (text, summary) = render_to_string(&jobs, "Asia/Tokyo");

    assert!(text.starts_with("Now: 2026-02-01T07:59+09:00 (Asia/Tokyo)\n"));
    assert!(text.contains("Horizon: 2h\n"));
    assert!(text.contains("Job: Morning brief [brief] ENABLED\n"));
    assert!(text.contains("  Next: 2026-02-01T08:00+09:00\n"));
    assert_eq!(summary.error, 0);
    assert_eq!(summary.warn, 0);
}

#[test]
fn text_report_lists_findings_and_counts_them() {
    let jobs = jobs_from(serde_json::json!([
        {
            "id": "bad",
            "name": "Broken",
            "enabled": true,
            "schedule": {"kind": "cron", "expr": "61 * * * *"},
            "payload": {"kind": "agentTurn", "message": "hi"},
        },
    ]));
    let (text, summary) = render_to_string(&jobs, "UTC");

    assert!(text.contains("  ERROR: cron expr parse error:"));
    assert!(text.contains("  WARN: payload.timeoutSeconds not set"));
    assert!(text.contains("  ERROR: simulation failed:"));
    assert!(text.contains("Summary:\n  ERROR: 1\n  WARN : 1\n  INFO : 0\n"));
    assert_eq!(summary.error, 1);
    assert_eq!(summary.warn, 1);
    assert_eq!(summary.info, 0);
}

#[test]
fn disabled_jobs_are_linted_but_not_simulated() {
    let jobs = jobs_from(serde_json::json!([
        {
            "id": "off",
            "name": "Paused",
            "enabled": false,
            "schedule": {"kind": "every", "everyMs": 900_000},
            "payload": {"kind": "agentTurn", "message": "hi", "timeoutSeconds": 60},
        },
    ]));
    let (text, summary) = render_to_string(&jobs, "UTC");

    assert!(text.contains("Job: Paused [off] DISABLED\n"));
    assert!(text.contains("  INFO: job is disabled\n"));
    assert!(!text.contains("Next:"), "disabled jobs are not simulated");
    assert_eq!(summary.info, 1);
}

#[test]
fn long_previews_are_truncated_with_a_more_marker() {
    let jobs = jobs_from(serde_json::json!([
        {
            "id": "tick",
            "name": "Ticker",
            "enabled": true,
            "schedule": {"kind": "every", "everyMs": 300_000},
            "payload": {"kind": "agentTurn", "message": "hi", "timeoutSeconds": 60},
        },
    ]));
    // 2h horizon / 5min period = 24 ticks; preview shows 10.
    let (text, _) = render_to_string(&jobs, "UTC");
    assert!(text.contains(" (+14 more)\n"));
}

#[test]
fn empty_window_prints_a_placeholder() {
    let jobs = jobs_from(serde_json::json!([
        {
            "id": "later",
            "name": "Later",
            "enabled": true,
            // Outside the 2h window: next 23:00 JST is almost a day away.
            "schedule": {"kind": "cron", "expr": "0 23 * * *", "tz": "Asia/Tokyo"},
            "payload": {"kind": "agentTurn", "message": "hi", "timeoutSeconds": 60},
        },
    ]));
    let (text, _) = render_to_string(&jobs, "Asia/Tokyo");
    assert!(text.contains("  Next: (none within horizon)\n"));
}

#[test]
fn json_report_carries_findings_and_summary() {
    let jobs = jobs_from(serde_json::json!([
        {
            "id": "brief",
            "name": "Morning brief",
            "enabled": true,
            "schedule": {"kind": "cron", "expr": "0 8 * * *", "tz": "Asia/Tokyo"},
            "payload": {"kind": "agentTurn", "message": "summarize inbox"},
        },
    ]));
    let zone = cs_engine::resolve("Asia/Tokyo");
    let now = Utc.with_ymd_and_hms(2026, 1, 31, 22, 59, 0).unwrap();
    let mut buf = Vec::new();
    let summary =
        render_json(&mut buf, &jobs, now, Duration::hours(2), zone, "Asia/Tokyo").unwrap();
    assert_eq!(summary.warn, 1);

    let doc: serde_json::Value = serde_json::from_slice(&buf).unwrap();
    assert_eq!(doc["tz"], "Asia/Tokyo");
    assert_eq!(doc["horizonHours"], 2);
    assert_eq!(doc["jobs"][0]["id"], "brief");
    assert_eq!(doc["jobs"][0]["findings"][0]["severity"], "WARN");
    assert_eq!(doc["jobs"][0]["next"][0], "2026-01-31T23:00:00Z");
    assert_eq!(doc["summary"]["warn"], 1);
    assert_eq!(doc["summary"]["error"], 0);
}
