//! Report rendering: the human-readable text report and its JSON form.
//!
//! Lint findings and simulated trigger instants come straight from the
//! engine; this module only formats them. Disabled jobs are linted but
//! never simulated.

use std::io::Write;

use chrono::{DateTime, Duration, Local, SecondsFormat, Utc};
use serde::Serialize;

use cs_domain::job::{Finding, JobDefinition, Severity};
use cs_engine::{lint_job, simulate, Zone};

/// How many trigger instants the text preview shows per job.
const PREVIEW_LIMIT: usize = 10;

/// Severity tallies across all findings in one run.
#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct Summary {
    pub error: usize,
    pub warn: usize,
    pub info: usize,
}

impl Summary {
    fn count(&mut self, f: &Finding) {
        match f.severity {
            Severity::Error => self.error += 1,
            Severity::Warn => self.warn += 1,
            Severity::Info => self.info += 1,
        }
    }
}

/// Render the text report and return the severity tallies.
pub fn render_text<W: Write>(
    out: &mut W,
    jobs: &[JobDefinition],
    now: DateTime<Utc>,
    horizon: Duration,
    zone: Zone,
    tz_name: &str,
) -> anyhow::Result<Summary> {
    writeln!(out, "Now: {} ({tz_name})", fmt_instant(zone, now))?;
    writeln!(out, "Horizon: {}h", horizon.num_hours())?;
    writeln!(out, "-")?;

    let mut summary = Summary::default();
    for job in jobs {
        let findings = lint_job(job);
        writeln!(
            out,
            "Job: {} [{}] {}",
            job.display_name(),
            job.display_id(),
            if job.enabled { "ENABLED" } else { "DISABLED" },
        )?;
        for f in &findings {
            summary.count(f);
            writeln!(out, "  {}: {}", f.severity, f.message)?;
        }

        if job.enabled {
            match job
                .schedule
                .resolve()
                .and_then(|s| simulate(&s, now, horizon, zone))
            {
                Ok(times) if !times.is_empty() => {
                    let preview: Vec<String> = times
                        .iter()
                        .take(PREVIEW_LIMIT)
                        .map(|t| fmt_instant(zone, *t))
                        .collect();
                    let more = if times.len() > PREVIEW_LIMIT {
                        format!(" (+{} more)", times.len() - PREVIEW_LIMIT)
                    } else {
                        String::new()
                    };
                    writeln!(out, "  Next: {}{}", preview.join(", "), more)?;
                }
                Ok(_) => writeln!(out, "  Next: (none within horizon)")?,
                // Shape errors double as lint ERRORs, so this line is
                // informational; it does not change the exit code.
                Err(e) => writeln!(out, "  ERROR: simulation failed: {e}")?,
            }
        }
        writeln!(out)?;
    }

    writeln!(out, "Summary:")?;
    writeln!(out, "  ERROR: {}", summary.error)?;
    writeln!(out, "  WARN : {}", summary.warn)?;
    writeln!(out, "  INFO : {}", summary.info)?;
    Ok(summary)
}

/// Render the same report as a JSON document.
pub fn render_json<W: Write>(
    out: &mut W,
    jobs: &[JobDefinition],
    now: DateTime<Utc>,
    horizon: Duration,
    zone: Zone,
    tz_name: &str,
) -> anyhow::Result<Summary> {
    let mut summary = Summary::default();
    let mut jobs_out = Vec::with_capacity(jobs.len());

    for job in jobs {
        let findings = lint_job(job);
        for f in &findings {
            summary.count(f);
        }

        let (next, sim_error) = if job.enabled {
            match job
                .schedule
                .resolve()
                .and_then(|s| simulate(&s, now, horizon, zone))
            {
                Ok(times) => (
                    times
                        .iter()
                        .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
                        .collect::<Vec<_>>(),
                    None,
                ),
                Err(e) => (Vec::new(), Some(e.to_string())),
            }
        } else {
            (Vec::new(), None)
        };

        jobs_out.push(serde_json::json!({
            "id": job.display_id(),
            "name": job.display_name(),
            "enabled": job.enabled,
            "findings": findings,
            "next": next,
            "simulationError": sim_error,
        }));
    }

    let doc = serde_json::json!({
        "now": now.to_rfc3339_opts(SecondsFormat::Secs, true),
        "tz": tz_name,
        "horizonHours": horizon.num_hours(),
        "jobs": jobs_out,
        "summary": summary,
    });
    serde_json::to_writer_pretty(&mut *out, &doc)?;
    writeln!(out)?;
    Ok(summary)
}

/// One instant formatted in the display zone, minute precision.
fn fmt_instant(zone: Zone, t: DateTime<Utc>) -> String {
    match zone {
        Zone::Named(tz) => t.with_timezone(&tz).format("%Y-%m-%dT%H:%M%:z").to_string(),
        Zone::HostLocal => t.with_timezone(&Local).format("%Y-%m-%dT%H:%M%:z").to_string(),
    }
}
