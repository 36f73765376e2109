use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cs_cli::{jobs, report};
use cs_engine::tz::{self, Zone};

/// CronScope: lint agent cron-job definitions and preview their
/// upcoming trigger instants.
#[derive(Debug, Parser)]
#[command(name = "cronscope", version, about)]
struct Cli {
    /// Path to a JSON job list ({"jobs": [...]}).
    #[arg(long = "in", value_name = "FILE")]
    input: PathBuf,
    /// Timezone for simulation and display of trigger instants.
    #[arg(long, default_value = "UTC")]
    tz: String,
    /// How far ahead to simulate, in hours.
    #[arg(long, default_value_t = 24)]
    horizon_hours: i64,
    /// Override the reference instant (RFC 3339; naive values are read
    /// in --tz).
    #[arg(long)]
    now: Option<String>,
    /// Emit the report as JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let zone = tz::resolve(&cli.tz);
    let now = match cli.now.as_deref() {
        Some(s) => parse_now(s, zone)?,
        None => Utc::now(),
    };
    let horizon = Duration::try_hours(cli.horizon_hours).ok_or_else(|| {
        anyhow::anyhow!("--horizon-hours out of range: {}", cli.horizon_hours)
    })?;

    let list = jobs::load_jobs(&cli.input)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let summary = if cli.json {
        report::render_json(&mut out, &list.jobs, now, horizon, zone, &cli.tz)?
    } else {
        report::render_text(&mut out, &list.jobs, now, horizon, zone, &cli.tz)?
    };

    // Any ERROR finding fails the run so CI hooks can gate on it.
    if summary.error > 0 {
        std::process::exit(2);
    }
    Ok(())
}

/// Parse the --now override: RFC 3339 first, then a naive timestamp
/// interpreted in the display zone.
fn parse_now(s: &str, zone: Zone) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Ok(t.with_timezone(&Utc));
    }
    let naive: NaiveDateTime = s
        .parse()
        .with_context(|| format!("unparsable --now value: {s:?}"))?;
    zone.from_local(naive).ok_or_else(|| {
        anyhow::anyhow!("--now {s:?} falls in a DST gap in the target timezone")
    })
}

/// Compact stderr-only tracing so stdout stays clean for the report.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
