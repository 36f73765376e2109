//! Forward enumeration of trigger instants for the three schedule kinds.
//!
//! The cron walk advances one simulated minute at a time and re-projects
//! the instant into the schedule's timezone on every step. That keeps
//! the walk correct across DST transitions at the cost of a per-minute
//! loop, which is fine for horizons of hours or days; `MAX_TRIGGERS`
//! bounds the output for unbounded periodic schedules.

use chrono::{DateTime, Duration, Timelike, Utc};

use cs_domain::error::ScheduleError;
use cs_domain::job::Schedule;

use crate::cron::CronExpression;
use crate::tz::{self, Zone};

/// Hard cap on emitted instants per simulation.
pub const MAX_TRIGGERS: usize = 200;

/// Enumerate future trigger instants within the horizon, in increasing
/// order.
///
/// Periodic and cron triggers are strictly after `now`; an `At` trigger
/// equal to `now` still counts. `default_zone` applies to cron schedules
/// that carry no timezone of their own. Output is exactly reproducible
/// for fixed inputs.
pub fn simulate(
    schedule: &Schedule,
    now: DateTime<Utc>,
    horizon: Duration,
    default_zone: Zone,
) -> Result<Vec<DateTime<Utc>>, ScheduleError> {
    let end = now
        .checked_add_signed(horizon)
        .unwrap_or(DateTime::<Utc>::MAX_UTC);

    match schedule {
        Schedule::At { at } => {
            if now <= *at && *at <= end {
                Ok(vec![*at])
            } else {
                Ok(Vec::new())
            }
        }
        Schedule::Every { period_ms, anchor } => {
            simulate_every(*period_ms, *anchor, now, end)
        }
        Schedule::Cron { expr, tz: tz_name } => {
            let cron = CronExpression::parse(expr)?;
            let zone = match tz_name.as_deref() {
                Some(name) => tz::resolve(name),
                None => default_zone,
            };
            Ok(walk_cron(&cron, zone, now, end))
        }
    }
}

fn simulate_every(
    period_ms: i64,
    anchor: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<DateTime<Utc>>, ScheduleError> {
    if period_ms <= 0 {
        return Err(ScheduleError::NonPositivePeriod { period_ms });
    }
    let anchor = anchor.unwrap_or(now);
    let period = Duration::milliseconds(period_ms);

    // Smallest k >= 1 with anchor + k*period strictly after now. A
    // future anchor still starts at k = 1: the anchor itself is not a
    // tick.
    let elapsed_ms = (now - anchor).num_milliseconds();
    let k = (elapsed_ms.div_euclid(period_ms) + 1).max(1);

    let first_ms = match period_ms.checked_mul(k) {
        Some(v) => v,
        None => return Ok(Vec::new()),
    };
    let mut t = match anchor.checked_add_signed(Duration::milliseconds(first_ms)) {
        Some(t) => t,
        None => return Ok(Vec::new()),
    };

    let mut out = Vec::new();
    while t <= end && out.len() < MAX_TRIGGERS {
        out.push(t);
        t = match t.checked_add_signed(period) {
            Some(next) => next,
            None => break,
        };
    }
    if out.len() == MAX_TRIGGERS {
        tracing::debug!(cap = MAX_TRIGGERS, "interval simulation hit the trigger cap");
    }
    Ok(out)
}

/// Minute-walk from the first whole minute after `now` through `end`.
fn walk_cron(
    cron: &CronExpression,
    zone: Zone,
    now: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<DateTime<Utc>> {
    let mut t = truncate_to_minute(now) + Duration::minutes(1);
    let mut out = Vec::new();
    while t <= end && out.len() < MAX_TRIGGERS {
        if cron.matches(&zone.project(t)) {
            out.push(t);
        }
        t = match t.checked_add_signed(Duration::minutes(1)) {
            Some(next) => next,
            None => break,
        };
    }
    if out.len() == MAX_TRIGGERS {
        tracing::debug!(cap = MAX_TRIGGERS, "cron walk hit the trigger cap");
    }
    out
}

/// Drop seconds and sub-second precision.
fn truncate_to_minute(t: DateTime<Utc>) -> DateTime<Utc> {
    t.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(t)
}
