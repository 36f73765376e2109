//! 5-field cron expression parsing and matching.
//!
//! Supported syntax per field: `*`, `*/n` steps, and comma lists mixing
//! bare integers with `*/n` terms. Day-of-month and day-of-week are both
//! required to match (AND). That diverges from the POSIX rule of ORing
//! them when both fields are restricted; existing job lists depend on
//! the stricter behaviour, so it is preserved on purpose.

use std::collections::BTreeSet;

use cs_domain::error::MalformedExpression;

use crate::tz::LocalFields;

/// A parsed cron expression: the set of values each field matches.
///
/// Every set is non-empty; parsing fails otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronExpression {
    pub minute: BTreeSet<u32>,
    pub hour: BTreeSet<u32>,
    pub day_of_month: BTreeSet<u32>,
    pub month: BTreeSet<u32>,
    /// 0 = Sunday .. 6 = Saturday; the value 7 normalizes to 0 at parse
    /// time.
    pub day_of_week: BTreeSet<u32>,
}

impl CronExpression {
    /// Parse a 5-field expression (minute hour dom month dow).
    ///
    /// Fields are parsed independently; no cross-field semantics apply
    /// here.
    pub fn parse(expr: &str) -> Result<Self, MalformedExpression> {
        let fields: Vec<&str> = expr.split_whitespace().collect();
        if fields.len() != 5 {
            return Err(MalformedExpression::FieldCount {
                expr: expr.to_string(),
                actual: fields.len(),
            });
        }
        Ok(Self {
            minute: parse_field(fields[0], "minute", 0, 59, false)?,
            hour: parse_field(fields[1], "hour", 0, 23, false)?,
            day_of_month: parse_field(fields[2], "day-of-month", 1, 31, false)?,
            month: parse_field(fields[3], "month", 1, 12, false)?,
            day_of_week: parse_field(fields[4], "day-of-week", 0, 6, true)?,
        })
    }

    /// True when every field set contains the corresponding local value.
    pub fn matches(&self, f: &LocalFields) -> bool {
        self.minute.contains(&f.minute)
            && self.hour.contains(&f.hour)
            && self.day_of_month.contains(&f.day)
            && self.month.contains(&f.month)
            && self.day_of_week.contains(&f.weekday)
    }
}

/// Expand one field into its value set within `[min, max]`.
///
/// `dow_mode` normalizes the value 7 to 0 before range-checking.
fn parse_field(
    field: &str,
    name: &'static str,
    min: u32,
    max: u32,
    dow_mode: bool,
) -> Result<BTreeSet<u32>, MalformedExpression> {
    let field = field.trim();
    if field == "*" {
        return Ok((min..=max).collect());
    }

    let mut out = BTreeSet::new();
    for part in field.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        if let Some(step_s) = part.strip_prefix("*/") {
            let step: i64 = step_s.parse().map_err(|_| MalformedExpression::InvalidStep {
                field: name,
                step: part.to_string(),
            })?;
            if step <= 0 {
                return Err(MalformedExpression::InvalidStep {
                    field: name,
                    step: part.to_string(),
                });
            }
            out.extend((min..=max).step_by(step as usize));
        } else {
            let mut value: i64 = part.parse().map_err(|_| MalformedExpression::InvalidValue {
                field: name,
                token: part.to_string(),
            })?;
            if dow_mode && value == 7 {
                value = 0;
            }
            if value < i64::from(min) || value > i64::from(max) {
                return Err(MalformedExpression::OutOfRange {
                    field: name,
                    value,
                    min,
                    max,
                });
            }
            out.insert(value as u32);
        }
    }

    if out.is_empty() {
        return Err(MalformedExpression::EmptyField { field: name });
    }
    Ok(out)
}
