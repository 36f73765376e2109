//! Timezone resolution and wall-clock projection.

use chrono::{
    DateTime, Datelike, Local, LocalResult, NaiveDateTime, TimeZone, Timelike, Utc, Weekday,
};

/// Local wall-clock fields of one instant, as cron matching sees them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalFields {
    pub minute: u32,
    pub hour: u32,
    pub day: u32,
    pub month: u32,
    /// 0 = Sunday .. 6 = Saturday (cron convention).
    pub weekday: u32,
}

/// A resolved timezone: a named IANA zone, or the host's local rules
/// when the name is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Named(chrono_tz::Tz),
    HostLocal,
}

/// Resolve a timezone name, falling back to the host-local rules.
///
/// Simulation must always proceed: an unknown zone degrades accuracy,
/// it does not fail.
pub fn resolve(name: &str) -> Zone {
    match name.parse::<chrono_tz::Tz>() {
        Ok(tz) => Zone::Named(tz),
        Err(_) => {
            tracing::debug!(name, "unknown timezone, using host-local rules");
            Zone::HostLocal
        }
    }
}

impl Zone {
    /// Project a UTC instant to local wall-clock fields, honoring DST.
    pub fn project(&self, t: DateTime<Utc>) -> LocalFields {
        match self {
            Zone::Named(tz) => fields_of(&t.with_timezone(tz)),
            Zone::HostLocal => fields_of(&t.with_timezone(&Local)),
        }
    }

    /// Map a local wall-clock time back to UTC.
    ///
    /// Picks the earliest instant on fall-back ambiguity; returns `None`
    /// for times inside a spring-forward gap.
    pub fn from_local(&self, local: NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            Zone::Named(tz) => collapse(tz.from_local_datetime(&local)),
            Zone::HostLocal => collapse(Local.from_local_datetime(&local)),
        }
    }
}

fn fields_of<Tz: TimeZone>(dt: &DateTime<Tz>) -> LocalFields {
    LocalFields {
        minute: dt.minute(),
        hour: dt.hour(),
        day: dt.day(),
        month: dt.month(),
        weekday: cron_weekday(dt.weekday()),
    }
}

fn collapse<Tz: TimeZone>(r: LocalResult<DateTime<Tz>>) -> Option<DateTime<Utc>> {
    match r {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => None,
    }
}

/// Remap chrono's Monday-first weekday to cron's Sunday=0 convention.
pub fn cron_weekday(w: Weekday) -> u32 {
    w.num_days_from_sunday()
}
