use chrono::{DateTime, Local, Utc};
use chrono_tz::Tz;
use std::fmt::Debug;
use tracing::debug;

/// Source of "now" for the local time shown next to a snapshot.
pub trait Clock: Send + Sync + Debug {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Wall-clock time and date at the searched city, formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocalTime {
    pub time: String,
    pub date: String,
}

const TIME_FORMAT: &str = "%I:%M %p";
const FALLBACK_TIME_FORMAT: &str = "%-I:%M:%S %p";
const DATE_FORMAT: &str = "%A, %B %-d, %Y";

impl LocalTime {
    /// Format `now` in the IANA zone `timezone` (UTC when absent or blank).
    ///
    /// An unrecognised zone name falls back to the system's local zone.
    pub fn at(now: DateTime<Utc>, timezone: Option<&str>) -> Self {
        let name = timezone.map(str::trim).filter(|tz| !tz.is_empty()).unwrap_or("UTC");

        match name.parse::<Tz>() {
            Ok(tz) => {
                let local = now.with_timezone(&tz);
                Self {
                    time: local.format(TIME_FORMAT).to_string(),
                    date: local.format(DATE_FORMAT).to_string(),
                }
            }
            Err(_) => {
                debug!(timezone = name, "Unrecognised timezone, using system local time");
                let local = now.with_timezone(&Local);
                Self {
                    time: local.format(FALLBACK_TIME_FORMAT).to_string(),
                    date: local.format(DATE_FORMAT).to_string(),
                }
            }
        }
    }
}
