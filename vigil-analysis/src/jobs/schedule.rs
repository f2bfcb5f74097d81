//! Schedule expressions: `hourly`, `daily`, `weekly`, `every <N>(m|h|d)`.

use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};

/// A parsed schedule interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    interval: Duration,
}

impl Schedule {
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Overdue once the last run is older than `grace_factor` intervals.
    /// A grace window too large to represent is never exceeded.
    pub fn is_overdue(&self, last_run: DateTime<Utc>, now: DateTime<Utc>, grace_factor: u32) -> bool {
        let Some(grace) = i32::try_from(grace_factor)
            .ok()
            .and_then(|factor| self.interval.checked_mul(factor))
        else {
            return false;
        };
        now.signed_duration_since(last_run) > grace
    }
}

impl FromStr for Schedule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        let interval = match s.as_str() {
            "hourly" => Duration::hours(1),
            "daily" => Duration::days(1),
            "weekly" => Duration::weeks(1),
            other => {
                let spec = other
                    .strip_prefix("every")
                    .map(str::trim)
                    .ok_or_else(|| format!("unknown schedule `{s}`"))?;
                let Some((unit_at, _)) = spec.char_indices().last() else {
                    return Err(format!("missing interval in `{s}`"));
                };
                let (digits, unit) = spec.split_at(unit_at);
                let n: i64 = digits
                    .trim()
                    .parse()
                    .map_err(|_| format!("bad interval in `{s}`"))?;
                if n <= 0 {
                    return Err(format!("interval must be positive in `{s}`"));
                }
                let interval = match unit {
                    "m" => Duration::try_minutes(n),
                    "h" => Duration::try_hours(n),
                    "d" => Duration::try_days(n),
                    _ => return Err(format!("unknown unit in `{s}`")),
                };
                interval.ok_or_else(|| format!("interval out of range in `{s}`"))?
            }
        };
        Ok(Self { interval })
    }
}
