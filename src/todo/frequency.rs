use crate::error::FrequencyError;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit of a recurrence interval
///
/// Months and years are fixed-length approximations (30 and 365 days).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Day,
    Week,
    Month,
    Year,
}

impl Unit {
    /// Length of one unit in days
    pub fn days(self) -> i64 {
        match self {
            Unit::Day => 1,
            Unit::Week => 7,
            Unit::Month => 30,
            Unit::Year => 365,
        }
    }

    /// Single-letter suffix used in recurrence tokens (`2w`, `1y`)
    pub fn suffix(self) -> char {
        match self {
            Unit::Day => 'd',
            Unit::Week => 'w',
            Unit::Month => 'm',
            Unit::Year => 'y',
        }
    }

    fn from_suffix(c: char) -> Option<Self> {
        match c {
            'd' => Some(Unit::Day),
            'w' => Some(Unit::Week),
            'm' => Some(Unit::Month),
            'y' => Some(Unit::Year),
            _ => None,
        }
    }
}

/// Schedule of a task
///
/// A task without a schedule carries `None` instead of a `Frequency`.
/// Serialized as an internally tagged table so TOML keeps the variants apart:
/// `{ kind = "absolute", at = "..." }` or `{ kind = "recurring", count = 2, unit = "week" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Frequency {
    /// Due once, on the date of `at`
    Absolute { at: NaiveDateTime },
    /// Due every `count` units, counted from the task's creation date
    Recurring { count: u32, unit: Unit },
}

impl Frequency {
    /// Parse a frequency token
    ///
    /// Forms are tried in this order:
    /// 1. `@D/M/Y` or `@D/M` (current year) - absolute date at midnight
    /// 2. `today` - now
    /// 3. `tomorrow` - now + 1 day
    /// 4. `+N` - now + N days, a non-numeric N counts as 0
    /// 5. `<digits><d|w|m|y>` - recurrence, count must be positive
    /// 6. `-` - no schedule (`Ok(None)`)
    ///
    /// # Arguments
    /// * `token` - The user-supplied token
    /// * `now` - Current local time, used for relative forms and the default year
    pub fn parse(token: &str, now: NaiveDateTime) -> Result<Option<Self>, FrequencyError> {
        if let Some(date) = token.strip_prefix('@') {
            let date = parse_day_month(date, now.year()).ok_or_else(|| {
                FrequencyError::InvalidDate {
                    input: token.to_string(),
                }
            })?;
            return Ok(Some(Frequency::Absolute {
                at: date.and_time(NaiveTime::MIN),
            }));
        }

        if token == "today" {
            return Ok(Some(Frequency::Absolute { at: now }));
        }

        if token == "tomorrow" {
            return shift_days(token, now, 1).map(Some);
        }

        if let Some(offset) = token.strip_prefix('+') {
            let days = offset.parse::<i64>().unwrap_or(0);
            return shift_days(token, now, days).map(Some);
        }

        if let Some(recurring) = parse_recurrence(token) {
            return Ok(Some(recurring));
        }

        if token == "-" {
            return Ok(None);
        }

        Err(FrequencyError::Unrecognized {
            input: token.to_string(),
        })
    }

    /// Length of the recurrence period in days, `None` for absolute dates
    pub fn period_days(&self) -> Option<i64> {
        match self {
            Frequency::Absolute { .. } => None,
            Frequency::Recurring { count, unit } => Some(i64::from(*count) * unit.days()),
        }
    }

    pub fn is_recurring(&self) -> bool {
        matches!(self, Frequency::Recurring { .. })
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Absolute { at } => write!(f, "{}", at.format("%d/%m/%Y")),
            Frequency::Recurring { count, unit } => write!(f, "{}{}", count, unit.suffix()),
        }
    }
}

/// Result of resolving a token where bad input must not abort the operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// The schedule to store; `None` for `-` and for rejected tokens
    pub frequency: Option<Frequency>,
    /// Why the token was rejected, unless resolution was silent
    pub warning: Option<FrequencyError>,
}

/// Resolve a token, falling back to no schedule on any parse error
///
/// With `silent` set the error is dropped; otherwise it is handed back to the
/// caller for reporting.
pub fn resolve_frequency(token: &str, now: NaiveDateTime, silent: bool) -> Resolved {
    match Frequency::parse(token, now) {
        Ok(frequency) => Resolved {
            frequency,
            warning: None,
        },
        Err(e) => Resolved {
            frequency: None,
            warning: (!silent).then_some(e),
        },
    }
}

/// Strict `D/M/YYYY` parse; a bare `D/M` takes `default_year`
///
/// Day and month are one or two digits, the year exactly four. No other
/// characters, whitespace included, are accepted.
fn parse_day_month(text: &str, default_year: i32) -> Option<NaiveDate> {
    fn digits(part: &str, lengths: std::ops::RangeInclusive<usize>) -> Option<u32> {
        if !lengths.contains(&part.len()) || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        part.parse().ok()
    }

    let parts: Vec<&str> = text.split('/').collect();
    let (day, month, year) = match parts.as_slice() {
        [day, month] => (*day, *month, default_year),
        [day, month, year] => (*day, *month, i32::try_from(digits(year, 4..=4)?).ok()?),
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, digits(month, 1..=2)?, digits(day, 1..=2)?)
}

fn shift_days(token: &str, now: NaiveDateTime, days: i64) -> Result<Frequency, FrequencyError> {
    TimeDelta::try_days(days)
        .and_then(|delta| now.checked_add_signed(delta))
        .map(|at| Frequency::Absolute { at })
        .ok_or_else(|| FrequencyError::OutOfRange {
            input: token.to_string(),
        })
}

fn parse_recurrence(token: &str) -> Option<Frequency> {
    let mut chars = token.chars();
    let unit = Unit::from_suffix(chars.next_back()?)?;
    let digits = chars.as_str();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let count = digits.parse::<u32>().ok().filter(|count| *count > 0)?;
    Some(Frequency::Recurring { count, unit })
}
