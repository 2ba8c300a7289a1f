//! # Type coercion
//!
//! Turns located scan text (or a rendered host operand) into a [`ParsedValue`]
//! of the field's declared kind. Dates and datetimes are read as civil time at
//! +09:00; times become minute-of-day.

use crate::types::{jst, ParsedValue, TimeOfDay, ValueKind};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use regex::Regex;
use std::sync::OnceLock;

/// Text that does not read as the requested kind
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {text}")]
pub struct CoercionError {
    pub kind: ValueKind,
    pub text: String,
}

impl CoercionError {
    fn new(kind: ValueKind, text: &str) -> Self {
        Self {
            kind,
            text: text.to_string(),
        }
    }
}

/// Coerce `text` to `kind`.
///
/// `compact_dates` additionally accepts `YYYYMMDD` dates and `YYYYMMDDHHMM`
/// datetimes.
pub fn coerce(text: &str, kind: ValueKind, compact_dates: bool) -> Result<ParsedValue, CoercionError> {
    let trimmed = text.trim();
    let fail = || CoercionError::new(kind, trimmed);

    match kind {
        ValueKind::Text => Ok(ParsedValue::Text {
            display: trimmed.to_string(),
        }),
        ValueKind::Number => {
            let value = parse_number(trimmed).ok_or_else(fail)?;
            Ok(ParsedValue::Number {
                display: trimmed.to_string(),
                value,
            })
        }
        ValueKind::Date => {
            let date = parse_date(trimmed, compact_dates).ok_or_else(fail)?;
            let value = local_instant(date.and_hms_opt(0, 0, 0).ok_or_else(fail)?).ok_or_else(fail)?;
            Ok(ParsedValue::Date {
                display: date.format("%Y-%m-%d").to_string(),
                value,
            })
        }
        ValueKind::Time => {
            let value = TimeOfDay::parse(trimmed).ok_or_else(fail)?;
            Ok(ParsedValue::Time {
                display: value.to_string(),
                value,
            })
        }
        ValueKind::DateTime => {
            let naive = parse_datetime(trimmed, compact_dates).ok_or_else(fail)?;
            let value = local_instant(naive).ok_or_else(fail)?;
            Ok(ParsedValue::DateTime {
                display: naive.format("%Y-%m-%d %H:%M").to_string(),
                value,
            })
        }
    }
}

fn local_instant(naive: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
    jst().from_local_datetime(&naive).single()
}

const NUMBER_PATTERN: &str = r"^[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)$";
const DATE_PATTERN: &str = r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$";
const COMPACT_DATE_PATTERN: &str = r"^[0-9]{8}$";
const COMBINED_DATETIME_PATTERN: &str = r"^[0-9]{4}[-/][0-9]{2}[-/][0-9]{2}[T ][0-9]{2}:[0-9]{2}$";

static NUMBER: OnceLock<Option<Regex>> = OnceLock::new();
static DATE: OnceLock<Option<Regex>> = OnceLock::new();
static COMPACT_DATE: OnceLock<Option<Regex>> = OnceLock::new();
static COMBINED_DATETIME: OnceLock<Option<Regex>> = OnceLock::new();

/// A pattern that fails to compile matches nothing
fn is_match(cell: &'static OnceLock<Option<Regex>>, pattern: &str, text: &str) -> bool {
    cell.get_or_init(|| Regex::new(pattern).ok())
        .as_ref()
        .is_some_and(|re| re.is_match(text))
}

/// Whether one token carries a whole `YYYY-MM-DD HH:MM` datetime
pub fn is_combined_datetime(text: &str) -> bool {
    is_match(&COMBINED_DATETIME, COMBINED_DATETIME_PATTERN, text.trim())
}

fn parse_number(s: &str) -> Option<f64> {
    if is_match(&NUMBER, NUMBER_PATTERN, s) {
        s.parse().ok()
    } else {
        None
    }
}

/// `YYYY-MM-DD`, `YYYY/MM/DD` and, when allowed, `YYYYMMDD`
fn parse_date(s: &str, compact: bool) -> Option<NaiveDate> {
    let normalized = if compact && is_match(&COMPACT_DATE, COMPACT_DATE_PATTERN, s) {
        format!("{}-{}-{}", &s[..4], &s[4..6], &s[6..])
    } else if s.contains('-') {
        s.to_string()
    } else {
        s.replace('/', "-")
    };
    if !is_match(&DATE, DATE_PATTERN, &normalized) {
        return None;
    }

    let year = normalized[..4].parse().ok()?;
    let month = normalized[5..7].parse().ok()?;
    let day = normalized[8..10].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Date and time separated by `T` or whitespace, or compact `YYYYMMDDHHMM`
fn parse_datetime(s: &str, compact: bool) -> Option<NaiveDateTime> {
    if compact && s.len() == 12 && s.bytes().all(|b| b.is_ascii_digit()) {
        let date = parse_date(&s[..8], true)?;
        let time = TimeOfDay::parse(&s[8..])?;
        return date.and_hms_opt(time.hour(), time.minute(), 0);
    }

    let (date_part, time_part) = match s.split_once('T') {
        Some(parts) => parts,
        None => s.split_once(char::is_whitespace)?,
    };
    let time_part = time_part.trim_start();
    if !time_part.contains(':') {
        return None;
    }

    let date = parse_date(date_part, false)?;
    let time = TimeOfDay::parse(time_part)?;
    date.and_hms_opt(time.hour(), time.minute(), 0)
}
