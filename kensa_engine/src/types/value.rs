//! Parsed scan values

use super::ValueKind;
use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Timelike, Utc};
use kensa_compiler::config::constants::UTC_OFFSET_SECONDS;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The fixed civil offset every date and datetime is interpreted in
pub fn jst() -> FixedOffset {
    FixedOffset::east_opt(UTC_OFFSET_SECONDS).unwrap_or_else(|| Utc.fix())
}

/// Minute of day, 0..1440
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self((hour * 60 + minute) as u16))
        } else {
            None
        }
    }

    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes < 24 * 60).then_some(Self(minutes))
    }

    /// Hour and minute of any clock value
    pub fn of<T: Timelike>(t: &T) -> Self {
        Self((t.hour() * 60 + t.minute()) as u16)
    }

    pub fn minutes(&self) -> u16 {
        self.0
    }

    pub fn hour(&self) -> u32 {
        u32::from(self.0 / 60)
    }

    pub fn minute(&self) -> u32 {
        u32::from(self.0 % 60)
    }

    /// Parse `HH:MM` or `HHMM`
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let (h, m) = match s.split_once(':') {
            Some((h, m)) if h.len() == 2 && m.len() == 2 => (h, m),
            Some(_) => return None,
            None if s.len() == 4 => s.split_at(2),
            None => return None,
        };
        if !h.bytes().chain(m.bytes()).all(|b| b.is_ascii_digit()) {
            return None;
        }
        Self::new(h.parse().ok()?, m.parse().ok()?)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        TimeOfDay::parse(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid time of day '{}'", s)))
    }
}

/// One field's value for one scan: display text plus a comparable native value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ParsedValue {
    Text {
        display: String,
    },
    Number {
        display: String,
        value: f64,
    },
    /// Local midnight at +09:00
    Date {
        display: String,
        value: DateTime<FixedOffset>,
    },
    Time {
        display: String,
        value: TimeOfDay,
    },
    #[serde(rename = "datetime")]
    DateTime {
        display: String,
        value: DateTime<FixedOffset>,
    },
}

impl ParsedValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            ParsedValue::Text { .. } => ValueKind::Text,
            ParsedValue::Number { .. } => ValueKind::Number,
            ParsedValue::Date { .. } => ValueKind::Date,
            ParsedValue::Time { .. } => ValueKind::Time,
            ParsedValue::DateTime { .. } => ValueKind::DateTime,
        }
    }

    pub fn display(&self) -> &str {
        match self {
            ParsedValue::Text { display }
            | ParsedValue::Number { display, .. }
            | ParsedValue::Date { display, .. }
            | ParsedValue::Time { display, .. }
            | ParsedValue::DateTime { display, .. } => display,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParsedValue::Number { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// Instant for dates and datetimes
    pub fn as_instant(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            ParsedValue::Date { value, .. } | ParsedValue::DateTime { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// Calendar date at +09:00
    pub fn local_date(&self) -> Option<NaiveDate> {
        self.as_instant().map(|dt| dt.with_timezone(&jst()).date_naive())
    }

    /// Minute of day for times, or the clock part of a datetime
    pub fn clock_time(&self) -> Option<TimeOfDay> {
        match self {
            ParsedValue::Time { value, .. } => Some(*value),
            ParsedValue::DateTime { value, .. } => {
                Some(TimeOfDay::of(&value.with_timezone(&jst())))
            }
            _ => None,
        }
    }
}

impl fmt::Display for ParsedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display())
    }
}
