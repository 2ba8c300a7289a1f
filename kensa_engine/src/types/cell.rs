//! Host-record cells

use super::value::{jst, ParsedValue, TimeOfDay};
use super::CellKind;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A typed host-record cell. Blank means empty text, `None` or no choices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum Cell {
    ShortText(String),
    LongText(String),
    Number(Option<f64>),
    Date(Option<NaiveDate>),
    Time(Option<TimeOfDay>),
    #[serde(rename = "datetime")]
    DateTime(Option<DateTime<Utc>>),
    /// Multi-select, only ever read from the host
    Choices(Vec<String>),
}

impl Cell {
    pub fn kind(&self) -> CellKind {
        match self {
            Cell::ShortText(_) => CellKind::ShortText,
            Cell::LongText(_) => CellKind::LongText,
            Cell::Number(_) => CellKind::Number,
            Cell::Date(_) => CellKind::Date,
            Cell::Time(_) => CellKind::Time,
            Cell::DateTime(_) => CellKind::DateTime,
            Cell::Choices(_) => CellKind::Choices,
        }
    }

    /// Empty cell of the given kind
    pub fn blank(kind: CellKind) -> Self {
        match kind {
            CellKind::ShortText => Cell::ShortText(String::new()),
            CellKind::LongText => Cell::LongText(String::new()),
            CellKind::Number => Cell::Number(None),
            CellKind::Date => Cell::Date(None),
            CellKind::Time => Cell::Time(None),
            CellKind::DateTime => Cell::DateTime(None),
            CellKind::Choices => Cell::Choices(Vec::new()),
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Cell::ShortText(s) | Cell::LongText(s) => s.trim().is_empty(),
            Cell::Number(v) => v.is_none(),
            Cell::Date(v) => v.is_none(),
            Cell::Time(v) => v.is_none(),
            Cell::DateTime(v) => v.is_none(),
            Cell::Choices(v) => v.iter().all(|c| c.trim().is_empty()),
        }
    }

    /// Cell content as an operand string; `None` when blank.
    ///
    /// Numbers use the shortest round-trip form, dates `YYYY-MM-DD`, times
    /// `HH:MM` and datetimes `YYYY-MM-DD HH:MM` at +09:00.
    pub fn render(&self) -> Option<String> {
        if self.is_blank() {
            return None;
        }
        let text = match self {
            Cell::ShortText(s) | Cell::LongText(s) => s.trim().to_string(),
            Cell::Number(v) => v.map(format_number)?,
            Cell::Date(v) => v.map(|d| d.format("%Y-%m-%d").to_string())?,
            Cell::Time(v) => v.map(|t| t.to_string())?,
            Cell::DateTime(v) => v.map(|dt| {
                dt.with_timezone(&jst())
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
            })?,
            Cell::Choices(v) => v
                .iter()
                .map(|c| c.trim())
                .filter(|c| !c.is_empty())
                .collect::<Vec<_>>()
                .join(","),
        };
        Some(text)
    }

    /// Audit cell for a field value, shaped to the target column kind
    pub fn from_parsed(value: Option<&ParsedValue>, kind: CellKind) -> Self {
        let Some(value) = value else {
            return Cell::blank(kind);
        };
        match kind {
            CellKind::ShortText => Cell::ShortText(value.display().to_string()),
            CellKind::LongText => Cell::LongText(value.display().to_string()),
            CellKind::Number => Cell::Number(value.as_number()),
            CellKind::Date => Cell::Date(value.local_date()),
            CellKind::Time => Cell::Time(value.clock_time()),
            CellKind::DateTime => {
                Cell::DateTime(value.as_instant().map(|dt| dt.with_timezone(&Utc)))
            }
            CellKind::Choices => Cell::Choices(vec![value.display().to_string()]),
        }
    }

    /// Text cell of the given kind (short or long)
    pub fn text(kind: CellKind, text: &str) -> Self {
        match kind {
            CellKind::LongText => Cell::LongText(text.to_string()),
            _ => Cell::ShortText(text.to_string()),
        }
    }
}

/// Shortest decimal form that reads back to the same value
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        // Avoid "-0"
        "0".to_string()
    } else {
        n.to_string()
    }
}
