use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared kind of a scanned field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Text,
    Number,
    #[serde(alias = "date-time")]
    DateTime,
    Date,
    Time,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Text => "text",
            ValueKind::Number => "number",
            ValueKind::DateTime => "datetime",
            ValueKind::Date => "date",
            ValueKind::Time => "time",
        }
    }

    /// Audit column kinds that can hold a value of this kind
    pub fn compatible_cells(&self) -> &'static [CellKind] {
        match self {
            ValueKind::Text => &[CellKind::ShortText, CellKind::LongText],
            ValueKind::Number => &[CellKind::Number],
            ValueKind::DateTime => &[CellKind::DateTime],
            ValueKind::Date => &[CellKind::Date],
            ValueKind::Time => &[CellKind::Time],
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a host-record cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CellKind {
    ShortText,
    LongText,
    Number,
    Date,
    Time,
    #[serde(rename = "datetime", alias = "date-time")]
    DateTime,
    Choices,
}

impl CellKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CellKind::ShortText => "short-text",
            CellKind::LongText => "long-text",
            CellKind::Number => "number",
            CellKind::Date => "date",
            CellKind::Time => "time",
            CellKind::DateTime => "datetime",
            CellKind::Choices => "choices",
        }
    }

    pub fn is_textual(&self) -> bool {
        matches!(self, CellKind::ShortText | CellKind::LongText)
    }

    /// Whether a cell of this kind can be rendered as a single operand
    pub fn is_scalar(&self) -> bool {
        !matches!(self, CellKind::Choices)
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extraction strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScanMode {
    FixedWidth,
    #[serde(alias = "delimited-token")]
    Delimited,
    KeyBounded,
}

impl ScanMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanMode::FixedWidth => "fixed-width",
            ScanMode::Delimited => "delimited",
            ScanMode::KeyBounded => "key-bounded",
        }
    }

    pub fn default_policy(&self) -> Policy {
        match self {
            ScanMode::FixedWidth | ScanMode::Delimited => Policy::Strict,
            ScanMode::KeyBounded => Policy::Lenient,
        }
    }

    pub fn default_compact_dates(&self) -> bool {
        !matches!(self, ScanMode::KeyBounded)
    }
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handling of coercion failures, missing scan values and unconfigured joins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    Strict,
    Lenient,
}

impl Policy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Policy::Strict => "strict",
            Policy::Lenient => "lenient",
        }
    }

    pub fn is_strict(&self) -> bool {
        matches!(self, Policy::Strict)
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_kind_serde() {
        let kind: ValueKind = serde_json::from_str("\"datetime\"").unwrap();
        assert_eq!(kind, ValueKind::DateTime);
        assert_eq!(serde_json::to_string(&ValueKind::Number).unwrap(), "\"number\"");
    }

    #[test]
    fn test_cell_kind_serde() {
        let kind: CellKind = serde_json::from_str("\"short-text\"").unwrap();
        assert_eq!(kind, CellKind::ShortText);
        assert!(kind.is_textual());
        assert!(!CellKind::Choices.is_scalar());
    }

    #[test]
    fn test_mode_defaults() {
        assert_eq!(ScanMode::FixedWidth.default_policy(), Policy::Strict);
        assert_eq!(ScanMode::KeyBounded.default_policy(), Policy::Lenient);
        assert!(ScanMode::Delimited.default_compact_dates());
        assert!(!ScanMode::KeyBounded.default_compact_dates());
    }

    #[test]
    fn test_compatible_cells() {
        assert!(ValueKind::Text.compatible_cells().contains(&CellKind::LongText));
        assert!(!ValueKind::Number.compatible_cells().contains(&CellKind::ShortText));
    }
}
