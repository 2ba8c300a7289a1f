//! Comparison operators and AND/OR joins as selected on the host record

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel labels meaning "no condition in this slot"
const UNSPECIFIED_LABELS: &[&str] = &["指定なし", "unspecified"];

/// True for blank text or the "unspecified" sentinel
pub fn is_unspecified_label(label: &str) -> bool {
    let trimmed = label.trim();
    trimmed.is_empty()
        || UNSPECIFIED_LABELS
            .iter()
            .any(|s| trimmed.eq_ignore_ascii_case(s))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operator {
    // Shared
    Equals,
    NotEqual,
    // Text
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
    // Numeric
    GreaterThanOrEqual,
    LessThanOrEqual,
    GreaterThan,
    LessThan,
    // Temporal ordering
    OnOrAfter,
    OnOrBefore,
    // Datetime components
    SameDay,
    DifferentDay,
    SameClockTime,
    DifferentClockTime,
}

impl Operator {
    /// Parse a host-record label. Japanese labels are matched exactly,
    /// English aliases and symbols case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        let op = match trimmed {
            "同じ" => Self::Equals,
            "異なる" => Self::NotEqual,
            "含む" => Self::Contains,
            "含まない" => Self::NotContains,
            "で始まる" => Self::StartsWith,
            "で終わる" => Self::EndsWith,
            "以上" => Self::GreaterThanOrEqual,
            "以下" => Self::LessThanOrEqual,
            "より大きい" => Self::GreaterThan,
            "より小さい" | "未満" => Self::LessThan,
            "以降" => Self::OnOrAfter,
            "以前" => Self::OnOrBefore,
            "同じ日" => Self::SameDay,
            "異なる日" => Self::DifferentDay,
            "同じ時刻" => Self::SameClockTime,
            "異なる時刻" => Self::DifferentClockTime,
            _ => return Self::parse_alias(&trimmed.to_ascii_lowercase()),
        };
        Some(op)
    }

    fn parse_alias(s: &str) -> Option<Self> {
        match s {
            "equal" | "equals" | "=" | "==" => Some(Self::Equals),
            "not-equal" | "!=" => Some(Self::NotEqual),
            "contains" => Some(Self::Contains),
            "not-contains" => Some(Self::NotContains),
            "starts-with" => Some(Self::StartsWith),
            "ends-with" => Some(Self::EndsWith),
            "gte" | ">=" => Some(Self::GreaterThanOrEqual),
            "lte" | "<=" => Some(Self::LessThanOrEqual),
            "gt" | ">" => Some(Self::GreaterThan),
            "lt" | "<" => Some(Self::LessThan),
            "on-or-after" => Some(Self::OnOrAfter),
            "on-or-before" => Some(Self::OnOrBefore),
            "same-day" => Some(Self::SameDay),
            "different-day" => Some(Self::DifferentDay),
            "same-time" => Some(Self::SameClockTime),
            "different-time" => Some(Self::DifferentClockTime),
            _ => None,
        }
    }

    /// Label used in reasons
    pub fn label(&self) -> &'static str {
        match self {
            Self::Equals => "同じ",
            Self::NotEqual => "異なる",
            Self::Contains => "含む",
            Self::NotContains => "含まない",
            Self::StartsWith => "で始まる",
            Self::EndsWith => "で終わる",
            Self::GreaterThanOrEqual => "以上",
            Self::LessThanOrEqual => "以下",
            Self::GreaterThan => "より大きい",
            Self::LessThan => "より小さい",
            Self::OnOrAfter => "以降",
            Self::OnOrBefore => "以前",
            Self::SameDay => "同じ日",
            Self::DifferentDay => "異なる日",
            Self::SameClockTime => "同じ時刻",
            Self::DifferentClockTime => "異なる時刻",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equals => "equal",
            Self::NotEqual => "not-equal",
            Self::Contains => "contains",
            Self::NotContains => "not-contains",
            Self::StartsWith => "starts-with",
            Self::EndsWith => "ends-with",
            Self::GreaterThanOrEqual => "gte",
            Self::LessThanOrEqual => "lte",
            Self::GreaterThan => "gt",
            Self::LessThan => "lt",
            Self::OnOrAfter => "on-or-after",
            Self::OnOrBefore => "on-or-before",
            Self::SameDay => "same-day",
            Self::DifferentDay => "different-day",
            Self::SameClockTime => "same-time",
            Self::DifferentClockTime => "different-time",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a condition combines with the accumulated result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinOp {
    And,
    Or,
}

impl JoinOp {
    /// Exactly `and` or `or`, case-insensitive
    pub fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("and") {
            Some(Self::And)
        } else if trimmed.eq_ignore_ascii_case("or") {
            Some(Self::Or)
        } else {
            None
        }
    }

    pub fn apply(&self, acc: bool, next: bool) -> bool {
        match self {
            Self::And => acc && next,
            Self::Or => acc || next,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

impl fmt::Display for JoinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
