//! Engine-side extensions to the compiler's value kinds

use super::{CellKind, Operator, ValueKind};

/// Operator support per value kind
pub trait ValueKindExt {
    /// Operators the evaluator accepts for this kind
    fn supported_operators(&self) -> &'static [Operator];

    fn supports(&self, op: Operator) -> bool {
        self.supported_operators().contains(&op)
    }

    /// Cell kind an audit value is written as when the schema says nothing
    fn default_cell_kind(&self) -> CellKind;
}

impl ValueKindExt for ValueKind {
    fn supported_operators(&self) -> &'static [Operator] {
        use Operator::*;
        match self {
            ValueKind::Text => &[Equals, Contains, NotContains, StartsWith, EndsWith],
            ValueKind::Number => &[
                Equals,
                NotEqual,
                GreaterThanOrEqual,
                LessThanOrEqual,
                GreaterThan,
                LessThan,
            ],
            ValueKind::Date | ValueKind::Time => &[Equals, NotEqual, OnOrAfter, OnOrBefore],
            ValueKind::DateTime => &[
                Equals,
                NotEqual,
                OnOrAfter,
                OnOrBefore,
                SameDay,
                DifferentDay,
                SameClockTime,
                DifferentClockTime,
            ],
        }
    }

    fn default_cell_kind(&self) -> CellKind {
        match self {
            ValueKind::Text => CellKind::ShortText,
            ValueKind::Number => CellKind::Number,
            ValueKind::DateTime => CellKind::DateTime,
            ValueKind::Date => CellKind::Date,
            ValueKind::Time => CellKind::Time,
        }
    }
}
