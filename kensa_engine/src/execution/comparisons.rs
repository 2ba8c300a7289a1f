//! # Per-kind comparison operations
//!
//! Each module compares a scanned value (`actual`) against a host operand
//! (`expected`). Operators outside a kind's table are reported, not guessed.

use crate::types::{Operator, ParsedValue, TimeOfDay, ValueKind};
use chrono::{DateTime, FixedOffset};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ComparisonError {
    #[error("Unsupported operation '{operation}' for type {kind}")]
    UnsupportedOperation { operation: Operator, kind: ValueKind },

    #[error("Type mismatch in comparison: {actual} against {expected}")]
    TypeMismatch { actual: ValueKind, expected: ValueKind },
}

fn unsupported(operation: Operator, kind: ValueKind) -> ComparisonError {
    ComparisonError::UnsupportedOperation { operation, kind }
}

/// Case-sensitive text operations
pub mod text {
    use super::*;

    pub fn compare(actual: &str, expected: &str, operation: Operator) -> Result<bool, ComparisonError> {
        match operation {
            Operator::Equals => Ok(actual == expected),
            Operator::Contains => Ok(actual.contains(expected)),
            Operator::NotContains => Ok(!actual.contains(expected)),
            Operator::StartsWith => Ok(actual.starts_with(expected)),
            Operator::EndsWith => Ok(actual.ends_with(expected)),
            _ => Err(unsupported(operation, ValueKind::Text)),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_text_operations() {
            assert!(compare("LOT-001", "LOT-001", Operator::Equals).unwrap());
            assert!(!compare("LOT-001", "lot-001", Operator::Equals).unwrap());
            assert!(compare("LOT-001", "-00", Operator::Contains).unwrap());
            assert!(compare("LOT-001", "X", Operator::NotContains).unwrap());
            assert!(compare("LOT-001", "LOT", Operator::StartsWith).unwrap());
            assert!(compare("LOT-001", "001", Operator::EndsWith).unwrap());
            assert!(!compare("LOT-001", "LOT", Operator::EndsWith).unwrap());
        }

        #[test]
        fn test_no_ordering_on_text() {
            assert!(compare("a", "b", Operator::LessThan).is_err());
            assert!(compare("a", "b", Operator::NotEqual).is_err());
        }
    }
}

/// IEEE-754 numeric operations
pub mod number {
    use super::*;

    pub fn compare(actual: f64, expected: f64, operation: Operator) -> Result<bool, ComparisonError> {
        match operation {
            Operator::Equals => Ok(actual == expected),
            Operator::NotEqual => Ok(actual != expected),
            Operator::GreaterThanOrEqual => Ok(actual >= expected),
            Operator::LessThanOrEqual => Ok(actual <= expected),
            Operator::GreaterThan => Ok(actual > expected),
            Operator::LessThan => Ok(actual < expected),
            _ => Err(unsupported(operation, ValueKind::Number)),
        }
    }

}

/// Ordering of instants, shared by dates and datetimes
fn instant_order(
    actual: DateTime<FixedOffset>,
    expected: DateTime<FixedOffset>,
    operation: Operator,
) -> Option<bool> {
    match operation {
        Operator::Equals => Some(actual == expected),
        Operator::NotEqual => Some(actual != expected),
        Operator::OnOrAfter => Some(actual >= expected),
        Operator::OnOrBefore => Some(actual <= expected),
        _ => None,
    }
}

/// Calendar dates, compared as local midnights
pub mod date {
    use super::*;

    pub fn compare(
        actual: DateTime<FixedOffset>,
        expected: DateTime<FixedOffset>,
        operation: Operator,
    ) -> Result<bool, ComparisonError> {
        instant_order(actual, expected, operation).ok_or_else(|| unsupported(operation, ValueKind::Date))
    }
}

/// Datetimes: instant ordering plus local day and clock-time components
pub mod datetime {
    use super::*;
    use crate::types::jst;

    pub fn compare(
        actual: DateTime<FixedOffset>,
        expected: DateTime<FixedOffset>,
        operation: Operator,
    ) -> Result<bool, ComparisonError> {
        if let Some(result) = instant_order(actual, expected, operation) {
            return Ok(result);
        }

        let actual = actual.with_timezone(&jst());
        let expected = expected.with_timezone(&jst());
        let same_day = actual.date_naive() == expected.date_naive();
        let same_time = TimeOfDay::of(&actual) == TimeOfDay::of(&expected);

        match operation {
            Operator::SameDay => Ok(same_day),
            Operator::DifferentDay => Ok(!same_day),
            Operator::SameClockTime => Ok(same_time),
            Operator::DifferentClockTime => Ok(!same_time),
            _ => Err(unsupported(operation, ValueKind::DateTime)),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::TimeZone;

        fn at(d: u32, h: u32, m: u32) -> DateTime<FixedOffset> {
            jst().with_ymd_and_hms(2024, 3, d, h, m, 0).unwrap()
        }

        #[test]
        fn test_ordering() {
            assert!(compare(at(2, 8, 0), at(1, 23, 59), Operator::OnOrAfter).unwrap());
            assert!(compare(at(1, 8, 0), at(1, 8, 0), Operator::OnOrBefore).unwrap());
            assert!(!compare(at(1, 8, 0), at(1, 8, 1), Operator::Equals).unwrap());
        }

        #[test]
        fn test_components_use_local_time() {
            // 00:30 at +09:00 is the previous day in UTC
            assert!(compare(at(2, 0, 30), at(2, 23, 0), Operator::SameDay).unwrap());
            assert!(compare(at(1, 8, 15), at(5, 8, 15), Operator::SameClockTime).unwrap());
            assert!(compare(at(1, 8, 15), at(1, 8, 16), Operator::DifferentClockTime).unwrap());
            assert!(compare(at(1, 8, 15), at(2, 8, 15), Operator::DifferentDay).unwrap());
        }
    }
}

/// Minute-of-day operations
pub mod time {
    use super::*;

    pub fn compare(actual: TimeOfDay, expected: TimeOfDay, operation: Operator) -> Result<bool, ComparisonError> {
        match operation {
            Operator::Equals => Ok(actual == expected),
            Operator::NotEqual => Ok(actual != expected),
            Operator::OnOrAfter => Ok(actual >= expected),
            Operator::OnOrBefore => Ok(actual <= expected),
            _ => Err(unsupported(operation, ValueKind::Time)),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_time_operations() {
            let eight = TimeOfDay::new(8, 0).unwrap();
            let nine = TimeOfDay::new(9, 0).unwrap();
            assert!(compare(nine, eight, Operator::OnOrAfter).unwrap());
            assert!(!compare(nine, eight, Operator::OnOrBefore).unwrap());
            assert!(compare(eight, eight, Operator::Equals).unwrap());
            assert!(compare(eight, nine, Operator::GreaterThan).is_err());
        }
    }
}

/// Dispatch on the value kinds of both sides
pub fn compare_values(
    actual: &ParsedValue,
    expected: &ParsedValue,
    operation: Operator,
) -> Result<bool, ComparisonError> {
    match (actual, expected) {
        (ParsedValue::Text { display: a }, ParsedValue::Text { display: e }) => {
            text::compare(a, e, operation)
        }
        (ParsedValue::Number { value: a, .. }, ParsedValue::Number { value: e, .. }) => {
            number::compare(*a, *e, operation)
        }
        (ParsedValue::Date { value: a, .. }, ParsedValue::Date { value: e, .. }) => {
            date::compare(*a, *e, operation)
        }
        (ParsedValue::DateTime { value: a, .. }, ParsedValue::DateTime { value: e, .. }) => {
            datetime::compare(*a, *e, operation)
        }
        (ParsedValue::Time { value: a, .. }, ParsedValue::Time { value: e, .. }) => {
            time::compare(*a, *e, operation)
        }
        _ => Err(ComparisonError::TypeMismatch {
            actual: actual.kind(),
            expected: expected.kind(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coercion::coerce;

    #[test]
    fn test_dispatch() {
        let a = coerce("2024-03-01", ValueKind::Date, false).unwrap();
        let b = coerce("2024/03/01", ValueKind::Date, false).unwrap();
        assert!(compare_values(&a, &b, Operator::Equals).unwrap());
    }

    #[test]
    fn test_mismatched_kinds() {
        let a = coerce("1", ValueKind::Number, false).unwrap();
        let b = coerce("1", ValueKind::Text, false).unwrap();
        assert_eq!(
            compare_values(&a, &b, Operator::Equals),
            Err(ComparisonError::TypeMismatch {
                actual: ValueKind::Number,
                expected: ValueKind::Text
            })
        );
    }
}
