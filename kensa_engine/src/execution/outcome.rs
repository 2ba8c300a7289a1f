//! Scan-level aggregation of field verdicts

use crate::results::{FieldVerdict, ScanOutcome};

/// Note listing key-bounded fields with no occurrence in the scan
pub fn missing_note(labels: &[String]) -> Option<String> {
    if labels.is_empty() {
        None
    } else {
        Some(format!("{}が見つかりませんでした", labels.join("、")))
    }
}

/// Combine verdicts in field order; the missing note, if any, goes last
pub fn aggregate_scan(verdicts: &[FieldVerdict], missing: &[String]) -> ScanOutcome {
    let config_error = verdicts.iter().any(|v| v.config_error);
    let all_ok = verdicts.iter().all(|v| v.ok);

    let mut reasons: Vec<String> = verdicts.iter().flat_map(|v| v.reasons.iter().cloned()).collect();
    reasons.extend(missing_note(missing));

    ScanOutcome {
        ok: !config_error && all_ok,
        config_error,
        reasons,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::ResultTag;

    fn verdict(name: &str, ok: bool, config_error: bool, reasons: &[&str]) -> FieldVerdict {
        FieldVerdict {
            name: name.to_string(),
            ok,
            config_error,
            reasons: reasons.iter().map(|r| r.to_string()).collect(),
            conditions: vec![],
        }
    }

    #[test]
    fn test_business_failure_is_ng() {
        let outcome = aggregate_scan(
            &[verdict("a", true, false, &[]), verdict("b", false, false, &["b:以上 (scan:1, base:2)"])],
            &[],
        );
        assert_eq!(outcome.tag(), ResultTag::Ng);
        assert_eq!(outcome.reasons, vec!["b:以上 (scan:1, base:2)".to_string()]);
    }

    #[test]
    fn test_config_error_is_sticky() {
        let outcome = aggregate_scan(
            &[verdict("a", false, true, &["a: 条件2の判定条件を選択してください"]), verdict("b", true, false, &[])],
            &[],
        );
        assert!(!outcome.ok);
        assert_eq!(outcome.tag(), ResultTag::Err);
    }

    #[test]
    fn test_reasons_in_field_order_then_missing_note() {
        let outcome = aggregate_scan(
            &[verdict("a", false, false, &["A1", "A2"]), verdict("b", false, false, &["B1"])],
            &["ロット".to_string(), "数量".to_string()],
        );
        assert_eq!(
            outcome.reasons,
            vec!["A1", "A2", "B1", "ロット、数量が見つかりませんでした"]
        );
    }

    #[test]
    fn test_missing_alone_does_not_fail() {
        let outcome = aggregate_scan(&[verdict("a", true, false, &[])], &["b".to_string()]);
        assert_eq!(outcome.tag(), ResultTag::Ok);
        assert_eq!(outcome.reasons.len(), 1);
    }

    #[test]
    fn test_empty_scan_passes() {
        assert_eq!(aggregate_scan(&[], &[]).tag(), ResultTag::Ok);
    }
}
