//! # Evaluation
//!
//! Condition judging, per-field aggregation and scan-level aggregation.

pub mod comparisons;
pub mod condition;
pub mod field;
pub mod outcome;

pub use comparisons::{compare_values, ComparisonError};
pub use condition::judge;
pub use field::FieldAggregator;
pub use outcome::{aggregate_scan, missing_note};

use crate::parser::ParsedScan;
use crate::resolution::JudgePlan;
use crate::results::{FieldVerdict, ResultTag, ScanOutcome};
use kensa_compiler::logging::codes;
use kensa_compiler::{log_success, log_warning};
use kensa_compiler::CompiledConfig;
use serde::Serialize;

/// Field verdicts together with the scan outcome they produce
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    pub verdicts: Vec<FieldVerdict>,
    pub outcome: ScanOutcome,
}

/// Evaluate every field of a parsed scan against the resolved plan
pub fn evaluate(config: &CompiledConfig, plan: &JudgePlan, scan: &ParsedScan) -> Evaluation {
    let aggregator = FieldAggregator::new(config.policy);

    let verdicts: Vec<FieldVerdict> = config
        .fields
        .iter()
        .zip(&plan.fields)
        .map(|(field, field_plan)| aggregator.evaluate(field, field_plan, scan))
        .collect();

    let outcome = aggregate_scan(&verdicts, &scan.missing);

    match outcome.tag() {
        ResultTag::Ok => {
            log_success!(codes::success::SCAN_JUDGED, "Scan judged", "result" => outcome.tag());
        }
        tag => {
            log_warning!(code = codes::evaluation::BUSINESS_RULE_FAILED, "Scan did not pass",
                "result" => tag,
                "reasons" => outcome.reasons.len()
            );
        }
    }

    Evaluation { verdicts, outcome }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_scan;
    use crate::parser::test_support::{field, raw_config, schema};
    use crate::types::{Cell, HostRecord, ScanMode, ValueKind};
    use kensa_compiler::model::CellKind;
    use kensa_compiler::compile;

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn test_end_to_end_key_bounded() {
        let mut a = field("a", ValueKind::Text);
        a.before = some("a=");
        a.after = some(";");
        a.judge.value_field_ref = vec![some("a_v1")];
        a.judge.op_field_ref = vec![some("a_op1")];

        let mut b = field("b", ValueKind::Number);
        b.before = some("b=");
        b.after = some(";");
        b.judge.value_field_ref = vec![some("b_v1")];
        b.judge.op_field_ref = vec![some("b_op1")];

        let schema = schema()
            .with_field("a_v1", CellKind::ShortText)
            .with_field("a_op1", CellKind::ShortText)
            .with_field("b_v1", CellKind::Number)
            .with_field("b_op1", CellKind::ShortText);
        let config = compile(&raw_config(ScanMode::KeyBounded, vec![a, b]), &schema).unwrap();

        let record = HostRecord::new("r")
            .with_field("a_v1", Cell::ShortText("TE".to_string()))
            .with_field("a_op1", Cell::ShortText("で始まる".to_string()))
            .with_field("b_v1", Cell::Number(Some(20.0)))
            .with_field("b_op1", Cell::ShortText("以上".to_string()));
        let plan = JudgePlan::resolve(&config, &record).unwrap();

        let scan = parse_scan("a=TEST;b=10;", &config).unwrap();
        let evaluation = evaluate(&config, &plan, &scan);

        assert_eq!(evaluation.outcome.tag(), ResultTag::Ng);
        assert_eq!(evaluation.outcome.reasons, vec!["b:以上 (scan:10, base:20)".to_string()]);
        assert!(evaluation.verdicts[0].ok);

        let scan = parse_scan("a=X;a=Y;b=30;", &config).unwrap();
        let evaluation = evaluate(&config, &plan, &scan);
        assert_eq!(evaluation.outcome.tag(), ResultTag::Err);
        assert_eq!(evaluation.outcome.reasons[0], "aの読み取り結果が不正です（重複）");
    }
}
