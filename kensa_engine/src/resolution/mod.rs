//! # Judge-slot resolution
//!
//! Snapshots every configured operand, operator and join from the host record
//! once per session. Operator labels are parsed and checked against the
//! field kind here so that evaluation never sees an unknown label.

use crate::types::{Cell, HostRecord, JoinOp, Operator, ValueKind, ValueKindExt};
use kensa_compiler::config::constants::{CONDITION_SLOTS, JOIN_SLOTS};
use kensa_compiler::logging::codes::{self, Code};
use kensa_compiler::model::is_unspecified_label;
use kensa_compiler::{log_error, log_success};
use kensa_compiler::{CompiledConfig, CompiledField};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionError {
    #[error("Field '{field}' condition {slot}: unknown operator '{label}'")]
    UnknownOperator {
        field: String,
        slot: usize,
        label: String,
    },

    #[error("Field '{field}' condition {slot}: operator '{operator}' is not available for {kind} values")]
    UnsupportedOperator {
        field: String,
        slot: usize,
        operator: Operator,
        kind: ValueKind,
    },

    #[error("Record '{record}' has no field '{code}' referenced by field '{field}'")]
    RecordFieldMissing {
        record: String,
        field: String,
        code: String,
    },
}

impl ResolutionError {
    pub fn error_code(&self) -> Code {
        match self {
            ResolutionError::UnknownOperator { .. } => codes::resolution::UNKNOWN_OPERATOR,
            ResolutionError::UnsupportedOperator { .. } => codes::resolution::UNSUPPORTED_OPERATOR,
            ResolutionError::RecordFieldMissing { .. } => codes::resolution::RECORD_FIELD_MISSING,
        }
    }
}

/// One condition position after resolution
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConditionSlot {
    /// Rendered host operand; `None` when unconfigured or blank
    pub operand: Option<String>,
    /// `None` when unconfigured, blank or the "unspecified" sentinel
    pub operator: Option<Operator>,
}

impl ConditionSlot {
    pub fn is_specified(&self) -> bool {
        self.operator.is_some()
    }
}

/// One join position after resolution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinSlot {
    /// No join code configured at this position
    #[default]
    Unconfigured,
    /// Configured, but the record holds neither `and` nor `or`
    Missing,
    Set(JoinOp),
}

/// Resolved slots for one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldPlan {
    pub name: String,
    pub conditions: [ConditionSlot; CONDITION_SLOTS],
    pub joins: [JoinSlot; JOIN_SLOTS],
}

impl FieldPlan {
    pub fn specified_count(&self) -> usize {
        self.conditions.iter().filter(|c| c.is_specified()).count()
    }
}

/// Resolved slots for every field, in configuration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JudgePlan {
    pub fields: Vec<FieldPlan>,
}

impl JudgePlan {
    /// Read every judge slot of `config` from `record`
    pub fn resolve(config: &CompiledConfig, record: &HostRecord) -> Result<Self, ResolutionError> {
        let fields = config
            .fields
            .iter()
            .map(|field| resolve_field(field, record))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|error| {
                log_error!(error.error_code(), "Judge plan could not be resolved",
                    "record" => &record.id,
                    "reason" => &error
                );
                error
            })?;

        let plan = Self { fields };
        log_success!(codes::success::PLAN_RESOLVED, "Judge plan resolved",
            "record" => &record.id,
            "fields" => plan.fields.len(),
            "conditions" => plan.fields.iter().map(FieldPlan::specified_count).sum::<usize>()
        );
        Ok(plan)
    }

    pub fn field(&self, name: &str) -> Option<&FieldPlan> {
        self.fields.iter().find(|f| f.name == name)
    }
}

fn resolve_field(field: &CompiledField, record: &HostRecord) -> Result<FieldPlan, ResolutionError> {
    let lookup = |code: &str| -> Result<&Cell, ResolutionError> {
        record
            .field(code)
            .ok_or_else(|| ResolutionError::RecordFieldMissing {
                record: record.id.clone(),
                field: field.name.clone(),
                code: code.to_string(),
            })
    };

    let mut conditions: [ConditionSlot; CONDITION_SLOTS] = Default::default();
    for (slot, condition) in conditions.iter_mut().enumerate() {
        if let Some(code) = &field.judge.values[slot] {
            condition.operand = lookup(code)?.render();
        }
        if let Some(code) = &field.judge.operators[slot] {
            condition.operator = match lookup(code)?.render() {
                Some(label) => parse_operator(field, slot, &label)?,
                None => None,
            };
        }
    }

    let mut joins = [JoinSlot::Unconfigured; JOIN_SLOTS];
    for (slot, join) in joins.iter_mut().enumerate() {
        if let Some(code) = &field.judge.joins[slot] {
            *join = lookup(code)?
                .render()
                .and_then(|text| JoinOp::parse(&text))
                .map_or(JoinSlot::Missing, JoinSlot::Set);
        }
    }

    Ok(FieldPlan {
        name: field.name.clone(),
        conditions,
        joins,
    })
}

/// `None` for the sentinel, otherwise an operator the field kind supports
fn parse_operator(
    field: &CompiledField,
    slot: usize,
    label: &str,
) -> Result<Option<Operator>, ResolutionError> {
    if is_unspecified_label(label) {
        return Ok(None);
    }

    let operator = Operator::parse(label).ok_or_else(|| ResolutionError::UnknownOperator {
        field: field.name.clone(),
        slot: slot + 1,
        label: label.to_string(),
    })?;

    if !field.kind.supports(operator) {
        return Err(ResolutionError::UnsupportedOperator {
            field: field.name.clone(),
            slot: slot + 1,
            operator,
            kind: field.kind,
        });
    }
    Ok(Some(operator))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::test_support::{field, raw_config, schema};
    use assert_matches::assert_matches;
    use kensa_compiler::model::{CellKind, ScanMode};
    use kensa_compiler::compile;

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    fn config(kind: ValueKind) -> CompiledConfig {
        let mut f = field("qty", kind);
        f.width = Some(3);
        f.judge.value_field_ref = vec![some("v1"), some("v2")];
        f.judge.op_field_ref = vec![some("op1"), some("op2")];
        f.judge.join_field_ref = vec![some("j1")];

        let schema = schema()
            .with_field("v1", CellKind::Number)
            .with_field("v2", CellKind::Number)
            .with_field("op1", CellKind::ShortText)
            .with_field("op2", CellKind::ShortText)
            .with_field("j1", CellKind::ShortText);
        compile(&raw_config(ScanMode::FixedWidth, vec![f]), &schema).unwrap()
    }

    fn record(op1: &str, op2: &str, join: &str) -> HostRecord {
        HostRecord::new("r1")
            .with_field("v1", Cell::Number(Some(10.0)))
            .with_field("v2", Cell::Number(None))
            .with_field("op1", Cell::ShortText(op1.to_string()))
            .with_field("op2", Cell::ShortText(op2.to_string()))
            .with_field("j1", Cell::ShortText(join.to_string()))
    }

    #[test]
    fn test_resolves_slots() {
        let plan = JudgePlan::resolve(&config(ValueKind::Number), &record("以上", "指定なし", "or")).unwrap();
        let qty = plan.field("qty").unwrap();

        assert_eq!(qty.conditions[0].operand.as_deref(), Some("10"));
        assert_eq!(qty.conditions[0].operator, Some(Operator::GreaterThanOrEqual));
        assert_eq!(qty.conditions[1], ConditionSlot::default());
        assert_eq!(qty.joins[0], JoinSlot::Set(JoinOp::Or));
        assert_eq!(qty.joins[1], JoinSlot::Unconfigured);
        assert_eq!(qty.specified_count(), 1);
    }

    #[test]
    fn test_invalid_join_text_is_missing() {
        let plan = JudgePlan::resolve(&config(ValueKind::Number), &record("同じ", "同じ", "both")).unwrap();
        assert_eq!(plan.fields[0].joins[0], JoinSlot::Missing);

        let plan = JudgePlan::resolve(&config(ValueKind::Number), &record("同じ", "同じ", "")).unwrap();
        assert_eq!(plan.fields[0].joins[0], JoinSlot::Missing);
    }

    #[test]
    fn test_unknown_operator_is_rejected() {
        let result = JudgePlan::resolve(&config(ValueKind::Number), &record("だいたい", "", "and"));
        assert_matches!(
            result,
            Err(ResolutionError::UnknownOperator { slot: 1, .. })
        );
    }

    #[test]
    fn test_operator_must_suit_the_kind() {
        let result = JudgePlan::resolve(&config(ValueKind::Number), &record("同じ", "含む", "and"));
        assert_matches!(
            result,
            Err(ResolutionError::UnsupportedOperator { slot: 2, operator: Operator::Contains, .. })
        );
    }

    #[test]
    fn test_missing_record_field() {
        let mut record = record("同じ", "", "and");
        record.fields.remove("j1");

        let error = JudgePlan::resolve(&config(ValueKind::Number), &record).unwrap_err();
        assert_eq!(error.error_code(), codes::resolution::RECORD_FIELD_MISSING);
    }
}
