//! Per-field aggregation of the five-condition chain

use super::condition::judge;
use crate::parser::ParsedScan;
use crate::resolution::{FieldPlan, JoinSlot};
use crate::results::{ConditionResult, FieldVerdict};
use crate::types::{JoinOp, Policy};
use kensa_compiler::config::constants::JOIN_SLOTS;
use kensa_compiler::logging::codes;
use kensa_compiler::log_warning;
use kensa_compiler::CompiledField;

/// Folds a field's condition results left to right with their joins
pub struct FieldAggregator {
    policy: Policy,
}

impl FieldAggregator {
    pub fn new(policy: Policy) -> Self {
        Self { policy }
    }

    pub fn evaluate(&self, field: &CompiledField, plan: &FieldPlan, scan: &ParsedScan) -> FieldVerdict {
        let label = field.label.as_str();
        let value = scan.value(&field.name);
        let mut config_reasons = Vec::new();

        if let Some(error) = scan.field_error(&field.name) {
            config_reasons.push(error.to_string());
        }

        for (i, slot) in plan.conditions.iter().enumerate().skip(1) {
            if slot.operand.is_some() && !slot.is_specified() {
                log_warning!(code = codes::evaluation::SLOT_OPERATOR_MISSING, "Condition has an operand but no operator",
                    "field" => &field.name,
                    "condition" => i + 1
                );
                config_reasons.push(format!("{}: 条件{}の判定条件を選択してください", label, i + 1));
            }
        }

        let conditions: Vec<ConditionResult> = plan
            .conditions
            .iter()
            .map(|slot| {
                judge(
                    field.kind,
                    value,
                    slot.operand.as_deref(),
                    slot.operator,
                    label,
                    self.policy,
                )
            })
            .collect();

        // Join b sits between condition b+1 and b+2 (1-based)
        let mut joins = [JoinOp::And; JOIN_SLOTS];
        for (b, join) in joins.iter_mut().enumerate() {
            if !conditions[b + 1].specified {
                continue;
            }
            *join = match (plan.joins[b], self.policy) {
                (JoinSlot::Set(op), _) => op,
                (JoinSlot::Unconfigured, Policy::Lenient) => JoinOp::And,
                (JoinSlot::Missing, _) | (JoinSlot::Unconfigured, Policy::Strict) => {
                    log_warning!(code = codes::evaluation::JOIN_MISSING, "Join between conditions is not selected",
                        "field" => &field.name,
                        "join" => b + 1
                    );
                    config_reasons.push(format!(
                        "{}: 条件{}と条件{}のAND/ORを選択してください",
                        label,
                        b + 1,
                        b + 2
                    ));
                    JoinOp::And
                }
            };
        }

        let mut acc: Option<bool> = None;
        for (i, result) in conditions.iter().enumerate() {
            if !result.specified {
                continue;
            }
            acc = Some(match acc {
                None => result.ok,
                Some(prev) => joins[i - 1].apply(prev, result.ok),
            });
        }

        let config_error = !config_reasons.is_empty();
        let mut reasons = config_reasons;
        reasons.extend(conditions.iter().filter_map(|c| c.reason.clone()));

        FieldVerdict {
            name: field.name.clone(),
            ok: acc.unwrap_or(true) && !config_error,
            config_error,
            reasons,
            conditions,
        }
    }
}
