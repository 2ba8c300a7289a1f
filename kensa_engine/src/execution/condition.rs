//! Single-condition evaluation

use super::comparisons::compare_values;
use crate::coercion::coerce;
use crate::results::ConditionResult;
use crate::types::{Operator, ParsedValue, Policy, ValueKind};
use kensa_compiler::log_debug;

/// Judge one condition.
///
/// `scan` is the field's parsed value, `base` the rendered host operand. A
/// missing scan value passes under lenient policy; anything else that cannot
/// be compared fails with the usual reason.
pub fn judge(
    kind: ValueKind,
    scan: Option<&ParsedValue>,
    base: Option<&str>,
    operator: Option<Operator>,
    label: &str,
    policy: Policy,
) -> ConditionResult {
    let Some(operator) = operator else {
        return ConditionResult::unspecified();
    };

    let failure = || ConditionResult::fail(reason(label, operator, scan, base));

    let Some(actual) = scan else {
        return if policy.is_strict() {
            failure()
        } else {
            ConditionResult::pass()
        };
    };

    let Some(expected) = base.and_then(|text| coerce(text, kind, true).ok()) else {
        log_debug!("Base operand unusable", "label" => label, "base" => base.unwrap_or(""));
        return failure();
    };

    match compare_values(actual, &expected, operator) {
        Ok(true) => ConditionResult::pass(),
        Ok(false) => failure(),
        Err(error) => {
            log_debug!("Comparison rejected", "label" => label, "reason" => error);
            failure()
        }
    }
}

/// `<label>:<operator> (scan:<value>, base:<operand>)`
pub fn reason(label: &str, operator: Operator, scan: Option<&ParsedValue>, base: Option<&str>) -> String {
    format!(
        "{}:{} (scan:{}, base:{})",
        label,
        operator.label(),
        scan.map(ParsedValue::display).unwrap_or(""),
        base.unwrap_or("")
    )
}
