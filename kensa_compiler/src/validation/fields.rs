use super::CompileError;
use crate::config::constants::{
    CONDITION_SLOTS, JOIN_SLOTS, MAX_FIELDS, MAX_LABEL_LENGTH, MAX_SCAN_LENGTH,
};
use crate::model::{FieldDefinition, RawConfig, ScanMode};
use std::collections::HashSet;

/// Check names, extraction specs and slot counts
pub fn validate_fields(config: &RawConfig) -> Vec<CompileError> {
    let mut errors = Vec::new();

    if config.fields.len() > MAX_FIELDS {
        errors.push(CompileError::TooManyFields {
            count: config.fields.len(),
            max: MAX_FIELDS,
        });
    }

    let mut seen = HashSet::new();
    let mut reported = HashSet::new();

    for (index, field) in config.fields.iter().enumerate() {
        let name = field.name.trim();

        if name.is_empty() {
            errors.push(CompileError::InvalidFieldName {
                index,
                reason: "name is blank".to_string(),
            });
        } else if name.chars().count() > MAX_LABEL_LENGTH {
            errors.push(CompileError::InvalidFieldName {
                index,
                reason: format!("name exceeds {} characters", MAX_LABEL_LENGTH),
            });
        } else if !seen.insert(name) && reported.insert(name) {
            errors.push(CompileError::DuplicateField {
                name: name.to_string(),
            });
        }

        if field.label.chars().count() > MAX_LABEL_LENGTH {
            errors.push(CompileError::InvalidFieldName {
                index,
                reason: format!("label exceeds {} characters", MAX_LABEL_LENGTH),
            });
        }

        if let Some(error) = check_extraction(field, config.mode) {
            errors.push(error);
        }

        errors.extend(check_slot_counts(field));
    }

    errors
}

fn check_extraction(field: &FieldDefinition, mode: ScanMode) -> Option<CompileError> {
    // A scan never holds more characters or tokens than MAX_SCAN_LENGTH
    let bounded = |n: i64| n > 0 && n <= MAX_SCAN_LENGTH as i64;
    let reason = match mode {
        ScanMode::FixedWidth => match field.width {
            Some(w) if bounded(w) => return None,
            Some(w) => format!("width must be between 1 and {}, found {}", MAX_SCAN_LENGTH, w),
            None => "width is required in fixed-width mode".to_string(),
        },
        ScanMode::Delimited => match field.token_count {
            Some(n) if bounded(n) => return None,
            Some(n) => format!("tokenCount must be between 1 and {}, found {}", MAX_SCAN_LENGTH, n),
            None => "tokenCount is required in delimited mode".to_string(),
        },
        // Neither delimiter means the field is skipped, which is allowed
        ScanMode::KeyBounded => return None,
    };

    Some(CompileError::InvalidExtractionSpec {
        field: field.name.clone(),
        reason,
    })
}

fn check_slot_counts(field: &FieldDefinition) -> Vec<CompileError> {
    let judge = &field.judge;
    [
        ("valueFieldRef", judge.value_field_ref.len(), CONDITION_SLOTS),
        ("opFieldRef", judge.op_field_ref.len(), CONDITION_SLOTS),
        ("joinFieldRef", judge.join_field_ref.len(), JOIN_SLOTS),
    ]
    .into_iter()
    .filter(|(_, count, max)| count > max)
    .map(|(slot, count, max)| CompileError::TooManySlots {
        field: field.name.clone(),
        slot,
        count,
        max,
    })
    .collect()
}
