//! Configuration compile pipeline (load -> structural checks -> schema checks -> build)

use crate::compiled::{
    AuditTable, ColumnTarget, CompiledConfig, CompiledField, Extraction, JudgeSlots,
};
use crate::config::runtime::EnginePreferences;
use crate::loader;
use crate::logging::codes;
use crate::model::{CellKind, FieldDefinition, HostSchema, RawConfig, ScanMode, TableSchema};
use crate::validation::{self, CompileError, CompileErrors};
use crate::{log_error, log_success};
use regex::{Regex, RegexBuilder};
use std::path::Path;

/// Default token delimiter for delimited mode
pub const DEFAULT_DELIMITER: &str = r"\s+";

/// Compile a configuration against a host schema using environment preferences
pub fn compile(raw: &RawConfig, schema: &HostSchema) -> Result<CompiledConfig, CompileErrors> {
    compile_with_preferences(raw, schema, &EnginePreferences::default())
}

/// Compile with explicit engine preferences
pub fn compile_with_preferences(
    raw: &RawConfig,
    schema: &HostSchema,
    preferences: &EnginePreferences,
) -> Result<CompiledConfig, CompileErrors> {
    let mut errors = validation::validate_fields(raw);
    errors.extend(validation::validate_references(raw, schema));

    let delimiter = match build_delimiter(raw.mode_params.delimiter.as_deref()) {
        Ok(regex) => Some(regex),
        Err(error) => {
            errors.push(error);
            None
        }
    };

    let empty_table = TableSchema::default();
    let table_schema = schema.table(&raw.table.code).unwrap_or(&empty_table);

    let mut fields = Vec::with_capacity(raw.fields.len());
    for field in &raw.fields {
        match build_field(field, raw, table_schema) {
            Ok(compiled) => fields.push(compiled),
            Err(error) => errors.push(error),
        }
    }

    let delimiter = match delimiter {
        Some(regex) if errors.is_empty() => regex,
        _ => {
            for error in &errors {
                log_error!(error.error_code(), &error.to_string());
            }
            return Err(CompileErrors::new(errors));
        }
    };

    let reason_separator = raw
        .reason_separator
        .clone()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| preferences.reason_separator.clone());

    let compiled = CompiledConfig {
        fields,
        table: audit_table(raw, table_schema),
        mode: raw.mode,
        policy: raw.policy.unwrap_or_else(|| raw.mode.default_policy()),
        compact_dates: raw
            .mode_params
            .compact_dates
            .unwrap_or_else(|| raw.mode.default_compact_dates()),
        delimiter,
        reason_separator,
    };

    log_success!(codes::success::CONFIG_COMPILED, "Configuration compiled",
        "fields" => compiled.field_count(),
        "mode" => compiled.mode,
        "policy" => compiled.policy
    );

    Ok(compiled)
}

/// Load a configuration file and compile it
pub fn compile_file(path: &Path, schema: &HostSchema) -> Result<CompiledConfig, CompileErrors> {
    let raw = loader::load_config(path)?;
    compile(&raw, schema)
}

fn build_delimiter(pattern: Option<&str>) -> Result<Regex, CompileError> {
    let pattern = pattern.filter(|p| !p.is_empty()).unwrap_or(DEFAULT_DELIMITER);

    let regex = Regex::new(pattern).map_err(|e| CompileError::InvalidDelimiter {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;

    if regex.is_match("") {
        return Err(CompileError::InvalidDelimiter {
            pattern: pattern.to_string(),
            reason: "pattern matches the empty string".to_string(),
        });
    }

    Ok(regex)
}

fn audit_table(raw: &RawConfig, table: &TableSchema) -> AuditTable {
    let mapping = &raw.table;
    let column = |code: &str, fallback: CellKind| {
        ColumnTarget::new(code, table.column_kind(code).unwrap_or(fallback))
    };

    AuditTable {
        code: mapping.code.clone(),
        scan_at: mapping.scan_at_field.clone(),
        result: column(&mapping.result_field, CellKind::ShortText),
        reason: column(&mapping.reason_field, CellKind::LongText),
    }
}

fn build_field(
    field: &FieldDefinition,
    raw: &RawConfig,
    table: &TableSchema,
) -> Result<CompiledField, CompileError> {
    let extraction = match raw.mode {
        // Non-positive values were already reported by validate_fields
        ScanMode::FixedWidth => Extraction::FixedWidth {
            width: field.width.unwrap_or(0).max(0) as usize,
        },
        ScanMode::Delimited => Extraction::Delimited {
            token_count: field.token_count.unwrap_or(0).max(0) as usize,
        },
        ScanMode::KeyBounded => Extraction::KeyBounded {
            pattern: key_bounded_pattern(
                field.before.as_deref(),
                field.after.as_deref(),
                raw.mode_params.case_sensitive,
            )
            .map_err(|e| CompileError::InvalidExtractionSpec {
                field: field.name.clone(),
                reason: e.to_string(),
            })?,
        },
    };

    let judge = &field.judge;
    Ok(CompiledField {
        name: field.name.trim().to_string(),
        label: field.display_label().to_string(),
        kind: field.kind,
        table_field: field
            .table_field
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(|code| {
                let fallback = field.kind.compatible_cells()[0];
                ColumnTarget::new(code, table.column_kind(code).unwrap_or(fallback))
            }),
        extraction,
        judge: JudgeSlots::from_refs(
            &judge.value_field_ref,
            &judge.op_field_ref,
            &judge.join_field_ref,
        ),
    })
}

/// Build the `before(.*?)after` matcher for a key-bounded field.
///
/// An absent side is anchored at the start or end of the scan; with neither
/// side the field is skipped and `None` is returned.
pub fn key_bounded_pattern(
    before: Option<&str>,
    after: Option<&str>,
    case_sensitive: bool,
) -> Result<Option<Regex>, regex::Error> {
    let before = before.filter(|s| !s.is_empty());
    let after = after.filter(|s| !s.is_empty());

    let pattern = match (before, after) {
        (None, None) => return Ok(None),
        (Some(b), Some(a)) => format!("{}(.*?){}", regex::escape(b), regex::escape(a)),
        (Some(b), None) => format!("{}(.*)$", regex::escape(b)),
        (None, Some(a)) => format!("^(.*?){}", regex::escape(a)),
    };

    RegexBuilder::new(&pattern)
        .case_insensitive(!case_sensitive)
        .dot_matches_new_line(true)
        .build()
        .map(Some)
}
