//! # Scan parsing
//!
//! One [`ScanParser`] trait with a strategy per [`ScanMode`]. Every strategy
//! locates each field's text, then hands it to [`coercion`](crate::coercion)
//! through a shared [`ScanBuilder`] that applies the policy:
//! a coercion failure aborts the scan under strict policy and becomes a
//! field-scoped configuration error under lenient policy.

pub mod delimited;
pub mod fixed_width;
pub mod key_bounded;

use crate::coercion::{coerce, CoercionError};
use crate::types::{ParsedValue, ScanMode};
use kensa_compiler::config::constants::MAX_SCAN_LENGTH;
use kensa_compiler::logging::codes::{self, Code};
use kensa_compiler::{log_debug, log_error, log_success, log_warning};
use kensa_compiler::{CompiledConfig, CompiledField};
use serde::Serialize;
use std::collections::BTreeMap;

pub use delimited::DelimitedParser;
pub use fixed_width::FixedWidthParser;
pub use key_bounded::KeyBoundedParser;

/// Errors that abort a scan before any row is written
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("スキャン文字列が空です")]
    Empty,

    #[error("スキャン文字列が長すぎます（{length}文字、上限{max}文字）")]
    TooLong { length: usize, max: usize },

    #[error("文字数が不足しています（必要: {required}文字、実際: {actual}文字）")]
    InsufficientLength { required: usize, actual: usize },

    #[error("トークン数が不足しています（必要: {required}、実際: {actual}）")]
    InsufficientTokens { required: usize, actual: usize },

    #[error("{label}の値が不正です（{source}）")]
    InvalidValue {
        label: String,
        #[source]
        source: CoercionError,
    },
}

impl ParseError {
    pub fn error_code(&self) -> Code {
        match self {
            ParseError::Empty => codes::parse::EMPTY_SCAN,
            ParseError::TooLong { .. } => codes::parse::SCAN_TOO_LONG,
            ParseError::InsufficientLength { .. } => codes::parse::INSUFFICIENT_LENGTH,
            ParseError::InsufficientTokens { .. } => codes::parse::INSUFFICIENT_TOKENS,
            ParseError::InvalidValue { .. } => codes::parse::COERCION_FAILED,
        }
    }
}

/// Everything one scan yielded
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedScan {
    /// Coerced values by field name; fields without text are absent
    pub values: BTreeMap<String, ParsedValue>,
    /// Field-scoped configuration errors by field name
    pub field_errors: BTreeMap<String, String>,
    /// Labels of key-bounded fields with no occurrence, in declaration order
    pub missing: Vec<String>,
}

impl ParsedScan {
    pub fn value(&self, name: &str) -> Option<&ParsedValue> {
        self.values.get(name)
    }

    pub fn field_error(&self, name: &str) -> Option<&str> {
        self.field_errors.get(name).map(String::as_str)
    }

    /// Display strings by field name
    pub fn display_values(&self) -> BTreeMap<String, String> {
        self.values
            .iter()
            .map(|(name, value)| (name.clone(), value.display().to_string()))
            .collect()
    }
}

/// Extraction strategy for one scan mode
pub trait ScanParser {
    fn mode(&self) -> ScanMode;

    /// Locate and coerce every field of `config` in `raw`
    fn parse(&self, raw: &str, config: &CompiledConfig) -> Result<ParsedScan, ParseError>;
}

/// Strategy for a mode
pub fn create_parser(mode: ScanMode) -> Box<dyn ScanParser> {
    match mode {
        ScanMode::FixedWidth => Box::new(FixedWidthParser),
        ScanMode::Delimited => Box::new(DelimitedParser),
        ScanMode::KeyBounded => Box::new(KeyBoundedParser),
    }
}

/// Check the raw scan, then parse it with the configured mode's strategy
pub fn parse_scan(raw: &str, config: &CompiledConfig) -> Result<ParsedScan, ParseError> {
    let raw = raw.trim_end_matches(['\r', '\n']);

    let result = check_input(raw).and_then(|_| create_parser(config.mode).parse(raw, config));

    match &result {
        Ok(scan) => {
            log_success!(codes::success::SCAN_PARSED, "Scan parsed",
                "mode" => config.mode,
                "values" => scan.values.len(),
                "field_errors" => scan.field_errors.len(),
                "missing" => scan.missing.len()
            );
        }
        Err(error) => {
            log_error!(error.error_code(), "Scan rejected",
                "mode" => config.mode,
                "reason" => error
            );
        }
    }
    result
}

fn check_input(raw: &str) -> Result<(), ParseError> {
    if raw.trim().is_empty() {
        return Err(ParseError::Empty);
    }
    let length = raw.chars().count();
    if length > MAX_SCAN_LENGTH {
        return Err(ParseError::TooLong {
            length,
            max: MAX_SCAN_LENGTH,
        });
    }
    Ok(())
}

/// Collects located field text into a [`ParsedScan`], applying the policy
pub(crate) struct ScanBuilder<'a> {
    config: &'a CompiledConfig,
    scan: ParsedScan,
}

impl<'a> ScanBuilder<'a> {
    pub(crate) fn new(config: &'a CompiledConfig) -> Self {
        Self {
            config,
            scan: ParsedScan::default(),
        }
    }

    /// Coerce located text; blank text yields no value
    pub(crate) fn accept(&mut self, field: &CompiledField, text: &str) -> Result<(), ParseError> {
        let text = text.trim();
        if text.is_empty() {
            log_debug!("Field text is blank", "field" => &field.name);
            return Ok(());
        }

        match coerce(text, field.kind, self.config.compact_dates) {
            Ok(value) => {
                self.scan.values.insert(field.name.clone(), value);
                Ok(())
            }
            Err(source) if self.config.policy.is_strict() => Err(ParseError::InvalidValue {
                label: field.label.clone(),
                source,
            }),
            Err(source) => {
                log_warning!(code = codes::parse::COERCION_FAILED, "Field value could not be coerced",
                    "field" => &field.name,
                    "kind" => field.kind
                );
                let reason = format!("{}の値が不正です（{}）", field.label, source);
                self.field_error(field, reason);
                Ok(())
            }
        }
    }

    pub(crate) fn field_error(&mut self, field: &CompiledField, reason: String) {
        self.scan.field_errors.insert(field.name.clone(), reason);
    }

    pub(crate) fn missing(&mut self, field: &CompiledField) {
        self.scan.missing.push(field.label.clone());
    }

    pub(crate) fn finish(self) -> ParsedScan {
        self.scan
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use kensa_compiler::model::{
        CellKind, FieldDefinition, HostSchema, JudgeRefs, ModeParams, RawConfig, ScanMode,
        TableMapping, ValueKind,
    };
    use kensa_compiler::{compile, CompiledConfig};

    pub(crate) fn field(name: &str, kind: ValueKind) -> FieldDefinition {
        FieldDefinition {
            name: name.to_string(),
            label: String::new(),
            kind,
            table_field: None,
            width: None,
            token_count: None,
            before: None,
            after: None,
            judge: JudgeRefs::default(),
        }
    }

    pub(crate) fn raw_config(mode: ScanMode, fields: Vec<FieldDefinition>) -> RawConfig {
        RawConfig {
            fields,
            table: TableMapping {
                code: "log".to_string(),
                scan_at_field: "at".to_string(),
                result_field: "res".to_string(),
                reason_field: "why".to_string(),
            },
            mode,
            mode_params: ModeParams::default(),
            policy: None,
            reason_separator: None,
        }
    }

    pub(crate) fn schema() -> HostSchema {
        HostSchema::new().with_table(
            "log",
            &[
                ("at", CellKind::DateTime),
                ("res", CellKind::ShortText),
                ("why", CellKind::LongText),
            ],
        )
    }

    pub(crate) fn compiled(raw: &RawConfig) -> CompiledConfig {
        compile(raw, &schema()).expect("test configuration compiles")
    }
}
