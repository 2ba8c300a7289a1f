//! Key-bounded extraction: text between a field's `before` and `after` literals

use super::{ParseError, ParsedScan, ScanBuilder, ScanParser};
use crate::types::ScanMode;
use kensa_compiler::logging::codes;
use kensa_compiler::{log_debug, log_warning};
use kensa_compiler::{CompiledConfig, Extraction};

/// A field with no occurrence is reported as missing; more than one
/// occurrence is a field-scoped configuration error.
pub struct KeyBoundedParser;

impl ScanParser for KeyBoundedParser {
    fn mode(&self) -> ScanMode {
        ScanMode::KeyBounded
    }

    fn parse(&self, raw: &str, config: &CompiledConfig) -> Result<ParsedScan, ParseError> {
        let mut builder = ScanBuilder::new(config);

        for field in &config.fields {
            let Extraction::KeyBounded { pattern: Some(pattern) } = &field.extraction else {
                continue;
            };

            let found: Vec<&str> = pattern
                .captures_iter(raw)
                .filter_map(|caps| caps.get(1))
                .map(|m| m.as_str())
                .collect();

            match found.as_slice() {
                [] => {
                    log_debug!("Key not found in scan", "field" => &field.name);
                    builder.missing(field);
                }
                [text] => builder.accept(field, text)?,
                _ => {
                    log_warning!(code = codes::parse::DUPLICATE_KEY, "Key occurs more than once",
                        "field" => &field.name,
                        "occurrences" => found.len()
                    );
                    builder.field_error(field, format!("{}の読み取り結果が不正です（重複）", field.label));
                }
            }
        }

        Ok(builder.finish())
    }
}
