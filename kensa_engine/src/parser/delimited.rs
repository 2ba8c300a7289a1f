//! Delimited-token extraction

use super::{ParseError, ParsedScan, ScanBuilder, ScanParser};
use crate::coercion::is_combined_datetime;
use crate::types::ScanMode;
use kensa_compiler::{CompiledConfig, Extraction};

/// Splits on the configured delimiter and hands each field `tokenCount`
/// tokens, re-joined with a single space
pub struct DelimitedParser;

impl DelimitedParser {
    fn token_count(extraction: &Extraction) -> usize {
        match extraction {
            Extraction::Delimited { token_count } => *token_count,
            _ => 0,
        }
    }

    /// Tokens each field consumes. A two-token field takes a single token
    /// when that token already holds a whole datetime.
    fn spans(tokens: &[&str], config: &CompiledConfig) -> Option<Vec<usize>> {
        let mut offset = 0usize;
        let mut spans = Vec::with_capacity(config.fields.len());
        for field in &config.fields {
            let declared = Self::token_count(&field.extraction);
            let span = match tokens.get(offset) {
                Some(token) if declared == 2 && is_combined_datetime(token) => 1,
                _ => declared,
            };
            offset = offset.checked_add(span)?;
            spans.push(span);
        }
        Some(spans)
    }
}

impl ScanParser for DelimitedParser {
    fn mode(&self) -> ScanMode {
        ScanMode::Delimited
    }

    fn parse(&self, raw: &str, config: &CompiledConfig) -> Result<ParsedScan, ParseError> {
        let tokens: Vec<&str> = config
            .delimiter
            .split(raw)
            .filter(|token| !token.is_empty())
            .collect();

        let spans = Self::spans(&tokens, config);
        let required = spans
            .as_ref()
            .map_or(usize::MAX, |spans| spans.iter().sum());
        let spans = match spans {
            Some(spans) if tokens.len() >= required => spans,
            _ => {
                return Err(ParseError::InsufficientTokens {
                    required,
                    actual: tokens.len(),
                })
            }
        };

        let mut builder = ScanBuilder::new(config);
        let mut offset = 0;
        for (field, count) in config.fields.iter().zip(spans) {
            let text = tokens[offset..offset + count].join(" ");
            offset += count;
            builder.accept(field, &text)?;
        }
        Ok(builder.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::types::ValueKind;
    use assert_matches::assert_matches;
    use kensa_compiler::model::FieldDefinition;

    fn tokens(name: &str, kind: ValueKind, count: i64) -> FieldDefinition {
        let mut f = field(name, kind);
        f.token_count = Some(count);
        f
    }

    #[test]
    fn test_whitespace_tokens() {
        let config = compiled(&raw_config(
            ScanMode::Delimited,
            vec![tokens("a", ValueKind::Text, 1), tokens("b", ValueKind::Number, 1)],
        ));

        let scan = DelimitedParser.parse("TEST 10", &config).unwrap();
        assert_eq!(scan.value("a").map(|v| v.display()), Some("TEST"));
        assert_eq!(scan.value("b").and_then(|v| v.as_number()), Some(10.0));
    }

    #[test]
    fn test_too_few_tokens() {
        let config = compiled(&raw_config(
            ScanMode::Delimited,
            vec![tokens("a", ValueKind::Text, 1), tokens("b", ValueKind::Number, 1)],
        ));

        let error = DelimitedParser.parse("TEST", &config).unwrap_err();
        assert_matches!(error, ParseError::InsufficientTokens { required: 2, actual: 1 });
        assert!(error.to_string().contains("トークン数が不足"));
    }

    #[test]
    fn test_empty_tokens_are_discarded() {
        let mut raw = raw_config(
            ScanMode::Delimited,
            vec![tokens("a", ValueKind::Text, 1), tokens("b", ValueKind::Text, 1)],
        );
        raw.mode_params.delimiter = Some(",".to_string());
        let config = compiled(&raw);

        let scan = DelimitedParser.parse(",,X,,Y,", &config).unwrap();
        assert_eq!(scan.value("a").map(|v| v.display()), Some("X"));
        assert_eq!(scan.value("b").map(|v| v.display()), Some("Y"));
    }

    #[test]
    fn test_datetime_across_two_tokens() {
        let config = compiled(&raw_config(
            ScanMode::Delimited,
            vec![
                tokens("lot", ValueKind::Text, 1),
                tokens("at", ValueKind::DateTime, 2),
                tokens("qty", ValueKind::Number, 1),
            ],
        ));

        let scan = DelimitedParser
            .parse("L01 2024-03-01 08:15 5 extra", &config)
            .unwrap();
        assert_eq!(scan.value("at").map(|v| v.display()), Some("2024-03-01 08:15"));
        assert_eq!(scan.value("qty").and_then(|v| v.as_number()), Some(5.0));
    }

    #[test]
    fn test_combined_datetime_token() {
        let mut raw = raw_config(ScanMode::Delimited, vec![tokens("at", ValueKind::DateTime, 1)]);
        raw.mode_params.delimiter = Some(",".to_string());
        let config = compiled(&raw);

        let scan = DelimitedParser.parse("2024-03-01 08:15", &config).unwrap();
        assert_eq!(scan.value("at").map(|v| v.display()), Some("2024-03-01 08:15"));
    }

    #[test]
    fn test_compact_dates_enabled_by_default() {
        let config = compiled(&raw_config(ScanMode::Delimited, vec![tokens("d", ValueKind::Date, 1)]));

        let scan = DelimitedParser.parse("20240301", &config).unwrap();
        assert_eq!(scan.value("d").map(|v| v.display()), Some("2024-03-01"));
    }

    #[test]
    fn test_two_token_field_takes_one_combined_token() {
        let mut raw = raw_config(
            ScanMode::Delimited,
            vec![tokens("at", ValueKind::DateTime, 2), tokens("qty", ValueKind::Number, 1)],
        );
        raw.mode_params.delimiter = Some(",".to_string());
        let config = compiled(&raw);

        let scan = DelimitedParser.parse("2024-03-01 08:15,5", &config).unwrap();
        assert_eq!(scan.value("at").map(|v| v.display()), Some("2024-03-01 08:15"));
        assert_eq!(scan.value("qty").and_then(|v| v.as_number()), Some(5.0));

        let error = DelimitedParser.parse("2024-03-01 08:15", &config).unwrap_err();
        assert_matches!(error, ParseError::InsufficientTokens { required: 2, actual: 1 });
    }
}
