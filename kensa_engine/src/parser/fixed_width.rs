//! Fixed-width extraction: consecutive character slices in declaration order

use super::{ParseError, ParsedScan, ScanBuilder, ScanParser};
use crate::types::ScanMode;
use kensa_compiler::{CompiledConfig, Extraction};

pub struct FixedWidthParser;

impl FixedWidthParser {
    fn widths(config: &CompiledConfig) -> impl Iterator<Item = usize> + '_ {
        config.fields.iter().map(|field| match field.extraction {
            Extraction::FixedWidth { width } => width,
            _ => 0,
        })
    }
}

impl ScanParser for FixedWidthParser {
    fn mode(&self) -> ScanMode {
        ScanMode::FixedWidth
    }

    fn parse(&self, raw: &str, config: &CompiledConfig) -> Result<ParsedScan, ParseError> {
        let chars: Vec<char> = raw.chars().collect();
        let required = Self::widths(config)
            .try_fold(0usize, |total, width| total.checked_add(width))
            .unwrap_or(usize::MAX);
        if chars.len() < required {
            return Err(ParseError::InsufficientLength {
                required,
                actual: chars.len(),
            });
        }

        let mut builder = ScanBuilder::new(config);
        let mut offset = 0;
        for (field, width) in config.fields.iter().zip(Self::widths(config)) {
            let slice: String = chars[offset..offset + width].iter().collect();
            offset += width;
            builder.accept(field, &slice)?;
        }
        Ok(builder.finish())
    }
}
