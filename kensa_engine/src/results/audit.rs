//! Audit row construction

use super::types::ScanOutcome;
use crate::parser::ParsedScan;
use crate::types::{Cell, TableRow};
use chrono::{DateTime, Utc};
use kensa_compiler::CompiledConfig;
use std::collections::BTreeMap;

/// Builds the one row appended per accepted scan
pub struct AuditRowBuilder<'a> {
    config: &'a CompiledConfig,
}

impl<'a> AuditRowBuilder<'a> {
    pub fn new(config: &'a CompiledConfig) -> Self {
        Self { config }
    }

    pub fn build(&self, scan: &ParsedScan, outcome: &ScanOutcome, captured_at: DateTime<Utc>) -> TableRow {
        let table = &self.config.table;
        let mut cells = BTreeMap::new();

        for field in &self.config.fields {
            if let Some(target) = &field.table_field {
                cells.insert(target.code.clone(), Cell::from_parsed(scan.value(&field.name), target.kind));
            }
        }

        cells.insert(table.scan_at.clone(), Cell::DateTime(Some(captured_at)));
        cells.insert(
            table.result.code.clone(),
            Cell::text(table.result.kind, outcome.tag().as_str()),
        );
        cells.insert(
            table.reason.code.clone(),
            Cell::text(table.reason.kind, &outcome.reasons.join(&self.config.reason_separator)),
        );

        TableRow::new(cells)
    }

    /// Existing rows minus blank placeholders, followed by `row`
    pub fn append(&self, existing: &[TableRow], row: TableRow) -> Vec<TableRow> {
        let mut rows = prune_blank_rows(existing);
        rows.push(row);
        rows
    }
}

/// Drop rows whose every cell is blank
pub fn prune_blank_rows(rows: &[TableRow]) -> Vec<TableRow> {
    rows.iter().filter(|row| !row.is_blank()).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coercion::coerce;
    use crate::parser::test_support::{field, raw_config, schema};
    use crate::types::{ScanMode, ValueKind};
    use chrono::TimeZone;
    use kensa_compiler::model::CellKind;
    use kensa_compiler::compile;

    fn config() -> CompiledConfig {
        let mut lot = field("lot", ValueKind::Text);
        lot.token_count = Some(1);
        lot.table_field = Some("lot_col".to_string());
        let mut qty = field("qty", ValueKind::Number);
        qty.token_count = Some(1);
        qty.table_field = Some("qty_col".to_string());
        let mut memo = field("memo", ValueKind::Text);
        memo.token_count = Some(1);

        let mut schema = schema();
        let log = schema.tables.get_mut("log").unwrap();
        log.columns.insert("lot_col".to_string(), CellKind::LongText);
        log.columns.insert("qty_col".to_string(), CellKind::Number);

        compile(&raw_config(ScanMode::Delimited, vec![lot, qty, memo]), &schema).unwrap()
    }

    fn placeholder() -> TableRow {
        let mut cells = BTreeMap::new();
        cells.insert("at".to_string(), Cell::DateTime(None));
        cells.insert("res".to_string(), Cell::ShortText(String::new()));
        TableRow::new(cells)
    }

    #[test]
    fn test_row_cells() {
        let config = config();
        let mut scan = ParsedScan::default();
        scan.values.insert("lot".to_string(), coerce("L01", ValueKind::Text, false).unwrap());
        let outcome = ScanOutcome {
            ok: false,
            config_error: false,
            reasons: vec!["r1".to_string(), "r2".to_string()],
        };
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();

        let row = AuditRowBuilder::new(&config).build(&scan, &outcome, at);

        assert_eq!(row.cell("lot_col"), Some(&Cell::LongText("L01".to_string())));
        assert_eq!(row.cell("qty_col"), Some(&Cell::Number(None)));
        assert_eq!(row.cell("at"), Some(&Cell::DateTime(Some(at))));
        assert_eq!(row.cell("res"), Some(&Cell::ShortText("NG".to_string())));
        assert_eq!(row.cell("why"), Some(&Cell::LongText("r1 / r2".to_string())));
        assert_eq!(row.cells.len(), 5);
    }

    #[test]
    fn test_prune_then_append_is_idempotent() {
        let config = config();
        let builder = AuditRowBuilder::new(&config);
        let outcome = ScanOutcome {
            ok: true,
            config_error: false,
            reasons: vec![],
        };
        let row = builder.build(&ParsedScan::default(), &outcome, Utc::now());

        let rows = builder.append(&[placeholder(), placeholder(), TableRow::default()], row.clone());
        assert_eq!(rows, vec![row.clone()]);

        let again = builder.append(&rows, row.clone());
        assert_eq!(again.len(), 2);
    }
}
