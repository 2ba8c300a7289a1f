//! Host record: operands, operators and the audit row collection

use super::cell::Cell;
use kensa_compiler::model::{HostSchema, TableSchema};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostRecord {
    pub id: String,
    #[serde(default)]
    pub fields: BTreeMap<String, Cell>,
    #[serde(default)]
    pub tables: BTreeMap<String, Vec<TableRow>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub cells: BTreeMap<String, Cell>,
}

impl HostRecord {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Self::default()
        }
    }

    pub fn with_field(mut self, code: &str, cell: Cell) -> Self {
        self.fields.insert(code.to_string(), cell);
        self
    }

    pub fn with_rows(mut self, table: &str, rows: Vec<TableRow>) -> Self {
        self.tables.insert(table.to_string(), rows);
        self
    }

    pub fn field(&self, code: &str) -> Option<&Cell> {
        self.fields.get(code)
    }

    /// Rows of a table; empty when the table has none yet
    pub fn rows(&self, table: &str) -> &[TableRow] {
        self.tables.get(table).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn set_rows(&mut self, table: &str, rows: Vec<TableRow>) {
        self.tables.insert(table.to_string(), rows);
    }
}

impl TableRow {
    pub fn new(cells: BTreeMap<String, Cell>) -> Self {
        Self { id: None, cells }
    }

    pub fn cell(&self, code: &str) -> Option<&Cell> {
        self.cells.get(code)
    }

    /// A placeholder row: every cell blank (or no cells at all)
    pub fn is_blank(&self) -> bool {
        self.cells.values().all(Cell::is_blank)
    }
}

/// Derive a host schema from a record's cells
pub trait RecordSchemaExt {
    fn from_record(record: &HostRecord) -> HostSchema;

    /// Fill gaps in `self` with kinds seen in the record
    fn merge_record(self, record: &HostRecord) -> HostSchema;
}

impl RecordSchemaExt for HostSchema {
    fn from_record(record: &HostRecord) -> HostSchema {
        let fields = record
            .fields
            .iter()
            .map(|(code, cell)| (code.clone(), cell.kind()))
            .collect();

        let tables = record
            .tables
            .iter()
            .map(|(code, rows)| {
                let mut table = TableSchema::default();
                for row in rows {
                    for (column, cell) in &row.cells {
                        table.columns.entry(column.clone()).or_insert(cell.kind());
                    }
                }
                (code.clone(), table)
            })
            .collect();

        HostSchema { fields, tables }
    }

    fn merge_record(mut self, record: &HostRecord) -> HostSchema {
        let derived = HostSchema::from_record(record);
        for (code, kind) in derived.fields {
            self.fields.entry(code).or_insert(kind);
        }
        for (code, table) in derived.tables {
            let target = self.tables.entry(code).or_default();
            for (column, kind) in table.columns {
                target.columns.entry(column).or_insert(kind);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kensa_compiler::model::CellKind;

    fn placeholder() -> TableRow {
        let mut cells = BTreeMap::new();
        cells.insert("at".to_string(), Cell::DateTime(None));
        cells.insert("res".to_string(), Cell::ShortText(String::new()));
        cells.insert("tags".to_string(), Cell::Choices(vec![]));
        TableRow::new(cells)
    }

    #[test]
    fn test_blank_rows() {
        assert!(placeholder().is_blank());
        assert!(TableRow::default().is_blank());

        let mut row = placeholder();
        row.cells.insert("res".to_string(), Cell::ShortText("OK".to_string()));
        assert!(!row.is_blank());
    }

    #[test]
    fn test_schema_from_record() {
        let record = HostRecord::new("1")
            .with_field("lot_op1", Cell::ShortText("同じ".to_string()))
            .with_field("qty_v1", Cell::Number(Some(3.0)))
            .with_rows("log", vec![placeholder()]);

        let schema = HostSchema::from_record(&record);
        assert_eq!(schema.field_kind("qty_v1"), Some(CellKind::Number));
        assert_eq!(
            schema.table("log").and_then(|t| t.column_kind("tags")),
            Some(CellKind::Choices)
        );
    }

    #[test]
    fn test_explicit_schema_wins_on_merge() {
        let record = HostRecord::new("1").with_field("memo", Cell::ShortText(String::new()));
        let schema = HostSchema::new()
            .with_field("memo", CellKind::LongText)
            .merge_record(&record);

        assert_eq!(schema.field_kind("memo"), Some(CellKind::LongText));
    }

    #[test]
    fn test_record_json() {
        let json = r#"{
            "id": "42",
            "fields": {"lot_v1": {"type": "short-text", "value": "A1"}},
            "tables": {"log": [{"cells": {"res": {"type": "short-text", "value": ""}}}]}
        }"#;
        let record: HostRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.rows("log").len(), 1);
        assert!(record.rows("missing").is_empty());
        assert_eq!(record.field("lot_v1").and_then(Cell::render).as_deref(), Some("A1"));
    }
}
