use super::kinds::CellKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Cell kinds of a host record's top-level fields and table columns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostSchema {
    #[serde(default)]
    pub fields: BTreeMap<String, CellKind>,
    #[serde(default)]
    pub tables: BTreeMap<String, TableSchema>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    #[serde(default)]
    pub columns: BTreeMap<String, CellKind>,
}

impl HostSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, code: &str, kind: CellKind) -> Self {
        self.fields.insert(code.to_string(), kind);
        self
    }

    pub fn with_table(mut self, code: &str, columns: &[(&str, CellKind)]) -> Self {
        let table = TableSchema {
            columns: columns
                .iter()
                .map(|(c, k)| (c.to_string(), *k))
                .collect(),
        };
        self.tables.insert(code.to_string(), table);
        self
    }

    pub fn field_kind(&self, code: &str) -> Option<CellKind> {
        self.fields.get(code).copied()
    }

    pub fn table(&self, code: &str) -> Option<&TableSchema> {
        self.tables.get(code)
    }
}

impl TableSchema {
    pub fn column_kind(&self, code: &str) -> Option<CellKind> {
        self.columns.get(code).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_lookup() {
        let schema = HostSchema::new()
            .with_field("lot_op1", CellKind::ShortText)
            .with_table("log", &[("at", CellKind::DateTime), ("res", CellKind::ShortText)]);

        assert_eq!(schema.field_kind("lot_op1"), Some(CellKind::ShortText));
        assert_eq!(schema.field_kind("nope"), None);
        assert_eq!(
            schema.table("log").and_then(|t| t.column_kind("at")),
            Some(CellKind::DateTime)
        );
    }

    #[test]
    fn test_deserialize() {
        let json = r#"{"fields": {"a": "number"}, "tables": {"log": {"columns": {"x": "long-text"}}}}"#;
        let schema: HostSchema = serde_json::from_str(json).unwrap();
        assert_eq!(schema.field_kind("a"), Some(CellKind::Number));
        assert_eq!(schema.table("log").unwrap().column_kind("x"), Some(CellKind::LongText));
    }
}
