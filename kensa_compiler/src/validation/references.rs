use super::CompileError;
use crate::model::{CellKind, HostSchema, RawConfig, TableSchema};

/// Check every host-record code the configuration points at
pub fn validate_references(config: &RawConfig, schema: &HostSchema) -> Vec<CompileError> {
    let mut errors = Vec::new();

    for field in &config.fields {
        let judge = &field.judge;
        let slots: [(&str, &[Option<String>], fn(CellKind) -> bool, &str); 3] = [
            ("valueFieldRef", &judge.value_field_ref, |k| k.is_scalar(), "a scalar cell"),
            ("opFieldRef", &judge.op_field_ref, |k| k.is_textual(), "a text cell"),
            ("joinFieldRef", &judge.join_field_ref, |k| k.is_textual(), "a text cell"),
        ];

        for (slot, codes, accepts, expected) in slots {
            for (i, code) in codes.iter().enumerate() {
                let Some(code) = code.as_deref().map(str::trim).filter(|c| !c.is_empty()) else {
                    continue;
                };
                let location = format!("field '{}' {}[{}]", field.name, slot, i);
                match schema.field_kind(code) {
                    None => errors.push(CompileError::UndefinedReference {
                        location,
                        code: code.to_string(),
                    }),
                    Some(kind) if !accepts(kind) => {
                        errors.push(CompileError::IncompatibleCellKind {
                            location,
                            code: code.to_string(),
                            actual: kind,
                            expected: expected.to_string(),
                        })
                    }
                    Some(_) => {}
                }
            }
        }
    }

    let mapping = &config.table;
    let Some(table) = schema.table(&mapping.code) else {
        errors.push(CompileError::UndefinedTable {
            code: mapping.code.clone(),
        });
        return errors;
    };

    let table_label = format!("table '{}'", mapping.code);
    check_column(
        &mut errors,
        table,
        &format!("{} scanAtField", table_label),
        &mapping.scan_at_field,
        &[CellKind::DateTime],
    );
    check_column(
        &mut errors,
        table,
        &format!("{} resultField", table_label),
        &mapping.result_field,
        &[CellKind::ShortText, CellKind::LongText],
    );
    check_column(
        &mut errors,
        table,
        &format!("{} reasonField", table_label),
        &mapping.reason_field,
        &[CellKind::LongText, CellKind::ShortText],
    );

    for field in &config.fields {
        if let Some(column) = field.table_field.as_deref().filter(|c| !c.trim().is_empty()) {
            check_column(
                &mut errors,
                table,
                &format!("field '{}' tableField", field.name),
                column.trim(),
                field.kind.compatible_cells(),
            );
        }
    }

    errors
}

fn check_column(
    errors: &mut Vec<CompileError>,
    table: &TableSchema,
    location: &str,
    code: &str,
    accepted: &[CellKind],
) {
    match table.column_kind(code) {
        None => errors.push(CompileError::UndefinedReference {
            location: location.to_string(),
            code: code.to_string(),
        }),
        Some(kind) if !accepted.contains(&kind) => errors.push(CompileError::IncompatibleCellKind {
            location: location.to_string(),
            code: code.to_string(),
            actual: kind,
            expected: accepted
                .iter()
                .map(CellKind::as_str)
                .collect::<Vec<_>>()
                .join(" or "),
        }),
        Some(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn schema() -> HostSchema {
        HostSchema::new()
            .with_field("lot_v1", CellKind::ShortText)
            .with_field("lot_op1", CellKind::ShortText)
            .with_field("lot_join1", CellKind::ShortText)
            .with_field("qty_v1", CellKind::Number)
            .with_field("tags", CellKind::Choices)
            .with_table(
                "log",
                &[
                    ("at", CellKind::DateTime),
                    ("res", CellKind::ShortText),
                    ("why", CellKind::LongText),
                    ("lot_col", CellKind::ShortText),
                    ("qty_col", CellKind::Number),
                ],
            )
    }

    fn config(fields: &str, table: &str) -> RawConfig {
        let json = format!(
            r#"{{"fields": {}, "mode": "key-bounded",
                "table": {{"code": "{}", "scanAtField": "at", "resultField": "res", "reasonField": "why"}}}}"#,
            fields, table
        );
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn test_all_references_resolve() {
        let cfg = config(
            r#"[{"name": "lot", "type": "text", "tableField": "lot_col",
                 "judge": {"valueFieldRef": ["lot_v1"], "opFieldRef": ["lot_op1"], "joinFieldRef": ["lot_join1"]}},
                {"name": "qty", "type": "number", "tableField": "qty_col",
                 "judge": {"valueFieldRef": ["qty_v1"]}}]"#,
            "log",
        );
        assert!(validate_references(&cfg, &schema()).is_empty());
    }

    #[test]
    fn test_undefined_reference() {
        let cfg = config(
            r#"[{"name": "lot", "type": "text", "judge": {"opFieldRef": [null, "lot_op9"]}}]"#,
            "log",
        );
        let errors = validate_references(&cfg, &schema());

        assert_eq!(errors.len(), 1);
        assert_matches!(
            &errors[0],
            CompileError::UndefinedReference { location, code }
                if location == "field 'lot' opFieldRef[1]" && code == "lot_op9"
        );
    }

    #[test]
    fn test_operator_must_be_textual() {
        let cfg = config(
            r#"[{"name": "lot", "type": "text", "judge": {"opFieldRef": ["qty_v1"], "valueFieldRef": ["tags"]}}]"#,
            "log",
        );
        let errors = validate_references(&cfg, &schema());

        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| matches!(e, CompileError::IncompatibleCellKind { .. })));
    }

    #[test]
    fn test_table_field_kind_must_match() {
        let cfg = config(r#"[{"name": "lot", "type": "text", "tableField": "qty_col"}]"#, "log");
        let errors = validate_references(&cfg, &schema());

        assert_matches!(
            errors.as_slice(),
            [CompileError::IncompatibleCellKind { actual: CellKind::Number, .. }]
        );
    }

    #[test]
    fn test_undefined_table() {
        let cfg = config(r#"[{"name": "lot", "type": "text"}]"#, "history");
        assert_matches!(
            validate_references(&cfg, &schema()).as_slice(),
            [CompileError::UndefinedTable { .. }]
        );
    }
}
