//! Authoring configuration as read from JSON or TOML

use super::kinds::{Policy, ScanMode, ValueKind};
use serde::{Deserialize, Serialize};

/// Complete configuration document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConfig {
    pub fields: Vec<FieldDefinition>,
    pub table: TableMapping,
    pub mode: ScanMode,
    #[serde(default)]
    pub mode_params: ModeParams,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<Policy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason_separator: Option<String>,
}

/// One scanned field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type")]
    pub kind: ValueKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    #[serde(default)]
    pub judge: JudgeRefs,
}

impl FieldDefinition {
    /// Label for reasons, falling back to the name when blank
    pub fn display_label(&self) -> &str {
        if self.label.trim().is_empty() {
            &self.name
        } else {
            self.label.trim()
        }
    }
}

/// Host-record codes feeding the five conditions and four joins.
/// Blank entries (or `null` in JSON) mean "not configured".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JudgeRefs {
    #[serde(default)]
    pub value_field_ref: Vec<Option<String>>,
    #[serde(default)]
    pub op_field_ref: Vec<Option<String>>,
    #[serde(default)]
    pub join_field_ref: Vec<Option<String>>,
}

/// Audit table and its bookkeeping columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableMapping {
    pub code: String,
    pub scan_at_field: String,
    pub result_field: String,
    pub reason_field: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeParams {
    /// Token delimiter regex for delimited mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<String>,
    /// Key-bounded delimiters match case-sensitively when set
    #[serde(default)]
    pub case_sensitive: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compact_dates: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_wire_format() {
        let json = r#"{
            "fields": [{
                "name": "lot", "label": "ロット", "type": "text", "tableField": "lot_col",
                "before": "a=", "after": ";",
                "judge": {
                    "valueFieldRef": ["lot_v1", null],
                    "opFieldRef": ["lot_op1", "lot_op2"],
                    "joinFieldRef": ["lot_join1"]
                }
            }],
            "table": {"code": "log", "scanAtField": "at", "resultField": "res", "reasonField": "why"},
            "mode": "key-bounded",
            "modeParams": {"caseSensitive": true}
        }"#;

        let config: RawConfig = serde_json::from_str(json).unwrap();
        let field = &config.fields[0];
        assert_eq!(field.kind, ValueKind::Text);
        assert_eq!(field.table_field.as_deref(), Some("lot_col"));
        assert_eq!(field.judge.value_field_ref, vec![Some("lot_v1".to_string()), None]);
        assert_eq!(config.mode, ScanMode::KeyBounded);
        assert!(config.mode_params.case_sensitive);
        assert_eq!(config.policy, None);
    }

    #[test]
    fn test_toml_wire_format() {
        let toml_src = r#"
            mode = "fixed-width"
            policy = "lenient"

            [table]
            code = "log"
            scanAtField = "at"
            resultField = "res"
            reasonField = "why"

            [[fields]]
            name = "f1"
            type = "text"
            width = 4

            [[fields]]
            name = "f2"
            type = "number"
            width = 3
            [fields.judge]
            valueFieldRef = ["f2_v1"]
            opFieldRef = ["f2_op1"]
        "#;

        let config: RawConfig = toml::from_str(toml_src).unwrap();
        assert_eq!(config.fields.len(), 2);
        assert_eq!(config.fields[1].width, Some(3));
        assert_eq!(config.policy, Some(Policy::Lenient));
        assert!(config.fields[0].judge.op_field_ref.is_empty());
    }

    #[test]
    fn test_display_label_falls_back_to_name() {
        let field: FieldDefinition =
            serde_json::from_str(r#"{"name": "lot", "label": " ", "type": "text"}"#).unwrap();
        assert_eq!(field.display_label(), "lot");
    }
}
