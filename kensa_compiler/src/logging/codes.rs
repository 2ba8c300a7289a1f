//! Log codes and their classification
//!
//! `K` codes describe problems, `S` codes milestones. The first digit of a
//! `K` code is its stage: 0 system, 1 configuration, 2 parse, 3 evaluation,
//! 4 persistence. `K15x` belongs to resolution, which runs once per session.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    System,
    Configuration,
    Resolution,
    Parse,
    Evaluation,
    Persistence,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::System => "System",
            Category::Configuration => "Configuration",
            Category::Resolution => "Resolution",
            Category::Parse => "Parse",
            Category::Evaluation => "Evaluation",
            Category::Persistence => "Persistence",
        }
    }
}

/// What the caller can do after an event with this code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Nothing further can run until the cause is fixed
    Halt,
    /// The current item is lost but the next one may proceed
    Recover,
}

#[derive(Debug, Clone)]
pub struct CodeInfo {
    pub code: &'static str,
    pub category: Category,
    pub severity: Severity,
    pub disposition: Disposition,
    pub description: &'static str,
    pub action: &'static str,
}

pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("K001");
}

pub mod config {
    use super::Code;

    pub const CONFIG_FILE_UNREADABLE: Code = Code::new("K101");
    pub const CONFIG_FORMAT_ERROR: Code = Code::new("K102");
    pub const CONFIG_TOO_LARGE: Code = Code::new("K103");

    pub const INVALID_FIELD_NAME: Code = Code::new("K110");
    pub const DUPLICATE_FIELD: Code = Code::new("K111");
    pub const TOO_MANY_FIELDS: Code = Code::new("K112");
    pub const INVALID_EXTRACTION_SPEC: Code = Code::new("K113");
    pub const TOO_MANY_SLOTS: Code = Code::new("K114");
    pub const INVALID_DELIMITER: Code = Code::new("K115");

    pub const UNDEFINED_REFERENCE: Code = Code::new("K120");
    pub const INCOMPATIBLE_CELL_KIND: Code = Code::new("K121");
    pub const UNDEFINED_TABLE: Code = Code::new("K122");
}

pub mod resolution {
    use super::Code;

    pub const UNKNOWN_OPERATOR: Code = Code::new("K150");
    pub const UNSUPPORTED_OPERATOR: Code = Code::new("K151");
    pub const RECORD_FIELD_MISSING: Code = Code::new("K152");
}

pub mod parse {
    use super::Code;

    pub const EMPTY_SCAN: Code = Code::new("K201");
    pub const SCAN_TOO_LONG: Code = Code::new("K202");
    pub const INSUFFICIENT_LENGTH: Code = Code::new("K203");
    pub const INSUFFICIENT_TOKENS: Code = Code::new("K204");
    pub const COERCION_FAILED: Code = Code::new("K205");
    pub const DUPLICATE_KEY: Code = Code::new("K206");
    pub const KEY_NOT_FOUND: Code = Code::new("K207");
}

pub mod evaluation {
    use super::Code;

    pub const SLOT_OPERATOR_MISSING: Code = Code::new("K301");
    pub const JOIN_MISSING: Code = Code::new("K302");
    pub const BUSINESS_RULE_FAILED: Code = Code::new("K303");
}

pub mod persistence {
    use super::Code;

    pub const STORE_REJECTED: Code = Code::new("K401");
    pub const STORE_IO: Code = Code::new("K402");
    pub const RECORD_FORMAT_ERROR: Code = Code::new("K403");
}

pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("S001");
    pub const CONFIG_LOADED: Code = Code::new("S010");
    pub const CONFIG_COMPILED: Code = Code::new("S011");
    pub const PLAN_RESOLVED: Code = Code::new("S020");
    pub const SCAN_PARSED: Code = Code::new("S030");
    pub const SCAN_JUDGED: Code = Code::new("S031");
    pub const ROW_APPENDED: Code = Code::new("S040");
}

use Category::*;
use Disposition::*;
use Severity::*;

type Row = (&'static str, Category, Severity, Disposition, &'static str, &'static str);

#[rustfmt::skip]
const TABLE: &[Row] = &[
    ("K001", System, Critical, Halt, "Internal engine error", "Report the scan input and configuration"),

    ("K101", Configuration, High, Halt, "Configuration file could not be read", "Check the path and permissions"),
    ("K102", Configuration, High, Halt, "Configuration is not valid JSON or TOML", "Fix the reported syntax"),
    ("K103", Configuration, High, Halt, "Configuration file exceeds the size limit", "Reduce the configuration"),
    ("K110", Configuration, High, Halt, "Field name or label is blank or too long", "Give every field a short unique name"),
    ("K111", Configuration, High, Halt, "Duplicate field name", "Rename one of the fields"),
    ("K112", Configuration, High, Halt, "Too many fields", "Reduce the number of scanned fields"),
    ("K113", Configuration, High, Halt, "Extraction spec missing or not positive", "Set width, tokenCount or before/after"),
    ("K114", Configuration, High, Halt, "Too many judge slots", "Use at most five conditions and four joins"),
    ("K115", Configuration, High, Halt, "Delimiter pattern is unusable", "Fix the delimiter regular expression"),
    ("K120", Configuration, High, Halt, "Reference to a code missing from the host schema", "Add the host field or fix the reference"),
    ("K121", Configuration, Medium, Halt, "Host cell kind incompatible with its use", "Change the column type or the field type"),
    ("K122", Configuration, High, Halt, "Audit table missing from the host schema", "Create the table or fix table.code"),

    ("K150", Resolution, High, Halt, "Operator label not recognised", "Choose an operator from the list"),
    ("K151", Resolution, High, Halt, "Operator not supported for the field type", "Choose an operator valid for the type"),
    ("K152", Resolution, High, Halt, "Referenced field missing from the host record", "Reload the host record"),

    ("K201", Parse, Low, Recover, "Scan input is empty", "Scan again"),
    ("K202", Parse, Medium, Recover, "Scan input exceeds the length limit", "Check the scanner settings"),
    ("K203", Parse, Medium, Recover, "Scan shorter than the configured widths", "Rescan"),
    ("K204", Parse, Medium, Recover, "Scan has fewer tokens than required", "Rescan"),
    ("K205", Parse, Medium, Recover, "Scanned value does not match the field type", "Rescan or check the field type"),
    ("K206", Parse, Medium, Recover, "Key appears more than once", "Check the label contents"),
    ("K207", Parse, Low, Recover, "Key not found in the scan", "None"),

    ("K301", Evaluation, Medium, Recover, "Condition value set without an operator", "Select an operator"),
    ("K302", Evaluation, Medium, Recover, "AND/OR missing between specified conditions", "Select AND or OR"),
    ("K303", Evaluation, Low, Recover, "Scanned value failed a business rule", "Inspect the item"),

    ("K401", Persistence, High, Recover, "Store rejected the row update", "Resubmit the scan"),
    ("K402", Persistence, High, Recover, "Store I/O failure", "Check storage and resubmit"),
    ("K403", Persistence, High, Halt, "Host record document is malformed", "Fix the record document"),

    ("S001", System, Low, Recover, "Logging initialized", "None"),
    ("S010", Configuration, Low, Recover, "Configuration loaded", "None"),
    ("S011", Configuration, Low, Recover, "Configuration compiled", "None"),
    ("S020", Resolution, Low, Recover, "Judge plan resolved", "None"),
    ("S030", Parse, Low, Recover, "Scan parsed", "None"),
    ("S031", Evaluation, Low, Recover, "Scan judged", "None"),
    ("S040", Persistence, Low, Recover, "Audit row appended", "None"),
];

static REGISTRY: OnceLock<HashMap<&'static str, CodeInfo>> = OnceLock::new();

fn registry() -> &'static HashMap<&'static str, CodeInfo> {
    REGISTRY.get_or_init(|| {
        TABLE
            .iter()
            .map(|&(code, category, severity, disposition, description, action)| {
                let info = CodeInfo {
                    code,
                    category,
                    severity,
                    disposition,
                    description,
                    action,
                };
                (code, info)
            })
            .collect()
    })
}

pub fn lookup(code: &str) -> Option<&'static CodeInfo> {
    registry().get(code)
}

/// Unknown codes are treated as medium severity
pub fn severity(code: &str) -> Severity {
    lookup(code).map_or(Severity::Medium, |info| info.severity)
}

/// Unknown codes are treated as recoverable
pub fn is_recoverable(code: &str) -> bool {
    lookup(code).map_or(true, |info| info.disposition == Disposition::Recover)
}

pub fn requires_halt(code: &str) -> bool {
    !is_recoverable(code)
}

pub fn category(code: &str) -> &'static str {
    lookup(code).map_or("Unknown", |info| info.category.as_str())
}

pub fn description(code: &str) -> &'static str {
    lookup(code).map_or("Unknown code", |info| info.description)
}

pub fn action(code: &str) -> &'static str {
    lookup(code).map_or("None", |info| info.action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_unique() {
        assert_eq!(registry().len(), TABLE.len());
    }

    #[test]
    fn test_every_constant_is_registered() {
        let constants = [
            system::INTERNAL_ERROR,
            config::UNDEFINED_TABLE,
            resolution::UNKNOWN_OPERATOR,
            parse::KEY_NOT_FOUND,
            evaluation::BUSINESS_RULE_FAILED,
            persistence::RECORD_FORMAT_ERROR,
            success::ROW_APPENDED,
        ];
        for code in constants {
            assert!(lookup(code.as_str()).is_some(), "{} not registered", code);
        }
    }

    #[test]
    fn test_classification() {
        assert_eq!(category(parse::INSUFFICIENT_TOKENS.as_str()), "Parse");
        assert_eq!(severity(system::INTERNAL_ERROR.as_str()), Severity::Critical);
        assert!(requires_halt(config::CONFIG_FORMAT_ERROR.as_str()));
        assert!(is_recoverable(evaluation::JOIN_MISSING.as_str()));
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(description("Z999"), "Unknown code");
        assert_eq!(category("Z999"), "Unknown");
        assert!(!requires_halt("Z999"));
    }
}
