//! Verdict types produced by evaluation

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of one condition slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionResult {
    /// False when the operator is absent or the "unspecified" sentinel
    pub specified: bool,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ConditionResult {
    /// Vacuously true, never carries a reason
    pub fn unspecified() -> Self {
        Self {
            specified: false,
            ok: true,
            reason: None,
        }
    }

    pub fn pass() -> Self {
        Self {
            specified: true,
            ok: true,
            reason: None,
        }
    }

    pub fn fail(reason: String) -> Self {
        Self {
            specified: true,
            ok: false,
            reason: Some(reason),
        }
    }
}

/// Combined result of one field's condition chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldVerdict {
    pub name: String,
    pub ok: bool,
    pub config_error: bool,
    /// Configuration reasons first, then failing conditions
    pub reasons: Vec<String>,
    pub conditions: Vec<ConditionResult>,
}

/// Result of a whole scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanOutcome {
    pub ok: bool,
    /// Sticky: any field configuration error forces `ok = false`
    pub config_error: bool,
    pub reasons: Vec<String>,
}

impl ScanOutcome {
    pub fn tag(&self) -> ResultTag {
        if self.config_error {
            ResultTag::Err
        } else if self.ok {
            ResultTag::Ok
        } else {
            ResultTag::Ng
        }
    }
}

/// Value written to the audit row's result column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResultTag {
    Ok,
    Ng,
    Err,
}

impl ResultTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultTag::Ok => "OK",
            ResultTag::Ng => "NG",
            ResultTag::Err => "ERR",
        }
    }
}

impl fmt::Display for ResultTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
