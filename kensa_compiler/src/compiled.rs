//! Validated, immutable configuration handed to the engine

use crate::config::constants::{CONDITION_SLOTS, JOIN_SLOTS};
use crate::model::{CellKind, Policy, ScanMode, ValueKind};
use regex::Regex;

/// Configuration after every compile check passed
#[derive(Debug, Clone)]
pub struct CompiledConfig {
    pub fields: Vec<CompiledField>,
    pub table: AuditTable,
    pub mode: ScanMode,
    pub policy: Policy,
    /// Accept `YYYYMMDD` dates and `YYYYMMDDHHMM` datetimes
    pub compact_dates: bool,
    /// Token splitter for delimited mode
    pub delimiter: Regex,
    pub reason_separator: String,
}

impl CompiledConfig {
    pub fn field(&self, name: &str) -> Option<&CompiledField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

#[derive(Debug, Clone)]
pub struct CompiledField {
    pub name: String,
    /// Display label, already defaulted to the name
    pub label: String,
    pub kind: ValueKind,
    pub table_field: Option<ColumnTarget>,
    pub extraction: Extraction,
    pub judge: JudgeSlots,
}

/// Audit table and the cell kinds of its bookkeeping columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditTable {
    pub code: String,
    pub scan_at: String,
    pub result: ColumnTarget,
    pub reason: ColumnTarget,
}

/// A table column and the cell kind written into it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnTarget {
    pub code: String,
    pub kind: CellKind,
}

impl ColumnTarget {
    pub fn new(code: &str, kind: CellKind) -> Self {
        Self {
            code: code.to_string(),
            kind,
        }
    }
}

/// Where a field's text comes from in the raw scan
#[derive(Debug, Clone)]
pub enum Extraction {
    FixedWidth { width: usize },
    Delimited { token_count: usize },
    /// `None` when the field has neither delimiter and is skipped
    KeyBounded { pattern: Option<Regex> },
}

/// Host-record codes per slot, padded to full length with `None`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JudgeSlots {
    pub values: [Option<String>; CONDITION_SLOTS],
    pub operators: [Option<String>; CONDITION_SLOTS],
    pub joins: [Option<String>; JOIN_SLOTS],
}

impl JudgeSlots {
    /// Pad each slice into its fixed array, treating blank codes as absent
    pub fn from_refs(
        values: &[Option<String>],
        operators: &[Option<String>],
        joins: &[Option<String>],
    ) -> Self {
        let mut slots = Self::default();
        fill(&mut slots.values, values);
        fill(&mut slots.operators, operators);
        fill(&mut slots.joins, joins);
        slots
    }

    /// Every configured code with the slot it came from
    pub fn references(&self) -> Vec<(&'static str, usize, &str)> {
        let mut refs = Vec::new();
        for (i, code) in self.values.iter().enumerate() {
            if let Some(code) = code {
                refs.push(("valueFieldRef", i, code.as_str()));
            }
        }
        for (i, code) in self.operators.iter().enumerate() {
            if let Some(code) = code {
                refs.push(("opFieldRef", i, code.as_str()));
            }
        }
        for (i, code) in self.joins.iter().enumerate() {
            if let Some(code) = code {
                refs.push(("joinFieldRef", i, code.as_str()));
            }
        }
        refs
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
            && self.operators.iter().all(Option::is_none)
            && self.joins.iter().all(Option::is_none)
    }
}

fn fill(target: &mut [Option<String>], source: &[Option<String>]) {
    for (slot, code) in target.iter_mut().zip(source.iter()) {
        *slot = code
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
    }
}
