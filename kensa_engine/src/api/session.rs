//! # Scan Session
//!
//! Owns one compiled configuration, the judge plan resolved from a host
//! record, and the store that receives audit rows. Scans are processed one at
//! a time: parse, evaluate, build the row, hand the full row set to the store
//! and only then commit it in memory.

use super::clock::{Clock, SystemClock};
use super::errors::SessionError;
use super::store::HostRecordStore;
use crate::execution::{evaluate, Evaluation};
use crate::parser::{parse_scan, ParsedScan};
use crate::resolution::JudgePlan;
use crate::results::{AuditRowBuilder, ResultTag};
use crate::types::{HostRecord, TableRow};
use chrono::{DateTime, Utc};
use kensa_compiler::logging::{codes, with_scan_context, ScanContext};
use kensa_compiler::{log_error, log_info, log_success};
use kensa_compiler::CompiledConfig;
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

/// What one accepted scan produced
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub scan_id: String,
    pub tag: ResultTag,
    pub ok: bool,
    pub config_error: bool,
    pub reasons: Vec<String>,
    /// Display value per field name
    pub values: BTreeMap<String, String>,
    /// Rows in the audit table after the append
    pub row_count: usize,
    pub captured_at: DateTime<Utc>,
}

/// Dry-run result: parsed values and verdicts, nothing written
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Explanation {
    pub scan: ParsedScan,
    pub evaluation: Evaluation,
}

impl Explanation {
    pub fn tag(&self) -> ResultTag {
        self.evaluation.outcome.tag()
    }
}

pub struct ScanSession<S: HostRecordStore> {
    config: CompiledConfig,
    plan: JudgePlan,
    record: HostRecord,
    store: S,
    clock: Box<dyn Clock>,
}

impl<S: HostRecordStore> ScanSession<S> {
    /// Resolve the judge plan from `record` and start a session
    pub fn new(config: CompiledConfig, record: HostRecord, store: S) -> Result<Self, SessionError> {
        let plan = JudgePlan::resolve(&config, &record)?;
        log_info!("Scan session opened",
            "record" => &record.id,
            "mode" => config.mode,
            "policy" => config.policy,
            "fields" => config.field_count()
        );
        Ok(Self {
            config,
            plan,
            record,
            store,
            clock: Box::new(SystemClock),
        })
    }

    /// Load `record_id` from the store, then start a session
    pub fn open(config: CompiledConfig, store: S, record_id: &str) -> Result<Self, SessionError> {
        let record = store.load_record(record_id)?;
        Self::new(config, record, store)
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn config(&self) -> &CompiledConfig {
        &self.config
    }

    pub fn plan(&self) -> &JudgePlan {
        &self.plan
    }

    pub fn record(&self) -> &HostRecord {
        &self.record
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current audit rows
    pub fn rows(&self) -> &[TableRow] {
        self.record.rows(&self.config.table.code)
    }

    /// Process one scan and append its audit row
    pub fn submit(&mut self, raw: &str) -> Result<ScanReport, SessionError> {
        let scan_id = Uuid::new_v4().to_string();
        let context = ScanContext::new(scan_id.clone(), self.record.id.clone());
        with_scan_context(context, || self.process(raw, scan_id))
    }

    /// Parse and evaluate without touching the store or the record
    pub fn explain(&self, raw: &str) -> Result<Explanation, SessionError> {
        let scan = parse_scan(raw, &self.config)?;
        let evaluation = evaluate(&self.config, &self.plan, &scan);
        Ok(Explanation { scan, evaluation })
    }

    fn process(&mut self, raw: &str, scan_id: String) -> Result<ScanReport, SessionError> {
        let scan = parse_scan(raw, &self.config)?;
        let evaluation = evaluate(&self.config, &self.plan, &scan);
        let outcome = evaluation.outcome;

        let captured_at = self.clock.now();
        let builder = AuditRowBuilder::new(&self.config);
        let row = builder.build(&scan, &outcome, captured_at);
        let table = self.config.table.code.clone();
        let rows = builder.append(self.record.rows(&table), row);

        if let Err(error) = self.store.replace_rows(&self.record.id, &table, &rows) {
            log_error!(error.error_code(), "Audit rows could not be stored",
                "table" => &table,
                "reason" => &error
            );
            return Err(SessionError::Persistence(error));
        }

        let row_count = rows.len();
        self.record.set_rows(&table, rows);
        log_success!(codes::success::ROW_APPENDED, "Audit row appended",
            "table" => &table,
            "result" => outcome.tag(),
            "rows" => row_count
        );

        Ok(ScanReport {
            scan_id,
            tag: outcome.tag(),
            ok: outcome.ok,
            config_error: outcome.config_error,
            reasons: outcome.reasons,
            values: scan.display_values(),
            row_count,
            captured_at,
        })
    }
}
