//! Subcommand handlers

use crate::cli::Sources;
use crate::store::JsonFileStore;
use kensa_compiler::loader::load_schema;
use kensa_compiler::{log_info, log_warning};
use kensa_engine::prelude::*;
use serde::Serialize;
use std::error::Error;
use std::io::{BufRead, Write};

pub type CommandResult<T> = Result<T, Box<dyn Error>>;

/// What `check` prints in JSON mode
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckSummary<'a> {
    mode: ScanMode,
    policy: Policy,
    compact_dates: bool,
    table: &'a str,
    fields: Vec<&'a str>,
}

/// Explicit schema first, then whatever kinds the record itself reveals
fn effective_schema(sources: &Sources, record: Option<&HostRecord>) -> CommandResult<HostSchema> {
    let schema = match &sources.schema {
        Some(path) => load_schema(path)?,
        None => HostSchema::default(),
    };
    Ok(match record {
        Some(record) => schema.merge_record(record),
        None => schema,
    })
}

fn compile_sources(sources: &Sources, record: Option<&HostRecord>) -> CommandResult<CompiledConfig> {
    let schema = effective_schema(sources, record)?;
    Ok(compile_file(&sources.config, &schema)?)
}

pub fn check(sources: &Sources, json: bool, out: &mut dyn Write) -> CommandResult<()> {
    let record = match &sources.record {
        Some(path) => Some(JsonFileStore::new(path).read_record()?),
        None => None,
    };
    let config = compile_sources(sources, record.as_ref())?;

    if json {
        let summary = CheckSummary {
            mode: config.mode,
            policy: config.policy,
            compact_dates: config.compact_dates,
            table: &config.table.code,
            fields: config.fields.iter().map(|f| f.name.as_str()).collect(),
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
    } else {
        writeln!(
            out,
            "{}: {} field(s), {} mode, {} policy, audit table '{}'",
            sources.config.display(),
            config.field_count(),
            config.mode,
            config.policy,
            config.table.code
        )?;
    }
    Ok(())
}

/// Blank lines are skipped
pub fn read_scans(input: Option<&str>, reader: impl BufRead) -> CommandResult<Vec<String>> {
    if let Some(raw) = input {
        return Ok(vec![raw.to_string()]);
    }
    let mut scans = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if !line.trim().is_empty() {
            scans.push(line);
        }
    }
    Ok(scans)
}

pub fn scan(sources: &Sources, scans: &[String], json: bool, out: &mut dyn Write) -> CommandResult<()> {
    let path = sources
        .record
        .as_ref()
        .ok_or("scan needs --record to append audit rows")?;
    let store = JsonFileStore::new(path);
    let record = store.read_record()?;
    let config = compile_sources(sources, Some(&record))?;
    let mut session = ScanSession::new(config, record, store)?;

    let mut rejected = 0usize;
    for raw in scans {
        match session.submit(raw) {
            Ok(report) if json => writeln!(out, "{}", serde_json::to_string(&report)?)?,
            Ok(report) => {
                writeln!(out, "{}", report.tag.as_str())?;
                for reason in &report.reasons {
                    writeln!(out, "  {}", reason)?;
                }
            }
            Err(error) if error.is_recoverable() => {
                rejected += 1;
                log_warning!(code = error.error_code(), "Scan rejected", "reason" => &error);
                eprintln!("rejected: {}", error);
            }
            Err(error) => return Err(error.into()),
        }
    }

    log_info!("Scan run finished",
        "accepted" => scans.len() - rejected,
        "rejected" => rejected
    );
    if rejected > 0 {
        return Err(format!("{} of {} scan(s) rejected", rejected, scans.len()).into());
    }
    Ok(())
}

pub fn explain(sources: &Sources, scans: &[String], json: bool, out: &mut dyn Write) -> CommandResult<()> {
    let record = match &sources.record {
        Some(path) => JsonFileStore::new(path).read_record()?,
        None => HostRecord::new(""),
    };
    let config = compile_sources(sources, Some(&record))?;
    let session = ScanSession::new(config, record, MemoryStore::new())?;

    for raw in scans {
        let explanation = session.explain(raw)?;
        if json {
            writeln!(out, "{}", serde_json::to_string_pretty(&explanation)?)?;
            continue;
        }

        writeln!(out, "{}", explanation.tag().as_str())?;
        for (name, value) in explanation.scan.display_values() {
            writeln!(out, "  {} = {}", name, value)?;
        }
        for verdict in &explanation.evaluation.verdicts {
            let mark = if verdict.config_error {
                "ERR"
            } else if verdict.ok {
                "ok"
            } else {
                "NG"
            };
            writeln!(out, "  [{}] {}", mark, verdict.name)?;
            for reason in &verdict.reasons {
                writeln!(out, "      {}", reason)?;
            }
        }
        for reason in &explanation.evaluation.outcome.reasons {
            writeln!(out, "  reason: {}", reason)?;
        }
    }
    Ok(())
}
