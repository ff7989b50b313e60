//! Record, report and history persistence for a batch.
//!
//! Records and the report are snapshots that each command replaces; history
//! is append-only so past runs stay auditable.
use super::{BatchPaths, DeployReport, HistoryEntry, RecordsFile, RECORDS_SCHEMA_VERSION};
use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Load generated records from `batch/records.json`.
pub fn load_records(batch_root: &Path) -> Result<RecordsFile> {
    let paths = BatchPaths::new(batch_root.to_path_buf());
    let path = paths.records_path();
    if !path.is_file() {
        return Err(anyhow!(
            "missing records at {} (run `staff-onboard generate --batch {}` first)",
            path.display(),
            batch_root.display()
        ));
    }
    let bytes = fs::read(&path).with_context(|| format!("read records {}", path.display()))?;
    let records: RecordsFile =
        serde_json::from_slice(&bytes).context("parse batch records JSON")?;
    if records.schema_version != RECORDS_SCHEMA_VERSION {
        return Err(anyhow!(
            "unsupported records schema_version {}",
            records.schema_version
        ));
    }
    Ok(records)
}

/// Replace `batch/records.json`.
pub fn write_records(batch_root: &Path, records: &RecordsFile) -> Result<()> {
    let paths = BatchPaths::new(batch_root.to_path_buf());
    write_pretty_json(&paths.records_path(), records, "batch records")
}

/// Write the latest deployment report snapshot.
pub fn write_report(batch_root: &Path, report: &DeployReport) -> Result<()> {
    let paths = BatchPaths::new(batch_root.to_path_buf());
    write_pretty_json(&paths.report_path(), report, "deploy report")
}

/// Load the last deployment report, if any run has happened.
pub fn load_report_optional(batch_root: &Path) -> Result<Option<DeployReport>> {
    let paths = BatchPaths::new(batch_root.to_path_buf());
    let path = paths.report_path();
    if !path.is_file() {
        return Ok(None);
    }
    let bytes = fs::read(&path).with_context(|| format!("read report {}", path.display()))?;
    let report = serde_json::from_slice(&bytes).context("parse deploy report JSON")?;
    Ok(Some(report))
}

/// Append a history entry as JSONL.
pub fn append_history(batch_root: &Path, entry: &HistoryEntry) -> Result<()> {
    let paths = BatchPaths::new(batch_root.to_path_buf());
    let path = paths.history_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create batch dir")?;
    }
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open {}", path.display()))?;
    let line = serde_json::to_string(entry).context("serialize history entry")?;
    file.write_all(line.as_bytes())
        .with_context(|| format!("write {}", path.display()))?;
    file.write_all(b"\n")
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Remove generated records and the last report; config and history stay.
pub fn clear_results(batch_root: &Path) -> Result<Vec<PathBuf>> {
    let paths = BatchPaths::new(batch_root.to_path_buf());
    let mut removed = Vec::new();
    for path in [paths.records_path(), paths.report_path()] {
        if path.is_file() {
            fs::remove_file(&path).with_context(|| format!("remove {}", path.display()))?;
            removed.push(path);
        }
    }
    Ok(removed)
}

pub(crate) fn write_pretty_json<T: Serialize>(path: &Path, value: &T, label: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let text = serde_json::to_string_pretty(value).with_context(|| format!("serialize {label}"))?;
    fs::write(path, text.as_bytes()).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "artifacts_tests.rs"]
mod tests;
