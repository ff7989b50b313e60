//! Workflow status step.
//!
//! Status reads batch artifacts without side effects and counts records by
//! role, organization type and deployment state.
use super::batch_root_for_status;
use crate::batch::{self, BatchPaths, StatusSummary, STATUS_SCHEMA_VERSION};
use crate::cli::StatusArgs;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Build a status summary for a batch directory.
pub fn status_summary(batch_root: PathBuf) -> Result<StatusSummary> {
    let paths = BatchPaths::new(batch_root);
    let records = if paths.records_path().is_file() {
        Some(batch::load_records(paths.root())?)
    } else {
        None
    };
    let organization = match records.as_ref() {
        Some(records) => Some(records.organization.clone()),
        None if paths.config_path().is_file() => Some(batch::load_config(paths.root())?.org_name),
        None => None,
    };

    let mut by_role = BTreeMap::new();
    let mut by_org_type = BTreeMap::new();
    let mut by_db_status = BTreeMap::new();
    let mut by_identity_status = BTreeMap::new();
    let records = records.map(|file| file.records).unwrap_or_default();
    for record in &records {
        bump(&mut by_role, record.profile.role_type.as_str());
        bump(&mut by_org_type, record.profile.org_type.as_str());
        bump(&mut by_db_status, record.db_status().as_str());
        bump(&mut by_identity_status, record.identity_status().as_str());
    }

    let last_run = batch::load_report_optional(paths.root())?.map(|report| report.summary);
    Ok(StatusSummary {
        schema_version: STATUS_SCHEMA_VERSION,
        batch_root: paths.root().to_path_buf(),
        organization,
        total: records.len(),
        by_role,
        by_org_type,
        by_db_status,
        by_identity_status,
        last_run,
    })
}

fn bump(counts: &mut BTreeMap<String, usize>, key: &str) {
    *counts.entry(key.to_string()).or_insert(0) += 1;
}

/// Run the status step.
pub fn run_status(args: &StatusArgs) -> Result<()> {
    let batch_root = batch_root_for_status(&args.batch)?;
    let summary = status_summary(batch_root)?;
    if args.json {
        let text = serde_json::to_string_pretty(&summary).context("serialize status summary")?;
        println!("{text}");
        return Ok(());
    }

    println!("batch: {}", summary.batch_root.display());
    println!(
        "organization: {}",
        summary.organization.as_deref().unwrap_or("<not configured>")
    );
    println!("records: {}", summary.total);
    for (label, counts) in [
        ("role", &summary.by_role),
        ("org type", &summary.by_org_type),
        ("database", &summary.by_db_status),
        ("identity", &summary.by_identity_status),
    ] {
        if counts.is_empty() {
            continue;
        }
        let rendered = counts
            .iter()
            .map(|(key, count)| format!("{key}={count}"))
            .collect::<Vec<_>>()
            .join(", ");
        println!("  {label}: {rendered}");
    }
    match summary.last_run.as_ref() {
        Some(run) => println!(
            "last run: {} ({} of {} deployed, {} identities created)",
            run.verdict, run.db_deployed, run.records, run.identity_created
        ),
        None => println!("last run: none"),
    }
    if summary.total == 0 {
        println!("next: staff-onboard generate --batch {}", summary.batch_root.display());
    }
    Ok(())
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
