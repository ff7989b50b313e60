//! Workflow deploy step.
//!
//! Deploy runs the orchestrator against the live API, then persists updated
//! record statuses, the run report and a history line. Temporary passwords are
//! printed once and written only to the export paths the operator names.
use super::{ensure_batch_root, load_config_or_default};
use crate::api::UreqClient;
use crate::batch::{
    self, write_pretty_json, DeployReport, HistoryEntry, HISTORY_SCHEMA_VERSION,
    REPORT_SCHEMA_VERSION,
};
use crate::cli::DeployArgs;
use crate::deploy::{
    bulk_document, deploy, CredentialEntry, Organization, RunContext, StepStatus, Verdict,
};
use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use std::fs;

/// Run the deploy step.
pub fn run_deploy(args: &DeployArgs) -> Result<()> {
    let batch_root = ensure_batch_root(&args.batch, false)?;
    let config = load_config_or_default(&batch_root)?;
    let mut records = batch::load_records(&batch_root)?;
    if records.records.is_empty() {
        return Err(anyhow!("no records to deploy; run generate first"));
    }

    let api_base_url = batch::resolve_api_base_url(args.api_base_url.as_deref(), &config)?;
    let timeout_secs = args.timeout_secs.unwrap_or(config.timeout_secs);
    if timeout_secs == 0 {
        return Err(anyhow!("--timeout-secs must be greater than zero"));
    }
    let client = UreqClient::new(api_base_url, timeout_secs);
    let org = Organization {
        name: records.organization.clone(),
        org_types: records.org_types.clone(),
    };

    let mut ctx = RunContext::new();
    let summary = deploy(&client, &org, &mut records.records, &mut ctx);
    let now = Utc::now();
    let progress = ctx.progress();
    tracing::debug!(
        completed = progress.current(),
        total = progress.total(),
        fraction = progress.fraction(),
        "run progress"
    );
    let credentials_issued = records
        .records
        .iter()
        .filter(|record| record.temporary_password().is_some())
        .count();

    batch::write_records(&batch_root, &records)?;
    let report = DeployReport {
        schema_version: REPORT_SCHEMA_VERSION,
        generated_at: now,
        organization: org.name.clone(),
        api_base_url: client.base_url().to_string(),
        summary: summary.clone(),
        steps: ctx.steps().to_vec(),
        users: ctx.users().to_vec(),
    };
    batch::write_report(&batch_root, &report)?;
    batch::append_history(
        &batch_root,
        &HistoryEntry {
            schema_version: HISTORY_SCHEMA_VERSION,
            ts: now,
            organization: org.name.clone(),
            api_base_url: client.base_url().to_string(),
            records: summary.records,
            verdict: summary.verdict,
            db_deployed: summary.db_deployed,
            db_failed: summary.db_failed,
            identity_created: summary.identity_created,
            identity_existing: summary.identity_existing,
            credentials_issued,
        },
    )?;

    let organization = ctx.org_name().unwrap_or(org.name.as_str());
    export_credentials(args, organization, ctx.credentials())?;

    if args.json {
        let text = serde_json::to_string_pretty(&report).context("serialize deploy report")?;
        println!("{text}");
    } else {
        print_report(&report, ctx.credentials(), !args.hide_passwords);
    }
    ctx.clear_credentials();

    if summary.verdict == Verdict::Aborted {
        let reason = report
            .steps
            .last()
            .map(|step| format!("{}: {}", step.step, step.message))
            .unwrap_or_else(|| "organization setup failed".to_string());
        return Err(anyhow!("deployment aborted ({reason})"));
    }
    Ok(())
}

fn export_credentials(
    args: &DeployArgs,
    organization: &str,
    entries: &[CredentialEntry],
) -> Result<()> {
    if let Some(path) = args.credentials_out.as_deref() {
        match bulk_document(organization, entries) {
            Some(document) => {
                write_pretty_json(path, &document, "credentials")?;
                eprintln!("wrote {} credentials to {}", entries.len(), path.display());
            }
            None => eprintln!("no temporary passwords issued; {} not written", path.display()),
        }
    }
    if let Some(dir) = args.credentials_dir.as_deref() {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        for entry in entries {
            write_pretty_json(&dir.join(entry.file_name()), &entry.document, "credentials")?;
        }
        if !entries.is_empty() {
            eprintln!(
                "wrote {} credentials documents to {}",
                entries.len(),
                dir.display()
            );
        }
    }
    Ok(())
}

fn print_report(report: &DeployReport, credentials: &[CredentialEntry], show_passwords: bool) {
    println!(
        "deployment of {} via {}",
        report.organization, report.api_base_url
    );
    for step in &report.steps {
        let marker = match step.status {
            StepStatus::Success => "ok",
            StepStatus::Warning => "warn",
            StepStatus::Failed => "FAIL",
        };
        match step.record.as_ref() {
            Some(record) => println!(
                "[{marker}] {} #{} {} <{}>: {}",
                step.step,
                record.index + 1,
                record.name,
                record.email,
                step.message
            ),
            None => println!("[{marker}] {}: {}", step.step, step.message),
        }
    }

    let summary = &report.summary;
    println!(
        "verdict: {} (records {}, db deployed {}, db failed {}, identity created {}, identity existing {})",
        summary.verdict,
        summary.records,
        summary.db_deployed,
        summary.db_failed,
        summary.identity_created,
        summary.identity_existing
    );

    if credentials.is_empty() {
        return;
    }
    if show_passwords {
        println!("temporary passwords (shown once, change on first login):");
        for entry in credentials {
            println!("  {} <{}>: {}", entry.name, entry.email, entry.password);
        }
    } else {
        println!(
            "{} temporary passwords issued and not shown",
            credentials.len()
        );
    }
}
