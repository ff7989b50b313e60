//! Workflow generate step.
//!
//! Generation replaces `batch/records.json` and drops the previous report,
//! which described records that no longer exist.
use super::{ensure_batch_root, load_config_or_default, parse_org_types};
use crate::batch::{self, BatchConfig, BatchPaths, RecordsFile, RECORDS_SCHEMA_VERSION};
use crate::cli::GenerateArgs;
use crate::generator::{generate_batch, GenerateRequest, RoleMix};
use anyhow::{Context, Result};
use chrono::Utc;

/// Run the generate step.
pub fn run_generate(args: &GenerateArgs) -> Result<()> {
    let batch_root = ensure_batch_root(&args.batch, true)?;
    let config = load_config_or_default(&batch_root)?;
    let request = build_request(args, &config)?;

    let records = generate_batch(&request).context("generate employee records")?;
    tracing::info!(
        org = %request.org_name,
        count = records.len(),
        seeded = request.seed.is_some(),
        "records generated"
    );

    let file = RecordsFile {
        schema_version: RECORDS_SCHEMA_VERSION,
        generated_at: Utc::now(),
        organization: request.org_name.clone(),
        org_types: request.org_types.clone(),
        seed: request.seed,
        records,
    };
    batch::clear_results(&batch_root)?;
    batch::write_records(&batch_root, &file)?;

    if args.json {
        let text = serde_json::to_string_pretty(&file).context("serialize records")?;
        println!("{text}");
        return Ok(());
    }
    for (index, record) in file.records.iter().enumerate() {
        let profile = &record.profile;
        println!(
            "{:>3}. {} <{}> {} | {} | {}",
            index + 1,
            profile.display_name(),
            profile.email,
            profile.role_type,
            profile.org_type,
            profile.prof_type
        );
    }
    let paths = BatchPaths::new(batch_root);
    println!(
        "wrote {} records to {}",
        file.records.len(),
        paths.records_path().display()
    );
    Ok(())
}

/// Merge command-line overrides onto the batch config.
fn build_request(args: &GenerateArgs, config: &BatchConfig) -> Result<GenerateRequest> {
    let org_name = args
        .org_name
        .as_deref()
        .map(|name| name.trim().to_string())
        .unwrap_or_else(|| config.org_name.clone());
    let org_types = if args.org_types.is_empty() {
        config.org_types.clone()
    } else {
        parse_org_types(&args.org_types)?
    };
    let role_mix = RoleMix {
        staff: args.staff.unwrap_or(config.role_mix.staff),
        instructor: args.instructor.unwrap_or(config.role_mix.instructor),
        facility_admin: args.facility_admin.unwrap_or(config.role_mix.facility_admin),
    };
    Ok(GenerateRequest {
        org_name,
        org_types,
        count: args.count.unwrap_or(config.employee_count),
        role_mix,
        today: Utc::now().date_naive(),
        seed: args.seed,
    })
}
