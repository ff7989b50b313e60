//! Workflow init step.
//!
//! Init writes a validated `batch/config.json` so later steps share one
//! organization and API setting.
use super::{ensure_batch_root, parse_org_types};
use crate::batch::{self, BatchPaths};
use crate::cli::InitArgs;
use anyhow::{anyhow, Result};

/// Run the init step.
pub fn run_init(args: &InitArgs) -> Result<()> {
    let batch_root = ensure_batch_root(&args.batch, true)?;
    let paths = BatchPaths::new(batch_root);
    let config_path = paths.config_path();
    if config_path.is_file() && !args.force {
        return Err(anyhow!(
            "config already exists at {} (use --force to overwrite)",
            config_path.display()
        ));
    }

    let mut config = batch::default_config();
    if let Some(org_name) = args.org_name.as_deref() {
        config.org_name = org_name.trim().to_string();
    }
    if !args.org_types.is_empty() {
        config.org_types = parse_org_types(&args.org_types)?;
    }
    config.api_base_url = args
        .api_base_url
        .as_deref()
        .map(|url| url.trim().trim_end_matches('/').to_string());
    batch::validate_config(&config)?;

    batch::write_config(paths.root(), &config)?;
    tracing::info!(org = %config.org_name, path = %config_path.display(), "batch initialized");
    println!("wrote {}", config_path.display());
    Ok(())
}
