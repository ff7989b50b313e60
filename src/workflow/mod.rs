//! Command workflow over a batch directory.
//!
//! Each command is one small step that reads batch artifacts, does its work,
//! and writes artifacts back, so the operator can stop between steps.
mod clear;
mod deploy;
mod generate;
mod init;
mod status;

pub use clear::run_clear;
pub use deploy::run_deploy;
pub use generate::run_generate;
pub use init::run_init;
pub use status::{run_status, status_summary};

use crate::batch::{self, BatchConfig, BatchPaths};
use crate::cli::BatchArg;
use crate::model::OrgType;
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Resolve the batch root, falling back to `<data dir>/staff-onboard/default`.
///
/// With `create` the directory is created first; otherwise it must exist.
pub(crate) fn ensure_batch_root(arg: &BatchArg, create: bool) -> Result<PathBuf> {
    let path = requested_batch_root(arg)?;
    if create {
        fs::create_dir_all(&path)
            .with_context(|| format!("create batch root {}", path.display()))?;
    }
    path.canonicalize()
        .with_context(|| format!("resolve batch root {}", path.display()))
}

/// Like [`ensure_batch_root`] but tolerates a missing directory.
pub(crate) fn batch_root_for_status(arg: &BatchArg) -> Result<PathBuf> {
    let path = requested_batch_root(arg)?;
    if path.exists() {
        path.canonicalize()
            .with_context(|| format!("resolve batch root {}", path.display()))
    } else {
        Ok(path)
    }
}

fn requested_batch_root(arg: &BatchArg) -> Result<PathBuf> {
    if let Some(path) = arg.batch.as_ref() {
        return Ok(path.clone());
    }
    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow!("no per-user data directory; pass --batch <DIR>"))?;
    Ok(data_dir.join("staff-onboard").join("default"))
}

/// Load and validate the batch config, or use defaults when none was written.
pub(crate) fn load_config_or_default(batch_root: &Path) -> Result<BatchConfig> {
    let paths = BatchPaths::new(batch_root.to_path_buf());
    let config = if paths.config_path().is_file() {
        batch::load_config(batch_root)?
    } else {
        tracing::debug!(root = %batch_root.display(), "no batch config; using defaults");
        batch::default_config()
    };
    batch::validate_config(&config)
        .with_context(|| format!("invalid {}", paths.config_path().display()))?;
    Ok(config)
}

/// Parse repeated `--org-type` values, keeping first-seen order.
pub(crate) fn parse_org_types(raw: &[String]) -> Result<Vec<OrgType>> {
    let mut org_types = Vec::with_capacity(raw.len());
    for value in raw {
        let org_type: OrgType = value.parse().map_err(|err: String| anyhow!(err))?;
        if !org_types.contains(&org_type) {
            org_types.push(org_type);
        }
    }
    Ok(org_types)
}
