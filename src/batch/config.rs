//! Batch configuration helpers.
//!
//! Loads, validates, and resolves the batch-owned config so every command
//! sees the same organization and API settings.
use super::{
    BatchConfig, BatchPaths, API_URL_ENV, CONFIG_SCHEMA_VERSION, DEFAULT_API_BASE_URL,
};
use crate::api::DEFAULT_TIMEOUT_SECS;
use crate::generator::{RoleMix, MAX_EMPLOYEES};
use crate::model::OrgType;
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::Path;

/// Build the default config used when a batch is first initialized.
pub fn default_config() -> BatchConfig {
    BatchConfig {
        schema_version: CONFIG_SCHEMA_VERSION,
        api_base_url: None,
        timeout_secs: DEFAULT_TIMEOUT_SECS,
        org_name: "Sunrise Senior Living".to_string(),
        org_types: vec![OrgType::AlfShe, OrgType::AlfSheMemoryCare],
        role_mix: RoleMix::default(),
        employee_count: 10,
    }
}

/// Load the batch config from `batch/config.json`.
pub fn load_config(batch_root: &Path) -> Result<BatchConfig> {
    let paths = BatchPaths::new(batch_root.to_path_buf());
    let path = paths.config_path();
    let bytes = fs::read(&path).with_context(|| format!("read config {}", path.display()))?;
    let config: BatchConfig =
        serde_json::from_slice(&bytes).context("parse batch config JSON")?;
    Ok(config)
}

/// Persist a config to disk in a stable JSON format.
pub fn write_config(batch_root: &Path, config: &BatchConfig) -> Result<()> {
    let paths = BatchPaths::new(batch_root.to_path_buf());
    let path = paths.config_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create batch dir")?;
    }
    let text = serde_json::to_string_pretty(config).context("serialize batch config")?;
    fs::write(&path, text.as_bytes()).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Validate schema version and operator-provided values.
pub fn validate_config(config: &BatchConfig) -> Result<()> {
    if config.schema_version != CONFIG_SCHEMA_VERSION {
        return Err(anyhow!(
            "unsupported batch config schema_version {}",
            config.schema_version
        ));
    }
    if config.org_name.trim().is_empty() {
        return Err(anyhow!("org_name must be non-empty"));
    }
    if config.org_types.is_empty() {
        return Err(anyhow!("org_types must list at least one organization type"));
    }
    if config.timeout_secs == 0 {
        return Err(anyhow!("timeout_secs must be greater than zero"));
    }
    if !(1..=MAX_EMPLOYEES).contains(&config.employee_count) {
        return Err(anyhow!(
            "employee_count must be between 1 and {MAX_EMPLOYEES} (got {})",
            config.employee_count
        ));
    }
    config.role_mix.validate().context("role_mix")?;
    if let Some(url) = config.api_base_url.as_deref() {
        validate_base_url(url)?;
    }
    Ok(())
}

/// Resolve the API base URL: explicit flag, then config, then
/// `STAFF_ONBOARD_API_URL`, then the local default.
pub fn resolve_api_base_url(explicit: Option<&str>, config: &BatchConfig) -> Result<String> {
    let url = explicit
        .map(|url| url.to_string())
        .or_else(|| config.api_base_url.clone())
        .or_else(|| std::env::var(API_URL_ENV).ok().filter(|url| !url.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
    validate_base_url(&url)?;
    Ok(url.trim_end_matches('/').to_string())
}

fn validate_base_url(url: &str) -> Result<()> {
    if url.starts_with("http://") || url.starts_with("https://") {
        return Ok(());
    }
    Err(anyhow!(
        "api base url must start with http:// or https:// (got {url:?})"
    ))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
