//! JSON schema types for batch artifacts.
use crate::deploy::{DeploymentStepResult, RunSummary, UserResult, Verdict};
use crate::generator::RoleMix;
use crate::model::{EmployeeRecord, OrgType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

fn default_timeout_secs() -> u64 {
    crate::api::DEFAULT_TIMEOUT_SECS
}

fn default_employee_count() -> usize {
    10
}

/// Operator-owned settings for a batch (`batch/config.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    pub schema_version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    pub org_name: String,
    pub org_types: Vec<OrgType>,
    #[serde(default)]
    pub role_mix: RoleMix,
    #[serde(default = "default_employee_count")]
    pub employee_count: usize,
}

/// Generated records plus the organization they were generated for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordsFile {
    pub schema_version: u32,
    pub generated_at: DateTime<Utc>,
    pub organization: String,
    pub org_types: Vec<OrgType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub records: Vec<EmployeeRecord>,
}

/// Snapshot of the most recent deployment run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeployReport {
    pub schema_version: u32,
    pub generated_at: DateTime<Utc>,
    pub organization: String,
    pub api_base_url: String,
    pub summary: RunSummary,
    pub steps: Vec<DeploymentStepResult>,
    pub users: Vec<UserResult>,
}

/// One line of `batch/history.jsonl`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub schema_version: u32,
    pub ts: DateTime<Utc>,
    pub organization: String,
    pub api_base_url: String,
    pub records: usize,
    pub verdict: Verdict,
    pub db_deployed: usize,
    pub db_failed: usize,
    pub identity_created: usize,
    pub identity_existing: usize,
    pub credentials_issued: usize,
}

/// Counts over the current records, emitted by `status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSummary {
    pub schema_version: u32,
    pub batch_root: PathBuf,
    pub organization: Option<String>,
    pub total: usize,
    pub by_role: BTreeMap<String, usize>,
    pub by_org_type: BTreeMap<String, usize>,
    pub by_db_status: BTreeMap<String, usize>,
    pub by_identity_status: BTreeMap<String, usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_run: Option<RunSummary>,
}
