//! Batch-owned configuration and artifact schema types.
//!
//! A batch directory holds everything the operator works with between
//! commands: `batch/config.json`, the generated `batch/records.json`, the last
//! `batch/report.json`, and the append-only `batch/history.jsonl`. Temporary
//! passwords are never written here.
/// Current schema version for `batch/config.json`.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;
/// Current schema version for `batch/records.json`.
pub const RECORDS_SCHEMA_VERSION: u32 = 1;
/// Current schema version for `batch/report.json`.
pub const REPORT_SCHEMA_VERSION: u32 = 1;
/// Current schema version for `batch/history.jsonl`.
pub const HISTORY_SCHEMA_VERSION: u32 = 1;
/// Current schema version for `status --json` output.
pub const STATUS_SCHEMA_VERSION: u32 = 1;

/// Environment variable consulted when neither flag nor config names an API.
pub const API_URL_ENV: &str = "STAFF_ONBOARD_API_URL";
/// API base URL used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

mod artifacts;
mod config;
mod paths;
mod types;

pub(crate) use artifacts::write_pretty_json;
pub use artifacts::{
    append_history, clear_results, load_records, load_report_optional, write_records,
    write_report,
};
pub use config::{
    default_config, load_config, resolve_api_base_url, validate_config, write_config,
};
pub use paths::BatchPaths;
pub use types::*;
