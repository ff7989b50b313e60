use super::{Step, UserResult};
use crate::model::{DatabaseStatus, IdentityStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    AllDeployed,
    Partial,
    AllFailed,
    Aborted,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::AllDeployed => "all_deployed",
            Verdict::Partial => "partial",
            Verdict::AllFailed => "all_failed",
            Verdict::Aborted => "aborted",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counters over the per-record results of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub records: usize,
    pub db_deployed: usize,
    pub db_failed: usize,
    pub identity_created: usize,
    pub identity_existing: usize,
    pub verdict: Verdict,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aborted_at: Option<Step>,
}

/// Reduce per-record results into run counters.
pub fn summarize(users: &[UserResult], aborted_at: Option<Step>) -> RunSummary {
    let db_deployed = users
        .iter()
        .filter(|user| user.db_status == DatabaseStatus::Deployed)
        .count();
    let db_failed = users.len() - db_deployed;
    let identity_created = users
        .iter()
        .filter(|user| user.identity_status == IdentityStatus::Created)
        .count();
    let identity_existing = users
        .iter()
        .filter(|user| user.identity_status == IdentityStatus::AlreadyExists)
        .count();

    let verdict = if aborted_at.is_some() {
        Verdict::Aborted
    } else if db_failed == 0 {
        Verdict::AllDeployed
    } else if db_deployed > 0 {
        Verdict::Partial
    } else {
        Verdict::AllFailed
    };

    RunSummary {
        records: users.len(),
        db_deployed,
        db_failed,
        identity_created,
        identity_existing,
        verdict,
        aborted_at,
    }
}
