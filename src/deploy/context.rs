use super::credentials::CredentialEntry;
use super::{DeploymentStepResult, UserResult};

/// Step counter for one run. The denominator is `2 * records + 2`: one step
/// per organization stage and two per record, whether or not the identity
/// step ran.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    current: usize,
    total: usize,
}

impl Progress {
    pub fn for_records(record_count: usize) -> Self {
        Self {
            current: 0,
            total: record_count * 2 + 2,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.current as f64 / self.total as f64
    }

    pub(super) fn advance(&mut self, label: &str) {
        self.current = (self.current + 1).min(self.total);
        tracing::info!(step = self.current, total = self.total, "{label}");
    }
}

/// Caller-owned state for deployment runs.
///
/// Holds what the operator needs to inspect after a run: every step result,
/// one result per processed record, and the credential side-channel. Starting
/// a run replaces all of it.
#[derive(Debug, Default)]
pub struct RunContext {
    pub(super) org_name: Option<String>,
    pub(super) steps: Vec<DeploymentStepResult>,
    pub(super) users: Vec<UserResult>,
    pub(super) credentials: Vec<CredentialEntry>,
    pub(super) progress: Progress,
}

impl RunContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset everything before any record of a new run is processed.
    pub(super) fn begin_run(&mut self, org_name: &str, record_count: usize) {
        self.org_name = Some(org_name.to_string());
        self.steps.clear();
        self.users.clear();
        self.credentials = Vec::new();
        self.progress = Progress::for_records(record_count);
    }

    /// Forget issued passwords without touching the run results.
    pub fn clear_credentials(&mut self) {
        self.credentials.clear();
    }

    /// Organization of the most recent run.
    pub fn org_name(&self) -> Option<&str> {
        self.org_name.as_deref()
    }

    pub fn steps(&self) -> &[DeploymentStepResult] {
        &self.steps
    }

    pub fn users(&self) -> &[UserResult] {
        &self.users
    }

    pub fn credentials(&self) -> &[CredentialEntry] {
        &self.credentials
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }
}
