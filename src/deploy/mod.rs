//! Deployment orchestration for a generated batch.
//!
//! A run is strictly sequential: organization creation, organization-type
//! mapping, then each record in input order (database onboarding, then
//! identity onboarding when the database step succeeded). Transport failures
//! in either organization stage abort the run; everything that goes wrong for
//! a single record stays with that record. Records are always re-sent, even
//! when a previous run already deployed them.
mod context;
mod credentials;
mod summary;

pub use context::{Progress, RunContext};
pub use credentials::{
    bulk_document, credentials_file_name, BulkCredentialsDocument, CredentialEntry,
    UserCredentialsDocument,
};
pub use summary::{summarize, RunSummary, Verdict};

use crate::api::{
    self, ApiClient, Endpoint, IdentityOnboardRequest, IdentityOnboardResponse, IdentityOutcome,
    OnboardUserRequest, OnboardUserResponse, OrgCreateRequest, OrgCreateResponse,
    OrgMappingRequest, OrgMappingResponse,
};
use crate::model::{DatabaseStatus, EmployeeRecord, IdentityStatus, OrgType};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Organization a batch is deployed into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    pub name: String,
    pub org_types: Vec<OrgType>,
}

/// Remote call a step result describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    OrgCreate,
    OrgMapping,
    DatabaseOnboard,
    IdentityOnboard,
}

impl Step {
    pub fn label(&self) -> &'static str {
        match self {
            Step::OrgCreate => "Organization Creation",
            Step::OrgMapping => "Organization Mappings",
            Step::DatabaseOnboard => "Database Onboarding",
            Step::IdentityOnboard => "Identity Onboarding",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepStatus {
    Success,
    Warning,
    Failed,
}

/// The record a per-record step result belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRef {
    pub index: usize,
    pub name: String,
    pub email: String,
}

/// Outcome of one remote call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentStepResult {
    pub step: Step,
    pub status: StepStatus,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<RecordRef>,
}

impl DeploymentStepResult {
    fn org(step: Step, status: StepStatus, message: impl Into<String>) -> Self {
        Self {
            step,
            status,
            message: message.into(),
            record: None,
        }
    }

    fn for_record(
        step: Step,
        status: StepStatus,
        message: impl Into<String>,
        record: &RecordRef,
    ) -> Self {
        Self {
            step,
            status,
            message: message.into(),
            record: Some(record.clone()),
        }
    }
}

/// Final state of one processed record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResult {
    pub index: usize,
    pub name: String,
    pub email: String,
    pub db_status: DatabaseStatus,
    pub identity_status: IdentityStatus,
    pub message: String,
}

/// Organization stage result: either keep going or stop the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    Continue(DeploymentStepResult),
    Abort(DeploymentStepResult),
}

/// Everything one record contributed to the run.
#[derive(Debug)]
pub struct RecordOutcome {
    pub steps: Vec<DeploymentStepResult>,
    pub user: UserResult,
    pub credential: Option<CredentialEntry>,
}

type OrgStage = fn(&dyn ApiClient, &Organization) -> StageOutcome;

/// Run a full deployment of `records` into `org`.
///
/// `ctx` is reset before any remote call and holds the step results, the
/// per-record results and the issued credentials afterwards.
pub fn deploy(
    client: &dyn ApiClient,
    org: &Organization,
    records: &mut [EmployeeRecord],
    ctx: &mut RunContext,
) -> RunSummary {
    ctx.begin_run(&org.name, records.len());
    tracing::info!(
        org = %org.name,
        records = records.len(),
        total_steps = ctx.progress.total(),
        "deployment started"
    );

    let stages: [OrgStage; 2] = [create_organization, create_org_mappings];
    for stage in stages {
        match stage(client, org) {
            StageOutcome::Continue(result) => {
                ctx.progress.advance(result.step.label());
                ctx.steps.push(result);
            }
            StageOutcome::Abort(result) => {
                tracing::error!(
                    step = %result.step,
                    error = %result.message,
                    "deployment aborted"
                );
                let aborted_at = result.step;
                ctx.steps.push(result);
                return summarize(&ctx.users, Some(aborted_at));
            }
        }
    }

    for (index, record) in records.iter_mut().enumerate() {
        let outcome = onboard_record(client, index, record, &mut ctx.progress);
        ctx.steps.extend(outcome.steps);
        ctx.users.push(outcome.user);
        if let Some(credential) = outcome.credential {
            ctx.credentials.push(credential);
        }
    }

    let summary = summarize(&ctx.users, None);
    tracing::info!(
        verdict = %summary.verdict,
        db_deployed = summary.db_deployed,
        db_failed = summary.db_failed,
        identity_created = summary.identity_created,
        identity_existing = summary.identity_existing,
        "deployment finished"
    );
    summary
}

/// Stage 1. A status other than 1 is a warning, not a failure.
pub fn create_organization(client: &dyn ApiClient, org: &Organization) -> StageOutcome {
    let request = OrgCreateRequest {
        org_name: &org.name,
    };
    match api::call::<_, OrgCreateResponse>(client, Endpoint::OrgCreate, &request) {
        Ok(response) if response.is_created() => {
            let org_id = response.org_id_display();
            tracing::info!(org = %org.name, %org_id, "organization created");
            StageOutcome::Continue(DeploymentStepResult::org(
                Step::OrgCreate,
                StepStatus::Success,
                format!("Organization ID: {org_id}"),
            ))
        }
        Ok(response) => {
            let status = response.status_display();
            tracing::warn!(org = %org.name, %status, "organization may already exist");
            StageOutcome::Continue(DeploymentStepResult::org(
                Step::OrgCreate,
                StepStatus::Warning,
                format!("Status {status} - Organization may already exist"),
            ))
        }
        Err(err) => StageOutcome::Abort(DeploymentStepResult::org(
            Step::OrgCreate,
            StepStatus::Failed,
            err.to_string(),
        )),
    }
}

/// Stage 2. An empty id list means the mappings were already present.
pub fn create_org_mappings(client: &dyn ApiClient, org: &Organization) -> StageOutcome {
    let request = OrgMappingRequest {
        org_name: &org.name,
        org_types: &org.org_types,
    };
    match api::call::<_, OrgMappingResponse>(client, Endpoint::OrgMappings, &request) {
        Ok(response) => {
            let message = if response.orgmap_ids.is_empty() {
                "Organization types already exist"
            } else {
                "Organization types attached successfully"
            };
            tracing::info!(mappings = response.orgmap_ids.len(), "{message}");
            StageOutcome::Continue(DeploymentStepResult::org(
                Step::OrgMapping,
                StepStatus::Success,
                message,
            ))
        }
        Err(err) => StageOutcome::Abort(DeploymentStepResult::org(
            Step::OrgMapping,
            StepStatus::Failed,
            err.to_string(),
        )),
    }
}

/// Database step, then the identity step when the database accepted the user.
pub fn onboard_record(
    client: &dyn ApiClient,
    index: usize,
    record: &mut EmployeeRecord,
    progress: &mut Progress,
) -> RecordOutcome {
    record.begin_attempt();
    let record_ref = RecordRef {
        index,
        name: record.profile.display_name(),
        email: record.profile.email.clone(),
    };

    let request = OnboardUserRequest::from(&record.profile);
    let db_result = api::call::<_, OnboardUserResponse>(client, Endpoint::OnboardUser, &request);
    progress.advance(&format!("database onboarding {}", record_ref.name));

    let db_message = match db_result {
        Ok(response) if response.status == 1 => response.message.unwrap_or_default(),
        Ok(response) => {
            let message = response
                .message
                .unwrap_or_else(|| "Unknown error".to_string());
            return reject_record(record, record_ref, message, progress);
        }
        Err(err) => return reject_record(record, record_ref, err.to_string(), progress),
    };
    record.mark_deployed();
    let db_step = DeploymentStepResult::for_record(
        Step::DatabaseOnboard,
        StepStatus::Success,
        db_message.clone(),
        &record_ref,
    );

    let request = IdentityOnboardRequest {
        email: &record.profile.email,
    };
    let identity_result =
        api::call::<_, IdentityOnboardResponse>(client, Endpoint::IdentityOnboard, &request);
    progress.advance(&format!("identity onboarding {}", record_ref.name));

    let (identity_step, identity_message, credential) = match identity_result {
        Ok(response) => apply_identity_response(record, &record_ref, response),
        Err(err) => {
            record.set_identity_status(IdentityStatus::ApiError);
            tracing::warn!(email = %record_ref.email, error = %err, "identity api error");
            let message = err.to_string();
            let step = DeploymentStepResult::for_record(
                Step::IdentityOnboard,
                StepStatus::Failed,
                message.clone(),
                &record_ref,
            );
            (step, message, None)
        }
    };

    RecordOutcome {
        steps: vec![db_step, identity_step],
        user: UserResult {
            index,
            name: record_ref.name,
            email: record_ref.email,
            db_status: record.db_status(),
            identity_status: record.identity_status(),
            message: format!("DB: {db_message}, Identity: {identity_message}"),
        },
        credential,
    }
}

fn apply_identity_response(
    record: &mut EmployeeRecord,
    record_ref: &RecordRef,
    response: IdentityOnboardResponse,
) -> (DeploymentStepResult, String, Option<CredentialEntry>) {
    let IdentityOnboardResponse {
        status,
        message,
        temporary_password,
    } = response;
    let (identity_status, step_status, fallback) = match &status {
        IdentityOutcome::Success => (IdentityStatus::Created, StepStatus::Success, "New user created"),
        IdentityOutcome::Exists => (
            IdentityStatus::AlreadyExists,
            StepStatus::Success,
            "User already exists",
        ),
        IdentityOutcome::Other(_) => (IdentityStatus::Warning, StepStatus::Warning, "Unknown status"),
    };
    let message = message.unwrap_or_else(|| fallback.to_string());
    record.set_identity_status(identity_status);

    let mut credential = None;
    if status == IdentityOutcome::Success {
        if let Some(password) = temporary_password.as_deref() {
            if record.capture_temporary_password(password) {
                credential = Some(CredentialEntry::issue(&record.profile, password, Utc::now()));
            }
        }
    }
    tracing::info!(
        email = %record_ref.email,
        status = %status,
        password_issued = credential.is_some(),
        "identity onboarding complete"
    );

    let step = DeploymentStepResult::for_record(
        Step::IdentityOnboard,
        step_status,
        message.clone(),
        record_ref,
    );
    (step, message, credential)
}

/// DB transport error or business rejection: the identity step is skipped but
/// still counted for progress.
fn reject_record(
    record: &mut EmployeeRecord,
    record_ref: RecordRef,
    message: String,
    progress: &mut Progress,
) -> RecordOutcome {
    record.mark_db_failed();
    tracing::warn!(email = %record_ref.email, error = %message, "database onboarding failed");
    progress.advance(&format!("identity onboarding skipped {}", record_ref.name));

    let step = DeploymentStepResult::for_record(
        Step::DatabaseOnboard,
        StepStatus::Failed,
        message.clone(),
        &record_ref,
    );
    RecordOutcome {
        steps: vec![step],
        user: UserResult {
            index: record_ref.index,
            name: record_ref.name,
            email: record_ref.email,
            db_status: record.db_status(),
            identity_status: record.identity_status(),
            message,
        },
        credential: None,
    }
}
