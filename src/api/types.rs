//! Request and response bodies for the four onboarding endpoints.
use crate::model::{EmployeeProfile, NotificationPref, OrgType, RoleType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Serialize)]
pub struct OrgCreateRequest<'a> {
    pub org_name: &'a str,
}

/// `status` is kept as raw JSON: only the integer 1 means created, and any
/// other value (string, bool, float) is reported rather than rejected.
#[derive(Debug, Deserialize)]
pub struct OrgCreateResponse {
    pub status: Value,
    #[serde(default)]
    pub org_id: Value,
}

impl OrgCreateResponse {
    pub fn is_created(&self) -> bool {
        self.status.as_i64() == Some(1)
    }

    pub fn status_display(&self) -> String {
        display_value(&self.status)
    }

    /// Org id rendered for messages; string ids are shown without quotes.
    pub fn org_id_display(&self) -> String {
        display_value(&self.org_id)
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => "unknown".to_string(),
        other => other.to_string(),
    }
}

#[derive(Debug, Serialize)]
pub struct OrgMappingRequest<'a> {
    pub org_name: &'a str,
    pub org_types: &'a [OrgType],
}

#[derive(Debug, Deserialize)]
pub struct OrgMappingResponse {
    #[serde(default)]
    pub orgmap_ids: Vec<Value>,
}

/// Full field set for the user-onboard call, including the derived role flags.
#[derive(Debug, Serialize)]
pub struct OnboardUserRequest<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub phone_number: &'a str,
    pub org_name: &'a str,
    pub org_type: OrgType,
    pub prof_type: &'a str,
    pub notification_pref: NotificationPref,
    pub qualification: &'a str,
    pub start_date: NaiveDate,
    pub role_admin_or_staff: &'static str,
    pub role_instructor: Option<&'static str>,
    pub role_type: RoleType,
}

impl<'a> From<&'a EmployeeProfile> for OnboardUserRequest<'a> {
    fn from(profile: &'a EmployeeProfile) -> Self {
        Self {
            first_name: &profile.first_name,
            last_name: &profile.last_name,
            email: &profile.email,
            phone_number: &profile.phone_number,
            org_name: &profile.org_name,
            org_type: profile.org_type,
            prof_type: &profile.prof_type,
            notification_pref: profile.notification_pref,
            qualification: &profile.qualification,
            start_date: profile.start_date,
            role_admin_or_staff: profile.role_type.admin_or_staff(),
            role_instructor: profile.role_type.instructor_flag(),
            role_type: profile.role_type,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OnboardUserResponse {
    pub status: i64,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct IdentityOnboardRequest<'a> {
    pub email: &'a str,
}

/// Identity-provider status string, closed over the values the API is known
/// to return.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum IdentityOutcome {
    Success,
    Exists,
    Other(String),
}

impl From<String> for IdentityOutcome {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "success" => IdentityOutcome::Success,
            "exists" => IdentityOutcome::Exists,
            _ => IdentityOutcome::Other(raw),
        }
    }
}

impl fmt::Display for IdentityOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityOutcome::Success => f.write_str("success"),
            IdentityOutcome::Exists => f.write_str("exists"),
            IdentityOutcome::Other(raw) => f.write_str(raw),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct IdentityOnboardResponse {
    pub status: IdentityOutcome,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub temporary_password: Option<String>,
}
