//! One-time credential capture and the export documents built from it.
//!
//! Passwords only live in memory here. Writing them anywhere is left to the
//! caller, and only on explicit operator request.
use crate::model::{EmployeeProfile, RoleType};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

pub const PASSWORD_INSTRUCTIONS: &str = "Please change this password on first login";
pub const ONE_TIME_NOTE: &str = "This password will only be shown once. Please save it securely.";

/// A temporary password issued for a newly created identity account.
#[derive(Clone)]
pub struct CredentialEntry {
    pub name: String,
    pub email: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub document: UserCredentialsDocument,
}

impl CredentialEntry {
    pub(crate) fn issue(profile: &EmployeeProfile, password: &str, now: DateTime<Utc>) -> Self {
        let document = UserCredentialsDocument {
            user_info: UserInfo {
                first_name: profile.first_name.clone(),
                last_name: profile.last_name.clone(),
                email: profile.email.clone(),
                organization: profile.org_name.clone(),
                role: profile.role_type,
            },
            login_credentials: LoginCredentials {
                email: profile.email.clone(),
                temporary_password: password.to_string(),
                instructions: PASSWORD_INSTRUCTIONS,
            },
            generated_at: now,
            note: ONE_TIME_NOTE,
        };
        Self {
            name: profile.display_name(),
            email: profile.email.clone(),
            password: password.to_string(),
            created_at: now,
            document,
        }
    }

    /// File name for this user's credentials document.
    pub fn file_name(&self) -> String {
        credentials_file_name(&self.email)
    }
}

impl fmt::Debug for CredentialEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialEntry")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserCredentialsDocument {
    pub user_info: UserInfo,
    pub login_credentials: LoginCredentials,
    pub generated_at: DateTime<Utc>,
    pub note: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub organization: String,
    pub role: RoleType,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginCredentials {
    pub email: String,
    pub temporary_password: String,
    pub instructions: &'static str,
}

/// All credentials issued during one run.
#[derive(Debug, Clone, Serialize)]
pub struct BulkCredentialsDocument {
    pub organization: String,
    pub deployment_date: DateTime<Utc>,
    pub total_users: usize,
    pub users: Vec<BulkCredentialUser>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BulkCredentialUser {
    pub name: String,
    pub email: String,
    pub temporary_password: String,
    pub instructions: &'static str,
}

/// Build the bulk document; `None` when the run issued no passwords.
pub fn bulk_document(
    organization: &str,
    entries: &[CredentialEntry],
) -> Option<BulkCredentialsDocument> {
    let first = entries.first()?;
    Some(BulkCredentialsDocument {
        organization: organization.to_string(),
        deployment_date: first.created_at,
        total_users: entries.len(),
        users: entries
            .iter()
            .map(|entry| BulkCredentialUser {
                name: entry.name.clone(),
                email: entry.email.clone(),
                temporary_password: entry.password.clone(),
                instructions: PASSWORD_INSTRUCTIONS,
            })
            .collect(),
    })
}

/// `credentials_<email>.json` with `@` and `.` replaced by `_`.
pub fn credentials_file_name(email: &str) -> String {
    let slug: String = email
        .chars()
        .map(|c| if c == '@' || c == '.' { '_' } else { c })
        .collect();
    format!("credentials_{slug}.json")
}
