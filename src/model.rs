//! Employee record schema shared by the generator, the deploy orchestrator and
//! the batch artifacts.
//!
//! Identity fields are fixed once a record is generated. Deployment status
//! fields are private and only move through the transition methods below so
//! the database/identity ordering holds for every record.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Facility classification attached to an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OrgType {
    #[serde(rename = "ALF/SHE")]
    AlfShe,
    #[serde(rename = "ALF/SHE memory care")]
    AlfSheMemoryCare,
    #[serde(rename = "SLF")]
    Slf,
    #[serde(rename = "SLF memory care")]
    SlfMemoryCare,
    #[serde(rename = "SNF/ICF")]
    SnfIcf,
    #[serde(rename = "SCF")]
    Scf,
}

impl OrgType {
    pub const ALL: [OrgType; 6] = [
        OrgType::AlfShe,
        OrgType::AlfSheMemoryCare,
        OrgType::Slf,
        OrgType::SlfMemoryCare,
        OrgType::SnfIcf,
        OrgType::Scf,
    ];

    /// Return the label the remote API expects.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrgType::AlfShe => "ALF/SHE",
            OrgType::AlfSheMemoryCare => "ALF/SHE memory care",
            OrgType::Slf => "SLF",
            OrgType::SlfMemoryCare => "SLF memory care",
            OrgType::SnfIcf => "SNF/ICF",
            OrgType::Scf => "SCF",
        }
    }

    /// Professional types that can be staffed under this organization type.
    pub fn professional_types(&self) -> &'static [&'static str] {
        match self {
            OrgType::AlfShe => &[
                "ALF/SHE direct care staff",
                "ALF/SHE manager",
                "ALF/SHE non-care staff",
                "RN",
            ],
            OrgType::AlfSheMemoryCare => &[
                "ALF/SHE MC direct care staff",
                "ALF/SHE MC manager",
                "ALF/SHE MC non-care staff",
                "RN",
            ],
            OrgType::Slf => &["SLF direct care staff", "SLF non-care staff", "RN"],
            OrgType::SlfMemoryCare => &["SLF MC direct care staff", "SLF MC non-care staff", "RN"],
            OrgType::SnfIcf => &[
                "SNF/ICF Direct Care Staff",
                "SNF/ICF Non-Care Staff",
                "SNF/ICF Manager",
                "SNF/ICF RA",
                "SNF/ICF IP",
                "RN",
            ],
            OrgType::Scf => &[
                "SCF Direct Care Staff",
                "SCF Non-Care Staff",
                "SCF Manager",
                "RN",
            ],
        }
    }
}

impl fmt::Display for OrgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrgType {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        OrgType::ALL
            .into_iter()
            .find(|org_type| org_type.as_str().eq_ignore_ascii_case(raw))
            .ok_or_else(|| {
                let known = OrgType::ALL
                    .iter()
                    .map(|org_type| format!("{:?}", org_type.as_str()))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("unknown organization type {raw:?} (expected one of {known})")
            })
    }
}

/// Coarse role classification chosen by the role distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleType {
    Staff,
    Instructor,
    FacilityAdmin,
}

impl RoleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleType::Staff => "staff",
            RoleType::Instructor => "instructor",
            RoleType::FacilityAdmin => "facility_admin",
        }
    }

    /// The admin/staff flag sent to the onboarding API.
    pub fn admin_or_staff(&self) -> &'static str {
        match self {
            RoleType::FacilityAdmin => "facility_admin",
            RoleType::Staff | RoleType::Instructor => "staff",
        }
    }

    /// The instructor flag sent to the onboarding API; absent for non-instructors.
    pub fn instructor_flag(&self) -> Option<&'static str> {
        match self {
            RoleType::Instructor => Some("instructor"),
            RoleType::Staff | RoleType::FacilityAdmin => None,
        }
    }
}

impl fmt::Display for RoleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationPref {
    Email,
    Sms,
    Both,
}

impl NotificationPref {
    pub const ALL: [NotificationPref; 3] = [
        NotificationPref::Email,
        NotificationPref::Sms,
        NotificationPref::Both,
    ];
}

/// Database onboarding state of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum DatabaseStatus {
    #[default]
    Generated,
    Deployed,
    Failed,
}

impl DatabaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseStatus::Generated => "Generated",
            DatabaseStatus::Deployed => "Deployed",
            DatabaseStatus::Failed => "Failed",
        }
    }
}

impl fmt::Display for DatabaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity-provider onboarding state of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum IdentityStatus {
    #[default]
    Pending,
    Created,
    AlreadyExists,
    Warning,
    ApiError,
    Skipped,
}

impl IdentityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentityStatus::Pending => "Pending",
            IdentityStatus::Created => "Created",
            IdentityStatus::AlreadyExists => "AlreadyExists",
            IdentityStatus::Warning => "Warning",
            IdentityStatus::ApiError => "ApiError",
            IdentityStatus::Skipped => "Skipped",
        }
    }
}

impl fmt::Display for IdentityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Synthesized identity and role data for one employee.
///
/// Field names match the user-onboard payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub org_name: String,
    pub org_type: OrgType,
    pub prof_type: String,
    pub notification_pref: NotificationPref,
    pub qualification: String,
    pub start_date: NaiveDate,
    pub role_type: RoleType,
}

impl EmployeeProfile {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One candidate user plus its deployment state.
///
/// The temporary password is never serialized: batch artifacts on disk only
/// carry statuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    #[serde(flatten)]
    pub profile: EmployeeProfile,
    #[serde(default)]
    db_status: DatabaseStatus,
    #[serde(default)]
    identity_status: IdentityStatus,
    #[serde(skip)]
    temporary_password: Option<String>,
}

impl EmployeeRecord {
    /// Wrap a freshly generated profile in the Generated/Pending state.
    pub fn new(profile: EmployeeProfile) -> Self {
        Self {
            profile,
            db_status: DatabaseStatus::Generated,
            identity_status: IdentityStatus::Pending,
            temporary_password: None,
        }
    }

    pub fn db_status(&self) -> DatabaseStatus {
        self.db_status
    }

    pub fn identity_status(&self) -> IdentityStatus {
        self.identity_status
    }

    pub fn temporary_password(&self) -> Option<&str> {
        self.temporary_password.as_deref()
    }

    /// Start a new deployment attempt. A password belongs to the run that
    /// issued it, so any earlier one is dropped here.
    pub(crate) fn begin_attempt(&mut self) {
        self.temporary_password = None;
    }

    pub(crate) fn mark_deployed(&mut self) {
        self.db_status = DatabaseStatus::Deployed;
    }

    /// A failed database step skips the identity step for this record.
    pub(crate) fn mark_db_failed(&mut self) {
        self.db_status = DatabaseStatus::Failed;
        self.identity_status = IdentityStatus::Skipped;
        self.temporary_password = None;
    }

    /// Only `Created` may carry a password.
    pub(crate) fn set_identity_status(&mut self, status: IdentityStatus) {
        debug_assert_eq!(self.db_status, DatabaseStatus::Deployed);
        self.identity_status = status;
        if status != IdentityStatus::Created {
            self.temporary_password = None;
        }
    }

    /// Store the password issued in the current attempt. Returns false when
    /// the record is not `Created`, the candidate is empty, or this attempt
    /// already captured one.
    pub(crate) fn capture_temporary_password(&mut self, password: &str) -> bool {
        if self.identity_status != IdentityStatus::Created
            || self.temporary_password.is_some()
            || password.is_empty()
        {
            return false;
        }
        self.temporary_password = Some(password.to_string());
        true
    }
}
