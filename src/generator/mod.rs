//! Synthetic employee record generation.
//!
//! Produces an ordered batch of records for one organization. Role types are
//! assigned by position so a 0.5/0.4/0.1 mix over ten records always yields
//! five staff, four instructors and one facility admin; everything else is
//! drawn from the pools in [`pools`].
mod pools;

use crate::model::{EmployeeProfile, EmployeeRecord, NotificationPref, OrgType, RoleType};
use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Upper bound on batch size accepted by the generator.
pub const MAX_EMPLOYEES: usize = 100;
/// Start dates fall within this many days before the generation date.
const START_DATE_WINDOW_DAYS: u64 = 5 * 365;
/// Redraws allowed per record before giving up on a unique email.
const MAX_EMAIL_REDRAWS: usize = 256;
const ROLE_MIX_TOLERANCE: f64 = 0.001;

#[derive(Debug, Error, PartialEq)]
pub enum GenerateError {
    #[error("employee count must be between 1 and {MAX_EMPLOYEES} (got {0})")]
    InvalidCount(usize),
    #[error("role percentages must add up to 1.0 (got {0:.3})")]
    RoleMixTotal(f64),
    #[error("role percentage {name} must be within 0.0..=1.0 (got {value})")]
    RoleMixRange { name: &'static str, value: f64 },
    #[error("at least one organization type is required")]
    NoOrgTypes,
    #[error("organization name must be non-empty")]
    EmptyOrgName,
    #[error("could not draw a unique email for record {0}")]
    EmailsExhausted(usize),
}

/// Share of each role type in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoleMix {
    pub staff: f64,
    pub instructor: f64,
    pub facility_admin: f64,
}

impl Default for RoleMix {
    fn default() -> Self {
        Self {
            staff: 0.5,
            instructor: 0.4,
            facility_admin: 0.1,
        }
    }
}

impl RoleMix {
    pub fn validate(&self) -> Result<(), GenerateError> {
        for (name, value) in [
            ("staff", self.staff),
            ("instructor", self.instructor),
            ("facility_admin", self.facility_admin),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(GenerateError::RoleMixRange { name, value });
            }
        }
        let total = self.staff + self.instructor + self.facility_admin;
        if (total - 1.0).abs() > ROLE_MIX_TOLERANCE {
            return Err(GenerateError::RoleMixTotal(total));
        }
        Ok(())
    }

    /// Role for the record at `index` in a batch of `count`.
    pub fn role_for(&self, index: usize, count: usize) -> RoleType {
        let position = index as f64;
        let count = count as f64;
        if position < count * self.staff {
            RoleType::Staff
        } else if position < count * (self.staff + self.instructor) {
            RoleType::Instructor
        } else {
            RoleType::FacilityAdmin
        }
    }
}

/// Inputs for one generated batch.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub org_name: String,
    pub org_types: Vec<OrgType>,
    pub count: usize,
    pub role_mix: RoleMix,
    /// Reference date for start-date sampling (normally today).
    pub today: NaiveDate,
    /// Fixed seed for reproducible batches.
    pub seed: Option<u64>,
}

impl GenerateRequest {
    pub fn validate(&self) -> Result<(), GenerateError> {
        if !(1..=MAX_EMPLOYEES).contains(&self.count) {
            return Err(GenerateError::InvalidCount(self.count));
        }
        if self.org_name.trim().is_empty() {
            return Err(GenerateError::EmptyOrgName);
        }
        if self.org_types.is_empty() {
            return Err(GenerateError::NoOrgTypes);
        }
        self.role_mix.validate()
    }
}

/// Generate an ordered batch of records in the Generated/Pending state.
pub fn generate_batch(request: &GenerateRequest) -> Result<Vec<EmployeeRecord>, GenerateError> {
    request.validate()?;
    let mut rng = match request.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let email_domain = email_domain(&request.org_name);
    let mut seen_emails = BTreeSet::new();
    let mut records = Vec::with_capacity(request.count);

    for index in 0..request.count {
        let role_type = request.role_mix.role_for(index, request.count);
        let (first_name, last_name, email) =
            draw_unique_identity(&mut rng, &email_domain, &mut seen_emails)
                .ok_or(GenerateError::EmailsExhausted(index))?;
        let org_type = *request
            .org_types
            .choose(&mut rng)
            .ok_or(GenerateError::NoOrgTypes)?;
        let prof_type = org_type
            .professional_types()
            .choose(&mut rng)
            .copied()
            .unwrap_or("RN");
        let notification_pref = *NotificationPref::ALL
            .choose(&mut rng)
            .unwrap_or(&NotificationPref::Email);
        let qualification = pools::QUALIFICATIONS
            .choose(&mut rng)
            .copied()
            .unwrap_or(pools::QUALIFICATIONS[0]);

        let profile = EmployeeProfile {
            first_name,
            last_name,
            email,
            phone_number: phone_number(&mut rng),
            org_name: request.org_name.clone(),
            org_type,
            prof_type: prof_type.to_string(),
            notification_pref,
            qualification: qualification.to_string(),
            start_date: start_date(&mut rng, request.today),
            role_type,
        };
        tracing::debug!(
            index,
            role = %role_type,
            email = %profile.email,
            "generated record"
        );
        records.push(EmployeeRecord::new(profile));
    }

    Ok(records)
}

/// Email domain derived from the organization name: spaces dropped, lowercased.
pub fn email_domain(org_name: &str) -> String {
    let compact: String = org_name.chars().filter(|c| *c != ' ').collect();
    format!("{}.org", compact.to_lowercase())
}

fn draw_unique_identity(
    rng: &mut StdRng,
    domain: &str,
    seen: &mut BTreeSet<String>,
) -> Option<(String, String, String)> {
    for _ in 0..MAX_EMAIL_REDRAWS {
        let first = *pools::FIRST_NAMES.choose(rng)?;
        let last = *pools::LAST_NAMES.choose(rng)?;
        let email = format!("{}.{}@{domain}", first.to_lowercase(), last.to_lowercase());
        if seen.insert(email.clone()) {
            return Some((first.to_string(), last.to_string(), email));
        }
    }
    None
}

fn phone_number(rng: &mut StdRng) -> String {
    let mut phone = String::with_capacity(10);
    phone.push('5');
    for _ in 0..9 {
        let digit: u8 = rng.gen_range(0..10);
        phone.push(char::from(b'0' + digit));
    }
    phone
}

fn start_date(rng: &mut StdRng, today: NaiveDate) -> NaiveDate {
    let offset = rng.gen_range(0..=START_DATE_WINDOW_DAYS);
    today.checked_sub_days(Days::new(offset)).unwrap_or(today)
}

#[cfg(test)]
#[path = "generator_tests.rs"]
mod tests;
