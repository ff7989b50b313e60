use super::{email_domain, generate_batch, GenerateError, GenerateRequest, RoleMix};
use crate::model::{DatabaseStatus, IdentityStatus, OrgType, RoleType};
use chrono::NaiveDate;
use std::collections::BTreeSet;

fn request(count: usize) -> GenerateRequest {
    GenerateRequest {
        org_name: "Sunrise Senior Living".to_string(),
        org_types: vec![OrgType::AlfShe, OrgType::AlfSheMemoryCare],
        count,
        role_mix: RoleMix::default(),
        today: NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date"),
        seed: Some(42),
    }
}

#[test]
fn role_split_follows_position_in_batch() {
    let records = generate_batch(&request(10)).expect("generate batch");
    let roles: Vec<RoleType> = records.iter().map(|r| r.profile.role_type).collect();

    assert_eq!(&roles[..5], &[RoleType::Staff; 5]);
    assert_eq!(&roles[5..9], &[RoleType::Instructor; 4]);
    assert_eq!(roles[9], RoleType::FacilityAdmin);
}

#[test]
fn generated_records_start_generated_and_pending() {
    let records = generate_batch(&request(4)).expect("generate batch");
    for record in &records {
        assert_eq!(record.db_status(), DatabaseStatus::Generated);
        assert_eq!(record.identity_status(), IdentityStatus::Pending);
        assert!(record.temporary_password().is_none());
    }
}

#[test]
fn fields_respect_org_configuration() {
    let req = request(25);
    let records = generate_batch(&req).expect("generate batch");
    let earliest = NaiveDate::from_ymd_opt(2021, 10, 19).expect("valid date");

    for record in &records {
        let profile = &record.profile;
        assert_eq!(profile.org_name, "Sunrise Senior Living");
        assert!(req.org_types.contains(&profile.org_type));
        assert!(profile
            .org_type
            .professional_types()
            .contains(&profile.prof_type.as_str()));
        assert!(profile.email.ends_with("@sunriseseniorliving.org"));
        assert!(profile
            .email
            .starts_with(&format!("{}.", profile.first_name.to_lowercase())));
        assert_eq!(profile.phone_number.len(), 10);
        assert!(profile.phone_number.starts_with('5'));
        assert!(profile.phone_number.chars().all(|c| c.is_ascii_digit()));
        assert!(profile.start_date <= req.today);
        assert!(profile.start_date >= earliest);
    }
}

#[test]
fn emails_are_unique_within_a_batch() {
    let records = generate_batch(&request(100)).expect("generate batch");
    let emails: BTreeSet<&str> = records.iter().map(|r| r.profile.email.as_str()).collect();
    assert_eq!(emails.len(), 100);
}

#[test]
fn seeded_batches_are_reproducible() {
    let first = generate_batch(&request(8)).expect("generate batch");
    let second = generate_batch(&request(8)).expect("generate batch");
    assert_eq!(first, second);
}

#[test]
fn rejects_role_mix_that_does_not_sum_to_one() {
    let mut req = request(5);
    req.role_mix = RoleMix {
        staff: 0.5,
        instructor: 0.5,
        facility_admin: 0.1,
    };
    assert!(matches!(
        generate_batch(&req),
        Err(GenerateError::RoleMixTotal(_))
    ));
}

#[test]
fn rejects_empty_org_types_and_bad_counts() {
    let mut req = request(5);
    req.org_types.clear();
    assert_eq!(generate_batch(&req), Err(GenerateError::NoOrgTypes));

    assert_eq!(
        generate_batch(&request(0)),
        Err(GenerateError::InvalidCount(0))
    );
    assert_eq!(
        generate_batch(&request(101)),
        Err(GenerateError::InvalidCount(101))
    );
}

#[test]
fn email_domain_strips_spaces_and_lowercases() {
    assert_eq!(email_domain("Sunrise Senior Living"), "sunriseseniorliving.org");
    assert_eq!(email_domain("ACME"), "acme.org");
}
