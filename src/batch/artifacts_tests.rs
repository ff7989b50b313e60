use super::{append_history, clear_results, load_records, load_report_optional, write_records};
use crate::batch::{BatchPaths, HistoryEntry, RecordsFile, HISTORY_SCHEMA_VERSION, RECORDS_SCHEMA_VERSION};
use crate::deploy::Verdict;
use crate::generator::{generate_batch, GenerateRequest, RoleMix};
use crate::model::OrgType;
use chrono::{NaiveDate, TimeZone, Utc};

fn sample_records(seed: u64) -> RecordsFile {
    let request = GenerateRequest {
        org_name: "Maple Grove".to_string(),
        org_types: vec![OrgType::Slf],
        count: 4,
        role_mix: RoleMix::default(),
        today: NaiveDate::from_ymd_opt(2024, 6, 1).expect("date"),
        seed: Some(seed),
    };
    RecordsFile {
        schema_version: RECORDS_SCHEMA_VERSION,
        generated_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        organization: request.org_name.clone(),
        org_types: request.org_types.clone(),
        seed: Some(seed),
        records: generate_batch(&request).expect("generate"),
    }
}

fn history_entry(records: usize) -> HistoryEntry {
    HistoryEntry {
        schema_version: HISTORY_SCHEMA_VERSION,
        ts: Utc.with_ymd_and_hms(2024, 6, 2, 8, 30, 0).unwrap(),
        organization: "Maple Grove".to_string(),
        api_base_url: "http://localhost:8000".to_string(),
        records,
        verdict: Verdict::AllDeployed,
        db_deployed: records,
        db_failed: 0,
        identity_created: records,
        identity_existing: 0,
        credentials_issued: records,
    }
}

#[test]
fn records_round_trip_and_missing_records_mention_generate() {
    let temp = tempfile::tempdir().expect("tempdir");
    let err = load_records(temp.path()).expect_err("no records yet");
    assert!(err.to_string().contains("staff-onboard generate"));

    let records = sample_records(7);
    write_records(temp.path(), &records).expect("write records");
    let loaded = load_records(temp.path()).expect("load records");
    assert_eq!(loaded, records);
}

#[test]
fn records_with_unknown_schema_are_rejected() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut records = sample_records(3);
    records.schema_version = 42;
    write_records(temp.path(), &records).expect("write records");

    let err = load_records(temp.path()).expect_err("schema mismatch");
    assert!(err.to_string().contains("schema_version 42"));
}

#[test]
fn history_appends_one_line_per_run() {
    let temp = tempfile::tempdir().expect("tempdir");
    append_history(temp.path(), &history_entry(4)).expect("first append");
    append_history(temp.path(), &history_entry(2)).expect("second append");

    let path = BatchPaths::new(temp.path().to_path_buf()).history_path();
    let text = std::fs::read_to_string(path).expect("read history");
    let entries: Vec<HistoryEntry> = text
        .lines()
        .map(|line| serde_json::from_str(line).expect("parse history line"))
        .collect();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].records, 4);
    assert_eq!(entries[1].records, 2);
}

#[test]
fn clear_removes_records_and_report_but_keeps_history() {
    let temp = tempfile::tempdir().expect("tempdir");
    let paths = BatchPaths::new(temp.path().to_path_buf());
    write_records(temp.path(), &sample_records(1)).expect("write records");
    std::fs::write(paths.report_path(), "{}").expect("write report");
    append_history(temp.path(), &history_entry(4)).expect("append history");

    let removed = clear_results(temp.path()).expect("clear");
    assert_eq!(removed.len(), 2);
    assert!(!paths.records_path().exists());
    assert!(!paths.report_path().exists());
    assert!(paths.history_path().is_file());

    let removed = clear_results(temp.path()).expect("clear again");
    assert!(removed.is_empty());
    assert!(load_report_optional(temp.path()).expect("load report").is_none());
}
