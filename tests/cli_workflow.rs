mod common;

use common::{
    assert_success, read_json, refused_base_url, staff_onboard, total_hits, StubApi, TEMP_PASSWORD,
};
use httpmock::MockServer;

#[test]
fn init_generate_status_produce_seeded_batch() {
    let temp = tempfile::tempdir().expect("tempdir");
    let batch = temp.path();

    let output = staff_onboard(
        batch,
        &["init", "--org-name", "Maple Grove", "--org-type", "SLF"],
    );
    assert_success(&output);
    let config = read_json(&batch.join("batch").join("config.json"));
    assert_eq!(config["org_name"], "Maple Grove");
    assert_eq!(config["org_types"], serde_json::json!(["SLF"]));

    let output = staff_onboard(batch, &["init"]);
    assert!(!output.status.success(), "second init without --force must fail");
    assert!(String::from_utf8_lossy(&output.stderr).contains("--force"));

    assert_success(&staff_onboard(batch, &["generate", "--count", "10", "--seed", "7"]));
    let first = read_json(&batch.join("batch").join("records.json"));
    assert_success(&staff_onboard(batch, &["generate", "--count", "10", "--seed", "7"]));
    let second = read_json(&batch.join("batch").join("records.json"));
    assert_eq!(first["records"], second["records"]);

    let records = first["records"].as_array().expect("records array");
    assert_eq!(records.len(), 10);
    for record in records {
        let email = record["email"].as_str().expect("email");
        assert!(email.ends_with("@maplegrove.org"), "unexpected email {email}");
        assert_eq!(record["org_type"], "SLF");
        assert_eq!(record["db_status"], "Generated");
        assert_eq!(record["identity_status"], "Pending");
    }

    let output = staff_onboard(batch, &["status", "--json"]);
    assert_success(&output);
    let status: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("status json on stdout");
    assert_eq!(status["organization"], "Maple Grove");
    assert_eq!(status["total"], 10);
    assert_eq!(status["by_role"]["staff"], 5);
    assert_eq!(status["by_role"]["instructor"], 4);
    assert_eq!(status["by_role"]["facility_admin"], 1);
    assert!(status.get("last_run").is_none());
}

#[test]
fn deploy_against_stub_api_updates_records_and_keeps_passwords_off_disk() {
    let temp = tempfile::tempdir().expect("tempdir");
    let batch = temp.path().join("batch-root");
    let creds_dir = temp.path().join("creds");
    let bulk_path = temp.path().join("bulk.json");

    assert_success(&staff_onboard(
        &batch,
        &["init", "--org-name", "Willow Creek", "--org-type", "SNF/ICF"],
    ));
    assert_success(&staff_onboard(&batch, &["generate", "--count", "3", "--seed", "3"]));
    let generated = read_json(&batch.join("batch").join("records.json"));
    let emails: Vec<String> = generated["records"]
        .as_array()
        .expect("records array")
        .iter()
        .map(|record| record["email"].as_str().expect("email").to_string())
        .collect();
    let server = MockServer::start();
    let stub = StubApi::mount(&server, &emails);

    let output = staff_onboard(
        &batch,
        &[
            "deploy",
            "--api-base-url",
            &server.base_url(),
            "--credentials-dir",
            creds_dir.to_str().expect("utf-8 path"),
            "--credentials-out",
            bulk_path.to_str().expect("utf-8 path"),
        ],
    );
    assert_success(&output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(TEMP_PASSWORD), "password shown once:\n{stdout}");
    assert!(stdout.contains("verdict: partial"));

    assert_eq!(stub.org.hits(), 1);
    assert_eq!(stub.mappings.hits(), 1);
    assert_eq!(total_hits(&stub.onboard), 3);
    let identity_hits: Vec<usize> = stub.identity.iter().map(|mock| mock.hits()).collect();
    assert_eq!(identity_hits, vec![1, 0, 1]);

    let records_text =
        std::fs::read_to_string(batch.join("batch").join("records.json")).expect("records");
    assert!(!records_text.contains(TEMP_PASSWORD));
    let records: serde_json::Value = serde_json::from_str(&records_text).expect("records json");
    let statuses: Vec<(String, String)> = records["records"]
        .as_array()
        .expect("records array")
        .iter()
        .map(|record| {
            (
                record["db_status"].as_str().unwrap_or_default().to_string(),
                record["identity_status"].as_str().unwrap_or_default().to_string(),
            )
        })
        .collect();
    assert_eq!(
        statuses,
        vec![
            ("Deployed".to_string(), "Created".to_string()),
            ("Failed".to_string(), "Skipped".to_string()),
            ("Deployed".to_string(), "AlreadyExists".to_string()),
        ]
    );

    let report_text =
        std::fs::read_to_string(batch.join("batch").join("report.json")).expect("report");
    assert!(!report_text.contains(TEMP_PASSWORD));
    let report: serde_json::Value = serde_json::from_str(&report_text).expect("report json");
    assert_eq!(report["summary"]["verdict"], "partial");
    assert_eq!(report["summary"]["db_deployed"], 2);
    assert_eq!(report["summary"]["db_failed"], 1);
    assert_eq!(report["summary"]["identity_created"], 1);
    assert_eq!(report["summary"]["identity_existing"], 1);
    assert_eq!(report["users"][1]["message"], "Email already registered");

    let history =
        std::fs::read_to_string(batch.join("batch").join("history.jsonl")).expect("history");
    assert_eq!(history.lines().count(), 1);
    assert!(!history.contains(TEMP_PASSWORD));

    let first_email = records["records"][0]["email"].as_str().expect("email");
    let slug = first_email.replace(['@', '.'], "_");
    let doc = read_json(&creds_dir.join(format!("credentials_{slug}.json")));
    assert_eq!(doc["login_credentials"]["temporary_password"], TEMP_PASSWORD);
    assert_eq!(doc["user_info"]["organization"], "Willow Creek");
    assert_eq!(std::fs::read_dir(&creds_dir).expect("creds dir").count(), 1);

    let bulk = read_json(&bulk_path);
    assert_eq!(bulk["organization"], "Willow Creek");
    assert_eq!(bulk["total_users"], 1);
    assert_eq!(bulk["users"][0]["email"], first_email);

    let output = staff_onboard(&batch, &["status", "--json"]);
    assert_success(&output);
    let status: serde_json::Value = serde_json::from_slice(&output.stdout).expect("status json");
    assert_eq!(status["by_db_status"]["Deployed"], 2);
    assert_eq!(status["last_run"]["verdict"], "partial");
}

#[test]
fn unreachable_api_aborts_before_any_record() {
    let temp = tempfile::tempdir().expect("tempdir");
    let batch = temp.path();
    assert_success(&staff_onboard(batch, &["generate", "--count", "2", "--seed", "1"]));

    let base_url = refused_base_url();
    let output = staff_onboard(
        batch,
        &["deploy", "--api-base-url", &base_url, "--timeout-secs", "2"],
    );
    assert!(!output.status.success(), "aborted deploy exits non-zero");
    assert!(String::from_utf8_lossy(&output.stderr).contains("deployment aborted"));

    let report = read_json(&batch.join("batch").join("report.json"));
    assert_eq!(report["summary"]["verdict"], "aborted");
    assert_eq!(report["summary"]["aborted_at"], "org_create");
    assert_eq!(report["summary"]["records"], 0);
    assert_eq!(report["steps"].as_array().map(Vec::len), Some(1));
    assert_eq!(report["steps"][0]["status"], "Failed");

    let records = read_json(&batch.join("batch").join("records.json"));
    for record in records["records"].as_array().expect("records array") {
        assert_eq!(record["db_status"], "Generated");
        assert_eq!(record["identity_status"], "Pending");
    }
}

#[test]
fn clear_removes_records_and_report_only() {
    let temp = tempfile::tempdir().expect("tempdir");
    let batch = temp.path();
    assert_success(&staff_onboard(batch, &["init"]));
    assert_success(&staff_onboard(batch, &["generate", "--count", "2"]));

    let output = staff_onboard(batch, &["clear"]);
    assert_success(&output);
    assert!(String::from_utf8_lossy(&output.stdout).contains("removed"));
    assert!(!batch.join("batch").join("records.json").exists());
    assert!(batch.join("batch").join("config.json").is_file());

    let output = staff_onboard(batch, &["deploy"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("staff-onboard generate"));
}

#[test]
fn invalid_role_mix_is_rejected() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = staff_onboard(
        temp.path(),
        &["generate", "--staff", "0.9", "--instructor", "0.4"],
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("add up to 1.0"));
}
