//! Shared test infrastructure for CLI integration tests.

use httpmock::prelude::{MockServer, POST};
use httpmock::Mock;
use serde_json::json;
use std::net::TcpListener;
use std::path::Path;
use std::process::{Command, Output};

pub const TEMP_PASSWORD: &str = "Temp#Pass1";

/// Mocks standing in for the onboarding API, keyed to a generated batch.
///
/// Organization calls succeed. The second record's user-onboard call is
/// rejected. The first record gets a new identity account with
/// [`TEMP_PASSWORD`]; every other identity call reports an existing account.
pub struct StubApi<'a> {
    pub org: Mock<'a>,
    pub mappings: Mock<'a>,
    pub onboard: Vec<Mock<'a>>,
    pub identity: Vec<Mock<'a>>,
}

impl<'a> StubApi<'a> {
    pub fn mount(server: &'a MockServer, emails: &[String]) -> Self {
        let org = server.mock(|when, then| {
            when.method(POST).path("/org/").body_contains("Willow Creek");
            then.status(200).json_body(json!({"status": 1, "org_id": 42}));
        });
        let mappings = server.mock(|when, then| {
            when.method(POST).path("/create-org-mappings/");
            then.status(200).json_body(json!({"orgmap_ids": [7, 8]}));
        });

        let mut onboard = Vec::new();
        let mut identity = Vec::new();
        for (index, email) in emails.iter().enumerate() {
            let quoted = format!("\"{email}\"");
            onboard.push(server.mock(|when, then| {
                when.method(POST).path("/onboard-user/").body_contains(&quoted);
                let body = if index == 1 {
                    json!({"status": 0, "message": "Email already registered"})
                } else {
                    json!({"status": 1, "message": "User onboarded"})
                };
                then.status(200).json_body(body);
            }));
            identity.push(server.mock(|when, then| {
                when.method(POST)
                    .path("/cognito/onboard")
                    .json_body(json!({"email": email}));
                let body = if index == 0 {
                    json!({
                        "status": "success",
                        "message": "New user created",
                        "temporary_password": TEMP_PASSWORD
                    })
                } else {
                    json!({"status": "exists", "message": "User already exists"})
                };
                then.status(200).json_body(body);
            }));
        }
        Self {
            org,
            mappings,
            onboard,
            identity,
        }
    }
}

pub fn total_hits(mocks: &[Mock<'_>]) -> usize {
    mocks.iter().map(Mock::hits).sum()
}

/// Base URL for a port nothing listens on.
pub fn refused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}

/// Run the CLI against a batch directory with a clean environment.
pub fn staff_onboard(batch: &Path, args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_staff-onboard");
    let (command, rest) = args.split_first().expect("subcommand");
    Command::new(bin)
        .arg(command)
        .arg("--batch")
        .arg(batch)
        .args(rest)
        .env_remove("STAFF_ONBOARD_API_URL")
        .env("RUST_LOG", "staff_onboard=info")
        .output()
        .expect("run staff-onboard")
}

pub fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "command failed\nstdout:\n{}\nstderr:\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

pub fn read_json(path: &Path) -> serde_json::Value {
    let text = std::fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("read {}: {err}", path.display()));
    serde_json::from_str(&text).unwrap_or_else(|err| panic!("parse {}: {err}", path.display()))
}
