use super::{default_config, load_config, resolve_api_base_url, validate_config, write_config};
use crate::batch::BatchPaths;
use crate::generator::RoleMix;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_batch_root(name: &str) -> std::path::PathBuf {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    let root = std::env::temp_dir().join(format!("{name}-{}-{now}", std::process::id()));
    std::fs::create_dir_all(&root).expect("create temp root");
    root
}

#[test]
fn default_config_validates_and_round_trips_through_disk() {
    let root = temp_batch_root("staff-onboard-config");
    let config = default_config();
    validate_config(&config).expect("default config is valid");

    write_config(&root, &config).expect("write config");
    assert!(BatchPaths::new(root.clone()).config_path().is_file());
    let loaded = load_config(&root).expect("load config");
    assert_eq!(loaded, config);

    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn missing_optional_fields_take_defaults() {
    let root = temp_batch_root("staff-onboard-config-defaults");
    let path = BatchPaths::new(root.clone()).config_path();
    std::fs::create_dir_all(path.parent().expect("config parent")).expect("create batch dir");
    std::fs::write(
        &path,
        r#"{"schema_version":1,"org_name":"Acme Care","org_types":["SLF","SCF"]}"#,
    )
    .expect("write config");

    let config = load_config(&root).expect("load config");
    assert_eq!(config.timeout_secs, 30);
    assert_eq!(config.employee_count, 10);
    assert_eq!(config.role_mix, RoleMix::default());
    assert!(config.api_base_url.is_none());
    validate_config(&config).expect("valid config");

    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn validation_rejects_bad_values() {
    let mut config = default_config();
    config.schema_version = 99;
    assert!(validate_config(&config).is_err());

    let mut config = default_config();
    config.org_types.clear();
    assert!(validate_config(&config).is_err());

    let mut config = default_config();
    config.role_mix.staff = 0.9;
    let err = validate_config(&config).expect_err("mix sums to 1.4");
    assert!(format!("{err:#}").contains("add up to 1.0"));

    let mut config = default_config();
    config.api_base_url = Some("ftp://example".to_string());
    assert!(validate_config(&config).is_err());

    let mut config = default_config();
    config.timeout_secs = 0;
    assert!(validate_config(&config).is_err());
}

#[test]
fn explicit_url_wins_over_config() {
    let mut config = default_config();
    config.api_base_url = Some("http://config.test:8000/".to_string());

    let url = resolve_api_base_url(Some("https://flag.test/"), &config).expect("resolve url");
    assert_eq!(url, "https://flag.test");

    let url = resolve_api_base_url(None, &config).expect("resolve url");
    assert_eq!(url, "http://config.test:8000");

    assert!(resolve_api_base_url(Some("localhost:8000"), &config).is_err());
}
