#![allow(clippy::unwrap_used)]

use super::*;
use std::fs;
use tempfile::TempDir;

fn write_config(contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).unwrap();
    (dir, path)
}

const MINIMAL: &str = r#"
[tracker]
base_url = "https://example.atlassian.net"
project_key = "PROJ"
email = "dev@example.com"
"#;

#[test]
fn minimal_config_uses_defaults() {
    let (_dir, path) = write_config(MINIMAL);

    let config = Config::load(&path).unwrap();

    assert_eq!(config.tracker.token_env, "TICKETFORGE_API_TOKEN");
    assert_eq!(config.tracker.timeout_secs, 30);
    assert_eq!(config.tracker.fields, FieldMapping::default());
    assert_eq!(config.project_key().unwrap().as_str(), "PROJ");
}

#[test]
fn custom_fields_are_read_from_tracker_table() {
    let (_dir, path) = write_config(
        r#"
[tracker]
base_url = "https://example.atlassian.net"
project_key = "PROJ"
email = "dev@example.com"
token_env = "MY_TOKEN"
epic_link_field = "customfield_10014"
acceptance_criteria_field = "customfield_10020"
"#,
    );

    let config = Config::load(&path).unwrap();

    assert_eq!(config.tracker.token_env, "MY_TOKEN");
    assert_eq!(
        config.tracker.fields,
        FieldMapping {
            epic_link_field: Some("customfield_10014".into()),
            acceptance_criteria_field: Some("customfield_10020".into()),
        }
    );
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = TempDir::new().unwrap();
    let result = Config::load(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ConfigError::Read { .. })));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let (_dir, path) = write_config("[tracker\nbase_url = ");
    assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));
}

#[yare::parameterized(
    blank_project = { r#"base_url = "https://x"
project_key = "  "
email = "a@b""# },
    blank_url = { r#"base_url = ""
project_key = "P"
email = "a@b""# },
    zero_timeout = { r#"base_url = "https://x"
project_key = "P"
email = "a@b"
timeout_secs = 0"# },
)]
fn invalid_values_are_rejected(table: &str) {
    let (_dir, path) = write_config(&format!("[tracker]\n{table}\n"));
    assert!(matches!(Config::load(&path), Err(ConfigError::Invalid(_))));
}

#[test]
fn settings_read_token_from_lookup() {
    let (_dir, path) = write_config(MINIMAL);
    let config = Config::load(&path).unwrap();

    let settings = config
        .tracker_settings(|name| (name == "TICKETFORGE_API_TOKEN").then(|| "secret".to_string()))
        .unwrap();

    assert_eq!(settings.api_token, "secret");
    assert_eq!(settings.project.as_str(), "PROJ");
    assert_eq!(settings.timeout, Duration::from_secs(30));
}

#[test]
fn missing_token_names_the_variable() {
    let (_dir, path) = write_config(MINIMAL);
    let config = Config::load(&path).unwrap();

    let error = config.tracker_settings(|_| None).err().unwrap();

    assert!(matches!(error, ConfigError::MissingToken(ref name) if name == "TICKETFORGE_API_TOKEN"));
    assert!(error.to_string().contains("export TICKETFORGE_API_TOKEN"));
}
