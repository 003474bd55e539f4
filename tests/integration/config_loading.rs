//! Integration tests for configuration driving the client

use webtics::cli::{Commands, EndpointFlags, RunContext};
use webtics::config::ConfigLoader;
use webtics::{OperationKind, TicsClient, TicsError};
use tempfile::TempDir;

#[test]
fn test_config_file_builds_http_client() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("webtics.toml");
    std::fs::write(
        &config_file,
        r#"
[endpoint]
host = "tics.example.org:8013"
base_path = "/WebTics/"
scheme = "https"
timeout_ms = 1500
reply_limit = 64

[endpoint.paths]
open_metric_session = "/v2/open.php"
set_authorised = "/setAuthorised.php"

[client]
debug_mode = false

[logging]
level = "debug"
format = "json"
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&config_file).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.logging.format, "json");

    let client = TicsClient::from_config(&config).unwrap();
    let endpoint = client.endpoint();
    assert_eq!(
        endpoint.path_for(OperationKind::OpenMetricSession),
        "/WebTics/v2/open.php"
    );
    assert_eq!(
        endpoint.path_for(OperationKind::SetAuthorised),
        "/WebTics/setAuthorised.php"
    );
    assert_eq!(
        endpoint.path_for(OperationKind::IsAuthorised),
        "/WebTics/isAuthorised.php"
    );
    assert!(!client.debug_mode());
}

#[test]
fn test_invalid_config_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("webtics.toml");
    std::fs::write(
        &config_file,
        r#"
[endpoint]
scheme = "gopher"
reply_limit = 0
"#,
    )
    .unwrap();

    let err = ConfigLoader::load_from_file(&config_file).unwrap_err();
    match err {
        TicsError::Config(message) => assert!(message.contains("gopher")),
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_dry_run_register_command() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("webtics.toml");
    std::fs::write(&config_file, "[endpoint]\nhost = \"tics.test\"\n").unwrap();

    let context = RunContext::new(
        temp_dir.path().to_path_buf(),
        Some(config_file),
        EndpointFlags::default(),
        true,
    )
    .unwrap();
    let output = context
        .execute(&Commands::Register {
            id: Some("ci".to_string()),
        })
        .unwrap();

    assert!(output.starts_with("Registered 23 catalog entries (version 1.0)"));
    assert!(output.contains("GET tics.test/WebTics/registerEvents.php?v=1.0&ev=255&name=Custom"));
    assert!(output.contains("GET tics.test/WebTics/closeMetricSession.php?metric-1"));
}

#[test]
fn test_config_command_prints_effective_settings() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("webtics.toml");
    std::fs::write(&config_file, "[client]\nbuild_number = \"77\"\n").unwrap();

    let context = RunContext::new(
        temp_dir.path().to_path_buf(),
        Some(config_file),
        EndpointFlags {
            host: Some("flag.test".to_string()),
            base_path: None,
        },
        true,
    )
    .unwrap();
    let output = context
        .execute(&Commands::Config {
            format: "toml".to_string(),
        })
        .unwrap();

    assert!(output.contains("host = \"flag.test\""));
    assert!(output.contains("build_number = \"77\""));
}
