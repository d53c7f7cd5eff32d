use crate::config::{BridgeConfig, CONFIG_FILE_NAME};
use crate::error::config::ConfigError;

use std::time::Duration;

use tempfile::tempdir;

/// **VALUE**: A missing config file yields defaults, not an error.
///
/// **WHY THIS MATTERS**: Almost every install runs without a config file.
#[test]
fn given_no_config_file_when_loaded_then_defaults() {
    let dir = tempdir().expect("tempdir");

    let config = BridgeConfig::load(dir.path()).expect("defaults");

    assert_eq!(config, BridgeConfig::default());
    assert_eq!(config.default_addr, "127.0.0.1:9900");
    assert_eq!(config.settle_interval(), Duration::from_secs(2));
    assert_eq!(config.poll_interval(), Duration::from_millis(100));
}

/// **VALUE**: Keys left out of the file keep their defaults.
#[test]
fn given_partial_config_when_loaded_then_missing_keys_defaulted() {
    // GIVEN
    let dir = tempdir().expect("tempdir");
    std::fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "default_addr = \"127.0.0.1:9911\"\nlog_dir = \"/var/tmp\"\n",
    )
    .expect("write config");

    // WHEN
    let config = BridgeConfig::load(dir.path()).expect("valid config");

    // THEN
    assert_eq!(config.default_addr, "127.0.0.1:9911");
    assert_eq!(config.log_dir(), std::path::PathBuf::from("/var/tmp"));
    assert_eq!(config.settle_interval_ms, 2_000);
}

/// **VALUE**: A file that is not TOML is reported with its path.
#[test]
fn given_garbage_config_when_loaded_then_parse_error_with_path() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "default_addr = [").expect("write config");

    match BridgeConfig::load(dir.path()) {
        Err(ConfigError::ParseError { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected ParseError, got {other:?}"),
    }
}

/// **VALUE**: Out-of-range values are rejected.
///
/// **BUG THIS CATCHES**: Would catch a zero settle interval, which makes every
/// start report a timeout.
#[test]
fn given_invalid_values_when_validated_then_validation_error() {
    let cases = [
        "settle_interval_ms = 0",
        "settle_interval_ms = 60001",
        "poll_interval_ms = 10001",
        "default_addr = \"\"",
        "default_addr = \"no-port\"",
    ];

    for case in cases {
        assert!(
            matches!(
                BridgeConfig::parse(case),
                Err(ConfigError::ValidationError { .. })
            ),
            "should reject: {case}"
        );
    }
}
