//! Tests for the Vigil configuration system.

use std::sync::Mutex;

use vigil_core::config::{CliOverrides, VigilConfig};
use vigil_core::errors::ConfigError;

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear all VIGIL_ env vars to prevent cross-test contamination.
fn clear_vigil_env_vars() {
    for key in [
        "VIGIL_CONTENT_DIR",
        "VIGIL_STATE_DIR",
        "VIGIL_INDEX_COMMAND",
        "VIGIL_NOTIFY_ENABLED",
        "VIGIL_NOTIFY_CREDENTIALS",
        "VIGIL_CIRCUIT_BREAKER_THRESHOLD",
        "VIGIL_WEEKLY_ROLLUP_DAY",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_vigil_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("vigil.toml"),
        r#"
[layout]
content_dir = "docs"
memory_dir = "mem"

[checks]
circuit_breaker_threshold = 5
"#,
    )
    .unwrap();

    std::env::set_var("VIGIL_CIRCUIT_BREAKER_THRESHOLD", "4");

    let cli = CliOverrides {
        content_dir: Some("knowledge".to_string()),
        ..Default::default()
    };
    let config = VigilConfig::load(dir.path(), Some(&cli)).unwrap();

    // CLI beats project
    assert_eq!(config.layout.effective_content_dir(), "knowledge");
    // Project beats defaults
    assert_eq!(config.layout.effective_memory_dir(), "mem");
    // Env beats project
    assert_eq!(config.checks.effective_circuit_breaker_threshold(), 4);

    clear_vigil_env_vars();
}

#[test]
fn test_missing_files_fall_back_to_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_vigil_env_vars();

    let dir = tempdir();
    let config = VigilConfig::load(dir.path(), None).unwrap();

    assert_eq!(config.layout.effective_content_dir(), "kb");
    assert_eq!(config.checks.effective_required_keys().len(), 4);
    assert_eq!(config.checks.effective_content_risk_window_days(), 7);
    assert_eq!(config.trends.effective_max_entries(), 90);
    assert_eq!(
        config.trends.effective_weekly_rollup_day(),
        Some(chrono::Weekday::Sun)
    );
    assert!(config.fixes.index_command().is_none());
}

#[test]
fn test_explicit_config_file_layer() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_vigil_env_vars();

    let dir = tempdir();
    std::fs::write(dir.path().join("vigil.toml"), "[trends]\nmax_entries = 30\n").unwrap();
    let explicit = dir.path().join("ci.toml");
    std::fs::write(&explicit, "[trends]\nmax_entries = 14\n").unwrap();

    let cli = CliOverrides {
        config_file: Some(explicit),
        ..Default::default()
    };
    let config = VigilConfig::load(dir.path(), Some(&cli)).unwrap();
    assert_eq!(config.trends.effective_max_entries(), 14);
}

#[test]
fn test_explicit_config_file_must_exist() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_vigil_env_vars();

    let dir = tempdir();
    let cli = CliOverrides {
        config_file: Some(dir.path().join("nope.toml")),
        ..Default::default()
    };
    let err = VigilConfig::load(dir.path(), Some(&cli)).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_vigil_env_vars();

    let dir = tempdir();
    std::fs::write(dir.path().join("vigil.toml"), "[layout\ncontent_dir = ").unwrap();
    let err = VigilConfig::load(dir.path(), None).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_validation_rejects_zero_window_and_bad_weekday() {
    let config = VigilConfig::from_toml("[checks]\ncontent_risk_window_days = 0\n").unwrap();
    assert!(matches!(
        VigilConfig::validate(&config),
        Err(ConfigError::ValidationFailed { .. })
    ));

    let config = VigilConfig::from_toml("[trends]\nweekly_rollup_day = \"someday\"\n").unwrap();
    let err = VigilConfig::validate(&config).unwrap_err();
    assert!(err.to_string().contains("trends.weekly_rollup_day"));

    let config = VigilConfig::from_toml("[trends]\nweekly_rollup_day = \"Friday\"\n").unwrap();
    assert!(VigilConfig::validate(&config).is_ok());
    assert_eq!(
        config.trends.effective_weekly_rollup_day(),
        Some(chrono::Weekday::Fri)
    );
}

#[test]
fn test_env_index_command_splits_on_whitespace() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_vigil_env_vars();

    let dir = tempdir();
    std::env::set_var("VIGIL_INDEX_COMMAND", "python3 tools/build_index.py --quiet");
    let config = VigilConfig::load(dir.path(), None).unwrap();
    let (program, args) = config.fixes.index_command().unwrap();
    assert_eq!(program, "python3");
    assert_eq!(args, ["tools/build_index.py", "--quiet"]);

    clear_vigil_env_vars();
}

#[test]
fn test_state_paths_resolve_against_repo_root() {
    let config = VigilConfig::from_toml(
        "[state]\ndir = \"audit-state\"\n[checks]\njob_health_path = \"/var/lib/jobs.json\"\n",
    )
    .unwrap();
    let root = std::path::Path::new("/srv/repo");
    assert_eq!(config.state_dir(root), root.join("audit-state"));
    assert_eq!(
        config.trend_store_path(root),
        root.join("audit-state").join("trends.json")
    );
    assert_eq!(
        config.reports_dir(root),
        root.join("audit-state").join("reports")
    );
    assert_eq!(
        config.job_health_path(root),
        std::path::PathBuf::from("/var/lib/jobs.json")
    );
    assert_eq!(
        config.credentials_path(root),
        root.join("audit-state").join("notify.json")
    );
}

#[test]
fn test_toml_round_trip() {
    let config = VigilConfig::from_toml(
        r#"
[layout]
allowed_dirs = ["guides", "reference"]

[fixes]
index_command = ["make", "index"]
push = false
"#,
    )
    .unwrap();
    let rendered = config.to_toml().unwrap();
    let reparsed = VigilConfig::from_toml(&rendered).unwrap();
    assert_eq!(reparsed.layout.allowed_dirs, vec!["guides", "reference"]);
    assert!(!reparsed.fixes.effective_push());
    assert_eq!(reparsed.fixes.index_command().unwrap().0, "make");
}
