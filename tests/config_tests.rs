use chrono::NaiveDate;
use std::io::Write;
use std::path::PathBuf;
use supply_dash::config::*;
use supply_dash::error::DashError;
use tempfile::NamedTempFile;

#[test]
fn test_defaults() {
    let config = DashboardConfig::default();
    assert_eq!(config.seed, DEFAULT_SEED);
    assert_eq!(config.months, 24);
    assert_eq!(config.as_of, None);
    assert_eq!(config.high_risk_threshold, 70.0);
    assert_eq!(config.output_dir, PathBuf::from("output"));
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let config = DashboardConfig::from_toml_str(
        r#"
seed = 7
as_of = "2024-06-30"
"#,
    )
    .unwrap();
    assert_eq!(config.seed, 7);
    assert_eq!(config.as_of, NaiveDate::from_ymd_opt(2024, 6, 30));
    assert_eq!(config.months, DEFAULT_MONTHS);
    assert_eq!(config.evaluation_year(), 2024);
}

#[test]
fn test_empty_toml_is_default() {
    let config = DashboardConfig::from_toml_str("").unwrap();
    assert_eq!(config, DashboardConfig::default());
}

#[test]
fn test_evaluation_year_override() {
    let config = DashboardConfig::from_toml_str("as_of = \"2024-06-30\"\nevaluation_year = 2023").unwrap();
    assert_eq!(config.evaluation_year(), 2023);
}

#[test]
fn test_invalid_values_rejected() {
    match DashboardConfig::from_toml_str("months = 0") {
        Err(DashError::Config(msg)) => assert!(msg.contains("months")),
        other => panic!("Expected config error, got {:?}", other),
    }
    match DashboardConfig::from_toml_str("months = 100000000") {
        Err(DashError::Config(msg)) => assert!(msg.contains("at most"), "{}", msg),
        other => panic!("Expected config error, got {:?}", other),
    }
    assert_eq!(
        DashboardConfig::from_toml_str(&format!("months = {}", MAX_MONTHS)).unwrap().months,
        MAX_MONTHS
    );
    assert!(matches!(
        DashboardConfig::from_toml_str("high_risk_threshold = 150.0"),
        Err(DashError::Config(_))
    ));
    assert!(matches!(
        DashboardConfig::from_toml_str("seed = \"not a number\""),
        Err(DashError::Toml(_))
    ));
}

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "seed = 99\nmonths = 12\noutput_dir = \"reports\"").unwrap();

    let config = DashboardConfig::load_from_file(file.path()).unwrap();
    assert_eq!(config.seed, 99);
    assert_eq!(config.months, 12);
    assert_eq!(config.output_dir, PathBuf::from("reports"));
}

#[test]
fn test_load_missing_file() {
    let result = DashboardConfig::load_from_file("/definitely/not/here.toml");
    assert!(matches!(result, Err(DashError::Config(_))));
}
