use hdlrefactor_core::config::{Config, DatabaseConfig, MergeStrategy};

#[test]
fn test_database_config_defaults() {
    let config = DatabaseConfig::default();
    assert!(config.fix_case);
    assert!(config.add_tb_variants);
    assert_eq!(config.tb_suffix, "_tb");
    assert_eq!(config.aliases.len(), 17);
}

#[test]
fn test_config_validation_tb_suffix() {
    let mut config = Config::default();

    config.database.tb_suffix = "_testbench".to_string();
    assert!(config.validate().is_ok());

    config.database.tb_suffix = String::new();
    let result = config.validate();
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("database.tb_suffix must not be empty"));
}

#[test]
fn test_config_validation_library_pattern() {
    let mut config = Config::default();

    config.analyzer.library_pattern = "*.vhdl".to_string();
    assert!(config.validate().is_ok());

    config.analyzer.library_pattern = "**[".to_string();
    let result = config.validate();
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Invalid analyzer.library_pattern"));
}

#[test]
fn test_merge_strategy_round_trip_through_toml() {
    let config = Config::from_toml_str(
        r#"
        [analyzer]
        merge_strategy = "positional"
    "#,
    )
    .expect("Failed to parse TOML");
    assert_eq!(config.analyzer.merge_strategy, MergeStrategy::Positional);
}
