use sme_ledger::config::{Config, ConfigManager};
use tempfile::TempDir;

fn manager() -> (TempDir, ConfigManager) {
    let temp = TempDir::new().expect("create temp dir");
    let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("config manager");
    (temp, manager)
}

#[test]
fn missing_file_loads_defaults() {
    let (_temp, manager) = manager();
    let config = manager.load().unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.currency_symbol, "₵");
    assert_eq!(config.export_prefix, "sme_export");
    assert!(manager.path().ends_with("config/config.json"));
}

#[test]
fn saved_preferences_survive_reload() {
    let (temp, manager) = manager();
    let mut config = Config::default();
    config.set_value("export_dir", "/tmp/exports").unwrap();
    config.set_value("default_collector", "Ama Owusu").unwrap();
    config.set_value("high_contrast", "yes").unwrap();
    manager.save(&config).unwrap();

    let reloaded = ConfigManager::with_base_dir(temp.path().to_path_buf())
        .unwrap()
        .load()
        .unwrap();
    assert_eq!(reloaded, config);
    assert_eq!(reloaded.export_dir(), std::path::PathBuf::from("/tmp/exports"));
    assert!(!temp.path().join("config/config.json.tmp").exists());
}

#[test]
fn partial_files_fill_in_defaults() {
    let (_temp, manager) = manager();
    std::fs::write(manager.path(), r#"{ "currency_symbol": "$" }"#).unwrap();
    let config = manager.load().unwrap();
    assert_eq!(config.currency_symbol, "$");
    assert_eq!(config.export_prefix, "sme_export");
    assert!(!config.high_contrast);
}

#[test]
fn malformed_file_is_a_serialization_error() {
    let (_temp, manager) = manager();
    std::fs::write(manager.path(), "{ not json").unwrap();
    let err = manager.load().unwrap_err();
    assert!(matches!(err, sme_ledger::LedgerError::Serde(_)));
}
