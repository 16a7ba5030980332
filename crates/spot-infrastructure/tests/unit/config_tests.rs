//! Configuration tests

use std::fs;

use spot_domain::Address;
use spot_infrastructure::config::loader::validate_app_config;
use spot_infrastructure::config::{AppConfig, ConfigLoader, InjectionConfig};
use spot_infrastructure::constants::{DEFAULT_LOG_LEVEL, DEFAULT_SOURCE_EXTENSIONS};
use tempfile::TempDir;

#[test]
fn test_defaults() {
    let config = AppConfig::default();

    assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
    assert_eq!(config.container.source_extensions, DEFAULT_SOURCE_EXTENSIONS);
    assert!(config.container.root_path.is_none());
    assert!(config.container.pluralize_kinds);
    assert!(!config.watcher.enabled);
    assert!(validate_app_config(&config).is_ok());
}

#[test]
fn test_load_from_toml_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("spot.toml");
    fs::write(
        &path,
        format!(
            r#"
[container]
root_path = "{}"
source_extensions = ["json"]

[[container.injections]]
kind = "controller"
provider_kind = "service"
provider_name = "session"
as = "session"

[[container.injections]]
kind = "controller"
name = "posts"
provider_kind = "service"
provider_name = "store"
as = "store"
annotation = "posts store"

[logging]
level = "debug"
"#,
            dir.path().display()
        ),
    )
    .unwrap();

    let config = ConfigLoader::new().with_config_path(&path).load().unwrap();

    assert_eq!(config.container.root_path.as_deref(), Some(dir.path()));
    assert_eq!(config.container.source_extensions, vec!["json"]);
    assert_eq!(config.logging.level, "debug");

    let injections = &config.container.injections;
    assert_eq!(injections.len(), 2);
    assert_eq!(injections[0].consumer(), Address::all("controller"));
    assert_eq!(injections[1].consumer(), Address::new("controller", "posts"));

    let rule = injections[1].rule();
    assert_eq!(rule.provider(), &Address::new("service", "store"));
    assert_eq!(rule.attach_as(), "store");
    assert_eq!(rule.label(), "posts store");
}

#[test]
fn test_save_then_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("saved.toml");
    let mut config = AppConfig::default();
    config.logging.level = "warn".to_string();
    config.container.pluralize_kinds = false;

    let loader = ConfigLoader::new();
    loader.save_to_file(&config, &path).unwrap();
    let loaded = ConfigLoader::new().with_config_path(&path).load().unwrap();

    assert_eq!(loaded.logging.level, "warn");
    assert!(!loaded.container.pluralize_kinds);
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let loader = ConfigLoader::new().with_config_path(dir.path().join("absent.toml"));

    let config = loader.load().unwrap();

    assert_eq!(config.container, AppConfig::default().container);
    assert_eq!(loader.config_path(), Some(dir.path().join("absent.toml").as_path()));
}

#[test]
fn test_invalid_log_level_rejected() {
    let mut config = AppConfig::default();
    config.logging.level = "loud".to_string();

    let err = validate_app_config(&config).unwrap_err();
    assert!(err.to_string().contains("Invalid log level"));
}

#[test]
fn test_dotted_extension_rejected() {
    let mut config = AppConfig::default();
    config.container.source_extensions = vec![".toml".to_string()];

    assert!(validate_app_config(&config).is_err());

    config.container.source_extensions.clear();
    assert!(validate_app_config(&config).is_err());
}

#[test]
fn test_empty_injection_field_rejected() {
    let mut config = AppConfig::default();
    config.container.injections.push(InjectionConfig {
        kind: "controller".to_string(),
        name: None,
        provider_kind: "service".to_string(),
        provider_name: "store".to_string(),
        attach_as: String::new(),
        annotation: None,
    });

    let err = validate_app_config(&config).unwrap_err();
    assert!(err.to_string().contains("controller:*"));
}

#[test]
fn test_watcher_requires_root_directory() {
    let mut config = AppConfig::default();
    config.watcher.enabled = true;
    assert!(validate_app_config(&config).is_err());

    let dir = TempDir::new().unwrap();
    config.container.root_path = Some(dir.path().join("missing"));
    assert!(validate_app_config(&config).is_err());

    config.container.root_path = Some(dir.path().to_path_buf());
    assert!(validate_app_config(&config).is_ok());
}
