//! Unit tests for config module

use std::fs;

use tempfile::TempDir;
use tex_filter::filter::{ConfigError, REGISTRY};
use tex_filter::{Config, FilterConfig, Rule};

fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn default_config_has_expected_values() {
    let config = Config::default();
    assert!(config.detect_error);
    assert!(config.texmf_root.is_none());
    assert!(config.filters.is_empty());
    assert_eq!(config.filter_config().unwrap(), FilterConfig::default());
}

#[test]
fn registry_defaults_match_filter_config() {
    let defaults = FilterConfig::default();
    for spec in REGISTRY {
        assert_eq!(defaults.get(spec.rule), spec.default, "{}", spec.name);
    }
    assert!(defaults.paths);
    assert!(!defaults.relative_paths);
    assert!(!defaults.citeref);
    assert!(defaults.node_memory);
}

#[test]
fn config_serialization_roundtrip() {
    let mut config = Config::default();
    config.texmf_root = Some("/usr/local/texlive/2020".to_string());
    config.filters.insert("fonts".to_string(), true);
    let toml_str = toml::to_string(&config).unwrap();
    let parsed: Config = toml::from_str(&toml_str).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn load_from_applies_filters() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "detect_error = false\n[filters]\nempty_lines = false\nunderfull_hbox = true\n",
    );
    let config = Config::load_from(&path).unwrap();
    assert!(!config.detect_error);
    let filters = config.filter_config().unwrap();
    assert!(!filters.get(Rule::EmptyLines));
    assert!(filters.get(Rule::UnderfullHbox));
    assert!(filters.get(Rule::Paths));
}

#[test]
fn load_from_rejects_unknown_filter() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[filters]\nfull_hbox = true\n");
    let err = Config::load_from(&path).unwrap_err();
    let unknown = err.downcast_ref::<ConfigError>();
    assert!(
        matches!(unknown, Some(ConfigError::UnknownRule { name }) if name == "full_hbox"),
        "{err:#}"
    );
}

#[test]
fn load_from_rejects_unknown_key() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "detect_errors = true\n");
    let err = Config::load_from(&path).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to parse config file"));
}

#[test]
fn load_from_missing_file_is_error() {
    let dir = TempDir::new().unwrap();
    let err = Config::load_from(&dir.path().join("missing.toml")).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to read config file"));
}

#[test]
fn rule_names_and_flags_parse() {
    assert_eq!("relative_paths".parse::<Rule>().unwrap(), Rule::RelativePaths);
    assert_eq!("relative-paths".parse::<Rule>().unwrap(), Rule::RelativePaths);
    assert!("relative".parse::<Rule>().is_err());
}

#[test]
fn config_path_is_under_dot_config() {
    let path = Config::config_path().unwrap();
    assert!(path.ends_with(".config/tex-filter/config.toml"), "{path:?}");
}
