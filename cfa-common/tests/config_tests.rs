//! Integration tests for configuration resolution and graceful degradation
//!
//! Covers:
//! - Missing TOML files do not cause failure (defaults are used)
//! - Priority order: CLI argument, then CFA_CONFIG, then per-user file
//! - Environment override of the firm name
//!
//! Tests that touch CFA_CONFIG or CFA_FIRM_NAME are marked #[serial] so they
//! never race each other on process environment.

use cfa_common::config::{
    ConfigResolver, ConfigSource, TomlConfig, CONFIG_ENV_VAR, FIRM_NAME_ENV_VAR,
};
use serial_test::serial;
use std::env;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn clear_env() {
    env::remove_var(CONFIG_ENV_VAR);
    env::remove_var(FIRM_NAME_ENV_VAR);
}

fn write_config(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
#[serial]
fn test_cli_path_is_loaded() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "cfa.toml",
        r#"
firm_name = "Smith & Jones"

[tiers]
trial_analysis_cap = 20
"#,
    );

    let loaded = ConfigResolver::new(Some(path.clone())).load().unwrap();

    assert_eq!(loaded.source, ConfigSource::File(path));
    assert_eq!(loaded.config.firm_name, "Smith & Jones");
    assert_eq!(loaded.config.tiers.trial_analysis_cap, 20);
    assert_eq!(loaded.config.tiers.free_trial_limit, 3);
}

#[test]
#[serial]
fn test_missing_cli_path_falls_back_to_defaults() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("does-not-exist.toml");

    let loaded = ConfigResolver::new(Some(path.clone())).load().unwrap();

    assert_eq!(loaded.source, ConfigSource::Missing(path));
    assert_eq!(loaded.config, TomlConfig::default());
}

#[test]
#[serial]
fn test_env_var_path_used_without_cli_argument() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "env.toml", "[report]\nexcerpts_per_section = 2\n");
    env::set_var(CONFIG_ENV_VAR, &path);

    let loaded = ConfigResolver::new(None).load().unwrap();

    assert_eq!(loaded.source, ConfigSource::File(path));
    assert_eq!(loaded.config.report.excerpts_per_section, 2);

    clear_env();
}

#[test]
#[serial]
fn test_cli_path_takes_precedence_over_env_var() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let cli = write_config(&dir, "cli.toml", "firm_name = \"From CLI\"\n");
    let from_env = write_config(&dir, "env.toml", "firm_name = \"From Env\"\n");
    env::set_var(CONFIG_ENV_VAR, &from_env);

    let resolver = ConfigResolver::new(Some(cli.clone()));
    assert_eq!(resolver.resolve_path(), Some(cli));
    assert_eq!(resolver.load().unwrap().config.firm_name, "From CLI");

    clear_env();
}

#[test]
#[serial]
fn test_firm_name_env_override() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "cfa.toml", "firm_name = \"File Firm\"\n");
    env::set_var(FIRM_NAME_ENV_VAR, "Env Firm LLP");

    let loaded = ConfigResolver::new(Some(path)).load().unwrap();
    assert_eq!(loaded.config.firm_name, "Env Firm LLP");

    clear_env();
}

#[test]
#[serial]
fn test_blank_firm_name_env_is_ignored() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.toml");
    env::set_var(FIRM_NAME_ENV_VAR, "   ");

    let loaded = ConfigResolver::new(Some(path)).load().unwrap();
    assert_eq!(loaded.config.firm_name, "Law Firm");

    clear_env();
}

#[test]
#[serial]
fn test_invalid_file_is_an_error() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "bad.toml", "[logging]\nlevel = \"shout\"\n");

    let result = ConfigResolver::new(Some(path)).load();
    assert!(result.is_err());
}
