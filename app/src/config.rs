//! Application configuration: YAML file plus environment overrides.

use crate::error::ConfigError;
use serde::Deserialize;
use std::{
  env, fs,
  path::{Path, PathBuf},
};

const DEFAULT_CONFIG_BASE_NAME: &str = "trellis";
const DEFAULT_CONFIG_EXTENSION: &str = "yaml";

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
  pub port: u16,
  pub database_url: Option<String>,
  pub log_level: String,
  pub service_name: String,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      port: DEFAULT_PORT,
      database_url: None,
      log_level: "info".to_string(),
      service_name: "trellis".to_string(),
    }
  }
}

impl AppConfig {
  pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
    serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))
  }

  pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
    tracing::debug!(path = %path.display(), "loading configuration file");
    let contents = fs::read_to_string(path)?;
    Self::from_yaml_str(&contents)
  }

  /// Loads the configuration file found by [`find_config_file`], or the
  /// defaults when there is none, then applies environment overrides.
  pub fn load() -> Result<Self, ConfigError> {
    let mut config = match find_config_file(None) {
      Ok(path) => Self::from_file(&path)?,
      Err(ConfigError::NotFound(searched)) => {
        tracing::debug!(%searched, "no configuration file, using defaults");
        Self::default()
      }
      Err(e) => return Err(e),
    };
    config.apply_env_overrides()?;
    Ok(config)
  }

  /// Overrides fields from `PORT`, `DATABASE_URL` and `LOG_LEVEL`.
  pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
    if let Ok(port) = env::var("PORT") {
      self.port = port.parse().map_err(|e| ConfigError::InvalidValue {
        field: "PORT".to_string(),
        message: format!("{:?} is not a valid port: {}", port, e),
      })?;
    }
    if let Ok(url) = env::var("DATABASE_URL") {
      self.database_url = Some(url).filter(|url| !url.is_empty());
    }
    if let Ok(level) = env::var("LOG_LEVEL") {
      self.log_level = level;
    }
    Ok(())
  }
}

/// Finds the configuration file for an optional environment suffix.
///
/// `trellis.<env>.yaml` is preferred over `trellis.yaml`. The suffix falls
/// back to `TRELLIS_ENV`, then `APP_ENV`.
pub fn find_config_file(environment_suffix: Option<&str>) -> Result<PathBuf, ConfigError> {
  find_config_file_in(Path::new("."), environment_suffix)
}

pub(crate) fn find_config_file_in(
  dir: &Path,
  environment_suffix: Option<&str>,
) -> Result<PathBuf, ConfigError> {
  let env_from_var = environment_suffix
    .map(|s| s.to_string())
    .or_else(|| env::var("TRELLIS_ENV").ok())
    .or_else(|| env::var("APP_ENV").ok());

  let mut files_to_check: Vec<String> = Vec::new();
  if let Some(env_str) = env_from_var.filter(|s| !s.is_empty()) {
    files_to_check.push(format!(
      "{}.{}.{}",
      DEFAULT_CONFIG_BASE_NAME, env_str, DEFAULT_CONFIG_EXTENSION
    ));
  }
  files_to_check.push(format!(
    "{}.{}",
    DEFAULT_CONFIG_BASE_NAME, DEFAULT_CONFIG_EXTENSION
  ));

  files_to_check
    .iter()
    .map(|file_name| dir.join(file_name))
    .find(|path| path.is_file())
    .ok_or_else(|| {
      ConfigError::NotFound(format!(
        "Searched for: {:?} in {:?}. Provide a config file or check TRELLIS_ENV/APP_ENV.",
        files_to_check, dir
      ))
    })
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;
  use serial_test::serial;
  use std::io::Write;
  use tempfile::{tempdir, NamedTempFile};

  fn clear_env() {
    for key in ["PORT", "DATABASE_URL", "LOG_LEVEL", "TRELLIS_ENV", "APP_ENV"] {
      env::remove_var(key);
    }
  }

  #[test]
  fn empty_yaml_yields_defaults() {
    let config = AppConfig::from_yaml_str("{}").unwrap();
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.port, 3000);
  }

  #[test]
  fn parses_all_fields() {
    let yaml = "port: 8080\ndatabase_url: postgres://localhost/app\nlog_level: debug\nservice_name: users\n";
    let config = AppConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(
      config,
      AppConfig {
        port: 8080,
        database_url: Some("postgres://localhost/app".to_string()),
        log_level: "debug".to_string(),
        service_name: "users".to_string(),
      }
    );
  }

  #[test]
  fn rejects_unknown_fields() {
    let err = AppConfig::from_yaml_str("prot: 1").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
  }

  #[test]
  fn reads_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "port: 4000").unwrap();
    let config = AppConfig::from_file(file.path()).unwrap();
    assert_eq!(config.port, 4000);
  }

  #[test]
  fn missing_file_is_a_read_error() {
    let dir = tempdir().unwrap();
    let err = AppConfig::from_file(&dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read(_)));
  }

  #[test]
  #[serial]
  fn env_overrides_fields() {
    clear_env();
    env::set_var("PORT", "9090");
    env::set_var("DATABASE_URL", "postgres://env/db");
    env::set_var("LOG_LEVEL", "trace");

    let mut config = AppConfig::default();
    config.apply_env_overrides().unwrap();
    clear_env();

    assert_eq!(config.port, 9090);
    assert_eq!(config.database_url.as_deref(), Some("postgres://env/db"));
    assert_eq!(config.log_level, "trace");
  }

  #[test]
  #[serial]
  fn invalid_port_is_rejected() {
    clear_env();
    env::set_var("PORT", "not-a-port");

    let result = AppConfig::default().apply_env_overrides();
    clear_env();

    match result {
      Err(ConfigError::InvalidValue { field, .. }) => assert_eq!(field, "PORT"),
      other => panic!("unexpected result: {:?}", other),
    }
  }

  #[test]
  #[serial]
  fn environment_specific_file_wins() {
    clear_env();
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("trellis.yaml"), "port: 1").unwrap();
    fs::write(dir.path().join("trellis.dev.yaml"), "port: 2").unwrap();

    let path = find_config_file_in(dir.path(), Some("dev")).unwrap();
    assert_eq!(path, dir.path().join("trellis.dev.yaml"));

    env::set_var("APP_ENV", "dev");
    let path = find_config_file_in(dir.path(), None).unwrap();
    clear_env();
    assert_eq!(path, dir.path().join("trellis.dev.yaml"));

    let path = find_config_file_in(dir.path(), Some("prod")).unwrap();
    assert_eq!(path, dir.path().join("trellis.yaml"));
  }

  #[test]
  #[serial]
  fn no_file_is_not_found() {
    clear_env();
    let dir = tempdir().unwrap();
    let err = find_config_file_in(dir.path(), None).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound(_)));
  }
}
