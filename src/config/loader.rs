//! Configuration Loader - File Loading, Env Overrides and Validation
//!
//! Handles loading `config.toml`, layering `BPJS_*` environment
//! variables on top, validating the active profile, and providing clear
//! error messages for misconfiguration.

use std::path::Path;

use tracing::info;

use super::{AppConfig, ConfigError, Environment};

/// Load and validate configuration from a TOML file.
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails or an unknown key is present
/// - The active profile is incomplete
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
  let path = path.as_ref();

  let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
    path: path.display().to_string(),
    source,
  })?;

  let config = load_config_str(&content, |key| std::env::var(key).ok())?;

  info!(
    env = %config.env,
    service = %config.active_profile().service_name,
    timeout_seconds = config.timeout_seconds,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Parse, apply overrides from `lookup`, then validate.
///
/// `lookup` resolves environment variable names; tests pass a map
/// instead of touching the process environment.
pub fn load_config_str<F>(content: &str, lookup: F) -> Result<AppConfig, ConfigError>
where
  F: Fn(&str) -> Option<String>,
{
  let mut config: AppConfig = toml::from_str(content)?;
  apply_env_overrides(&mut config, lookup)?;
  validate_config(&config)?;
  Ok(config)
}

/// Layer environment variables over the parsed file.
///
/// `BPJS_ENV` picks the profile; `BPJS_DEV_*` / `BPJS_PROD_*` override
/// that profile's fields. Empty variables are ignored.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<(), ConfigError>
where
  F: Fn(&str) -> Option<String>,
{
  let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

  if let Some(env) = get("BPJS_ENV") {
    config.env = env.parse()?;
  }

  for env in [Environment::Development, Environment::Production] {
    let prefix = env.env_prefix();
    let profile = config.profile_mut(env);

    if let Some(v) = get(&format!("{prefix}_BASE_URL")) {
      profile.base_url = v;
    }
    if let Some(v) = get(&format!("{prefix}_SERVICE_NAME")) {
      profile.service_name = v;
    }
    if let Some(v) = get(&format!("{prefix}_CONS_ID")) {
      profile.cons_id = v;
    }
    if let Some(v) = get(&format!("{prefix}_SECRET_KEY")) {
      profile.secret_key = v.into();
    }
    if let Some(v) = get(&format!("{prefix}_USER_KEY_ANTROL")) {
      profile.user_key = v;
    }
  }

  Ok(())
}

/// Validate the active profile and request settings.
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
  let profile = config.active_profile();

  if profile.base_url.trim().is_empty() {
    return Err(ConfigError::MissingField("base_url"));
  }
  if !profile.base_url.starts_with("http://") && !profile.base_url.starts_with("https://") {
    return Err(ConfigError::Invalid {
      field: "base_url",
      reason: format!("expected an http(s) URL, got {}", profile.base_url),
    });
  }
  if profile.service_name.trim().is_empty() {
    return Err(ConfigError::MissingField("service_name"));
  }
  if profile.cons_id.trim().is_empty() {
    return Err(ConfigError::MissingField("cons_id"));
  }
  if profile.secret_key.is_empty() {
    return Err(ConfigError::MissingField("secret_key"));
  }
  if profile.user_key.trim().is_empty() {
    return Err(ConfigError::MissingField("user_key"));
  }
  if config.timeout_seconds == 0 {
    return Err(ConfigError::Invalid {
      field: "timeout_seconds",
      reason: "must be positive".to_string(),
    });
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use super::*;
  use crate::config::LogFormat;

  const SAMPLE: &str = r#"
    env = "development"
    log_format = "json"

    [development]
    base_url = "https://apijkn-dev.bpjs-kesehatan.go.id"
    service_name = "antreanrs_dev"
    cons_id = "123456"
    secret_key = "abcdef123456"
    user_key = "xyz123"
  "#;

  fn no_env(_: &str) -> Option<String> {
    None
  }

  #[test]
  fn test_load_nonexistent_file() {
    let result = load_config("nonexistent.toml");
    assert!(matches!(result, Err(ConfigError::Io { .. })));
  }

  #[test]
  fn test_load_sample() {
    let config = load_config_str(SAMPLE, no_env).unwrap();
    assert_eq!(config.env, Environment::Development);
    assert_eq!(config.log_format, LogFormat::Json);
    assert_eq!(config.log_level, "info");
    assert_eq!(config.active_profile().service_name, "antreanrs_dev");
  }

  #[test]
  fn test_unknown_key_rejected() {
    let content = format!("{SAMPLE}\nverify_tls = false\n");
    assert!(matches!(
      load_config_str(&content, no_env),
      Err(ConfigError::Parse(_))
    ));
  }

  #[test]
  fn test_env_overrides_select_and_fill_profile() {
    let vars: HashMap<&str, &str> = [
      ("BPJS_ENV", "production"),
      ("BPJS_PROD_BASE_URL", "https://apijkn.bpjs-kesehatan.go.id"),
      ("BPJS_PROD_CONS_ID", "654321"),
      ("BPJS_PROD_SECRET_KEY", "123456abcdef"),
      ("BPJS_PROD_USER_KEY_ANTROL", "zyx321"),
    ]
    .into_iter()
    .collect();

    let config = load_config_str(SAMPLE, |k| vars.get(k).map(|v| (*v).to_string())).unwrap();
    assert_eq!(config.env, Environment::Production);
    let creds = config.credentials();
    assert_eq!(creds.consumer_id, "654321");
    assert_eq!(creds.user_key, "zyx321");
    assert_eq!(creds.service_name, "antreanrs");
  }

  #[test]
  fn test_missing_field_in_active_profile() {
    let content = SAMPLE.replace("cons_id = \"123456\"", "");
    assert!(matches!(
      load_config_str(&content, no_env),
      Err(ConfigError::MissingField("cons_id"))
    ));
  }

  #[test]
  fn test_unknown_env_override() {
    let result = load_config_str(SAMPLE, |k| (k == "BPJS_ENV").then(|| "staging".to_string()));
    assert!(matches!(result, Err(ConfigError::UnknownProfile(_))));
  }

  #[test]
  fn test_zero_timeout_rejected() {
    let content = format!("timeout_seconds = 0\n{SAMPLE}");
    assert!(matches!(
      load_config_str(&content, no_env),
      Err(ConfigError::Invalid { field: "timeout_seconds", .. })
    ));
  }
}
