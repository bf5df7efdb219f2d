//! Configuration loading and validation for the provisioning binary.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Validated provisioning configuration.
///
/// Everything has a default so the command runs with no arguments and no
/// environment, matching the expected operator workflow: drop `secret.json`
/// next to the binary, run `provision`, copy the printed key.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Path of the plaintext credentials file to seal.
    #[serde(default = "default_secret_path")]
    pub secret_path: PathBuf,

    /// Path the sealed vault file is written to.
    #[serde(default = "default_vault_path")]
    pub vault_path: PathBuf,

    /// Tracing log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_secret_path() -> PathBuf {
    "secret.json".into()
}
fn default_vault_path() -> PathBuf {
    "secret.vault".into()
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build provisioning configuration")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise provisioning configuration")?;

        c.validate()?;
        Ok(c)
    }

    fn validate(&self) -> Result<()> {
        if self.secret_path.as_os_str().is_empty() {
            anyhow::bail!("SECRET_PATH must not be empty");
        }
        if self.vault_path.as_os_str().is_empty() {
            anyhow::bail!("VAULT_PATH must not be empty");
        }
        if self.secret_path == self.vault_path {
            anyhow::bail!("SECRET_PATH and VAULT_PATH must differ");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        assert_eq!(default_secret_path(), PathBuf::from("secret.json"));
        assert_eq!(default_vault_path(), PathBuf::from("secret.vault"));
        assert_eq!(default_log_level(), "info");
    }

    #[test]
    fn validate_rejects_empty_secret_path() {
        let cfg = Config {
            secret_path: PathBuf::new(),
            vault_path: default_vault_path(),
            log_level: default_log_level(),
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_identical_paths() {
        let cfg = Config {
            secret_path: "secret.json".into(),
            vault_path: "secret.json".into(),
            log_level: default_log_level(),
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_accepts_defaults() {
        let cfg = Config {
            secret_path: default_secret_path(),
            vault_path: default_vault_path(),
            log_level: default_log_level(),
        };
        assert!(cfg.validate().is_ok());
    }
}
