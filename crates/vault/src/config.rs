//! Configuration for processes that open the vault at startup.
//!
//! All values are read from environment variables. A missing or empty
//! `VAULT_KEY` is a [`VaultError::Configuration`] and must abort the process
//! before any network credential use is attempted.

use std::path::PathBuf;

use serde::Deserialize;

use common::VaultError;

/// Validated startup configuration for a vault consumer.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Printable vault key, as printed by the `provision` binary. **Required.**
    pub vault_key: String,

    /// Path of the sealed vault file.
    #[serde(default = "default_vault_path")]
    pub vault_path: PathBuf,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_vault_path() -> PathBuf {
    "secret.vault".into()
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Configuration`] if `VAULT_KEY` is absent or any
    /// variable cannot be deserialised.
    pub fn from_env() -> Result<Self, VaultError> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .map_err(|e| {
                VaultError::Configuration(format!("failed to build configuration: {e}"))
            })?;

        let c: Config = cfg.try_deserialize().map_err(|e| {
            VaultError::Configuration(format!("failed to deserialise configuration: {e}"))
        })?;

        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<(), VaultError> {
        if self.vault_key.trim().is_empty() {
            return Err(VaultError::Configuration(
                "VAULT_KEY is required and must not be empty".into(),
            ));
        }
        if self.vault_path.as_os_str().is_empty() {
            return Err(VaultError::Configuration(
                "VAULT_PATH must not be empty".into(),
            ));
        }
        Ok(())
    }
}
