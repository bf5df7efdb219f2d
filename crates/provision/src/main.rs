//! `provision` — one-shot binary that seals the credentials file.
//!
//! Run sequence:
//! 1. Load and validate [`Config`] from environment variables (all optional).
//! 2. Initialise structured JSON logging on stderr.
//! 3. Read the plaintext secret, seal it under a fresh key, write the vault
//!    file.
//! 4. Print the key to stdout and exit 0.
//!
//! On failure the process exits nonzero with the sysexits code carried by
//! [`VaultError`], or 1 for anything outside the vault's error taxonomy.

mod config;
mod telemetry;

use anyhow::Result;
use tracing::info;

use common::VaultError;
use config::Config;
use vault::SecretStore;

fn main() {
    if let Err(e) = run() {
        eprintln!("ERROR: {e:#}");
        let code = e
            .downcast_ref::<VaultError>()
            .map(VaultError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn run() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: provisioning configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        secret_path = %cfg.secret_path.display(),
        vault_path = %cfg.vault_path.display(),
        "provision starting"
    );

    // -----------------------------------------------------------------------
    // 3. Seal
    // -----------------------------------------------------------------------
    let store = SecretStore::new(&cfg.vault_path);
    let key = store.seal_file(&cfg.secret_path)?;
    info!(vault_path = %cfg.vault_path.display(), "vault sealed");

    // -----------------------------------------------------------------------
    // 4. Hand the key to the operator
    // -----------------------------------------------------------------------
    // The key goes to stdout only. The operator places it in the VAULT_KEY
    // environment variable of the consuming process; it is never stored here.
    println!("{}", key.to_printable());
    Ok(())
}
