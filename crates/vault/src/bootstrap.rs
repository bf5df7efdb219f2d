//! Startup routine that recovers the service-account credentials.
//!
//! Replaces import-time global initialisation with an explicit call: the
//! consuming process loads [`Config`] from the environment, calls
//! [`load_credentials`], and owns the returned struct. Any failure here is
//! fatal — the process must abort rather than continue with an absent or
//! unauthenticated credential set.

use tracing::info;

use common::{ServiceAccountKey, VaultError};

use crate::config::Config;
use crate::key::VaultKey;
use crate::store::SecretStore;

/// Open the vault named by `cfg` and parse the credentials document.
///
/// # Errors
///
/// - [`VaultError::Configuration`] if the key string is malformed or the
///   decrypted document is not a valid service-account key file.
/// - [`VaultError::Io`] if the vault file is missing or unreadable.
/// - [`VaultError::Decryption`] if the key is wrong or the blob is corrupted.
pub fn load_credentials(cfg: &Config) -> Result<ServiceAccountKey, VaultError> {
    let key = VaultKey::from_printable(&cfg.vault_key)
        .map_err(|e| VaultError::Configuration(format!("VAULT_KEY is unusable: {e}")))?;

    let store = SecretStore::new(&cfg.vault_path);
    let plaintext = store.open(&key)?;

    let credentials: ServiceAccountKey = serde_json::from_slice(&plaintext).map_err(|e| {
        VaultError::Configuration(format!("credentials document is not valid JSON: {e}"))
    })?;

    info!(
        client_email = %credentials.client_email,
        project_id = %credentials.project_id,
        "credentials recovered from vault"
    );
    Ok(credentials)
}
