//! [`SecretStore`]: file-backed persistence for the sealed credentials blob.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{debug, info};

use common::VaultError;

use crate::crypto::{self, SealedBlob};
use crate::key::VaultKey;

/// Handle to the vault file on local disk.
///
/// The store performs one-shot, blocking operations: [`SecretStore::seal_file`]
/// once during provisioning, [`SecretStore::open`] once at startup. The file
/// is read-only from the running process's perspective after creation, so no
/// locking is needed.
#[derive(Debug, Clone)]
pub struct SecretStore {
    vault_path: PathBuf,
}

impl SecretStore {
    /// Create a store backed by the given vault file path.
    pub fn new(vault_path: impl Into<PathBuf>) -> Self {
        Self {
            vault_path: vault_path.into(),
        }
    }

    /// Path of the vault file this store reads and writes.
    pub fn vault_path(&self) -> &Path {
        &self.vault_path
    }

    /// Seal the plaintext file at `secret_path` under a freshly generated key.
    ///
    /// Overwrites any previous vault file contents. The key is returned to
    /// the caller and never persisted here — distributing it (typically into
    /// the `VAULT_KEY` environment variable) is the operator's job.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Io`] if the plaintext source cannot be read or
    /// the vault file cannot be written.
    pub fn seal_file(&self, secret_path: impl AsRef<Path>) -> Result<VaultKey, VaultError> {
        let secret_path = secret_path.as_ref();
        let plaintext =
            std::fs::read(secret_path).map_err(|e| VaultError::io(secret_path, e))?;
        debug!(
            path = %secret_path.display(),
            bytes = plaintext.len(),
            "read plaintext secret"
        );

        let key = VaultKey::generate();
        let blob = crypto::cipher::seal(&plaintext, key.as_bytes())
            .map_err(|e| VaultError::Decryption(e.to_string()))?;

        std::fs::write(&self.vault_path, blob.to_string())
            .map_err(|e| VaultError::io(&self.vault_path, e))?;
        info!(path = %self.vault_path.display(), "sealed vault file written");

        Ok(key)
    }

    /// Open the vault file and return the plaintext it protects.
    ///
    /// Idempotent: repeated calls with the same key and an unchanged vault
    /// file return identical plaintext.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Io`] if the vault file is missing or unreadable,
    /// and [`VaultError::Decryption`] if the blob is malformed, truncated,
    /// tampered with, or sealed under a different key. Fails closed — no
    /// partial or unauthenticated plaintext is ever returned.
    pub fn open(&self, key: &VaultKey) -> Result<Vec<u8>, VaultError> {
        let contents = std::fs::read_to_string(&self.vault_path)
            .map_err(|e| VaultError::io(&self.vault_path, e))?;

        let blob = SealedBlob::from_str(&contents)
            .map_err(|e| VaultError::Decryption(e.to_string()))?;

        let plaintext = crypto::cipher::open(&blob, key.as_bytes())
            .map_err(|e| VaultError::Decryption(e.to_string()))?;
        debug!(
            path = %self.vault_path.display(),
            bytes = plaintext.len(),
            "vault opened"
        );
        Ok(plaintext)
    }
}
