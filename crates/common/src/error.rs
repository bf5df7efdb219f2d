//! Common error types shared across crates.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for the vault.
///
/// Variants map to sysexits-style process exit codes so the provisioning
/// binary and any consuming startup routine report failures uniformly:
/// - [`VaultError::Io`] → 74 (`EX_IOERR`)
/// - [`VaultError::Decryption`] → 65 (`EX_DATAERR`)
/// - [`VaultError::Configuration`] → 78 (`EX_CONFIG`)
///
/// Every variant is fatal. A failed authentication check is never transient,
/// so there is no retry path anywhere in this workspace.
#[derive(Debug, Error)]
pub enum VaultError {
    /// A source or destination file could not be read or written.
    #[error("i/o failure on {path}: {source}")]
    Io {
        /// The file the operation was acting on.
        path: PathBuf,
        /// The underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// Authentication failed: wrong key, truncated blob, or tampered blob.
    ///
    /// The message never distinguishes the three causes — AEAD cannot tell
    /// them apart, and the caller must not act on unauthenticated data in
    /// any of them.
    #[error("decryption failed: {0}")]
    Decryption(String),

    /// The key is missing from the environment, the key string is malformed,
    /// or the decrypted credentials document cannot be parsed.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl VaultError {
    /// Returns the process exit code that should be used for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            VaultError::Io { .. } => 74,
            VaultError::Decryption(_) => 65,
            VaultError::Configuration(_) => 78,
        }
    }

    /// Wrap a [`std::io::Error`] together with the path that produced it.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        VaultError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes() {
        let io = VaultError::io("secret.vault", std::io::Error::other("boom"));
        assert_eq!(io.exit_code(), 74);
        assert_eq!(VaultError::Decryption("x".into()).exit_code(), 65);
        assert_eq!(VaultError::Configuration("x".into()).exit_code(), 78);
    }

    #[test]
    fn io_display_includes_path() {
        let e = VaultError::io(
            "secret.vault",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        assert!(e.to_string().contains("secret.vault"));
    }

    #[test]
    fn display_includes_message() {
        let e = VaultError::Configuration("VAULT_KEY not set".into());
        assert!(e.to_string().contains("VAULT_KEY not set"));
    }
}
