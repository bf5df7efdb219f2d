//! [`VaultKey`]: the symmetric key that seals and opens the vault.

use aes_gcm_siv::aead::OsRng;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use thiserror::Error;

use crate::crypto::KEY_LEN;

/// Errors produced by the key layer.
#[derive(Debug, Error)]
pub enum KeyError {
    /// The printable key string is not valid base64url.
    #[error("key is not valid base64url")]
    InvalidEncoding,

    /// The decoded key material has an unexpected length.
    #[error("key has invalid length: expected {KEY_LEN} bytes, got {0}")]
    InvalidLength(usize),
}

/// Fixed-size key buffer that holds exactly [`KEY_LEN`] bytes.
///
/// Generated once per provisioning run and handed to the operator as a
/// printable string; the running process reads it back from the `VAULT_KEY`
/// environment variable. When this type is dropped, the memory is overwritten
/// with zeroes to minimise the window during which key material lives in RAM.
#[derive(Clone, PartialEq, Eq)]
pub struct VaultKey(Box<[u8; KEY_LEN]>);

impl VaultKey {
    /// Generate a fresh random key from the OS CSPRNG.
    pub fn generate() -> Self {
        use aes_gcm_siv::aead::rand_core::RngCore;
        let mut buf = Box::new([0u8; KEY_LEN]);
        OsRng.fill_bytes(buf.as_mut());
        Self(buf)
    }

    /// Parse a key from its printable base64url form.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidEncoding`] if the string is not base64url,
    /// or [`KeyError::InvalidLength`] if it decodes to the wrong number of
    /// bytes.
    pub fn from_printable(s: &str) -> Result<Self, KeyError> {
        let decoded = URL_SAFE_NO_PAD
            .decode(s.trim())
            .map_err(|_| KeyError::InvalidEncoding)?;
        if decoded.len() != KEY_LEN {
            return Err(KeyError::InvalidLength(decoded.len()));
        }
        let mut buf = Box::new([0u8; KEY_LEN]);
        buf.copy_from_slice(&decoded);
        Ok(Self(buf))
    }

    /// Render the key as the printable string handed to the operator.
    ///
    /// This is the only path that exposes key material; there is deliberately
    /// no `Display` impl so a key cannot end up in a log line by accident.
    pub fn to_printable(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.0.as_ref())
    }

    /// Borrow the raw key bytes for the cipher layer.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl Drop for VaultKey {
    fn drop(&mut self) {
        // Zero the key material on drop.
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

impl std::fmt::Debug for VaultKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material — not even in debug builds.
        f.write_str("VaultKey([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable_round_trip() {
        let key = VaultKey::generate();
        let s = key.to_printable();
        // 32 bytes base64url-no-pad = 43 chars.
        assert_eq!(s.len(), 43);
        let parsed = VaultKey::from_printable(&s).unwrap();
        assert_eq!(parsed, key);
    }

    #[test]
    fn generate_is_random() {
        assert_ne!(VaultKey::generate(), VaultKey::generate());
    }

    #[test]
    fn from_printable_trims_whitespace() {
        let key = VaultKey::generate();
        let s = format!("{}\n", key.to_printable());
        assert_eq!(VaultKey::from_printable(&s).unwrap(), key);
    }

    #[test]
    fn rejects_non_base64() {
        assert!(matches!(
            VaultKey::from_printable("not base64!!!"),
            Err(KeyError::InvalidEncoding)
        ));
    }

    #[test]
    fn rejects_wrong_length() {
        let short = URL_SAFE_NO_PAD.encode([0u8; 16]);
        assert!(matches!(
            VaultKey::from_printable(&short),
            Err(KeyError::InvalidLength(16))
        ));
    }

    #[test]
    fn key_redacted_in_debug() {
        let key = VaultKey::generate();
        assert!(format!("{key:?}").contains("REDACTED"));
    }
}
