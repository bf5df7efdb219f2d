//! AES-256-GCM-SIV sealing and opening of the credentials blob.
//!
//! **Algorithm choice:** AES-256-GCM-SIV (RFC 8452) is nonce-misuse-resistant.
//! The vault is only sealed once per provisioning run with a fresh key, but
//! resealing after key rotation must stay safe even if an operator reuses a
//! key by mistake.
//!
//! **Do NOT substitute plain AES-256-GCM with a fixed nonce.** GCM nonce reuse
//! is catastrophic — it breaks both confidentiality and authentication.

use aes_gcm_siv::{
    aead::{Aead, KeyInit, OsRng},
    Aes256GcmSiv, Nonce,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use thiserror::Error;

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Byte length of an AES-GCM-SIV nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Prefix that appears at the start of every sealed blob.
pub const VERSION_PREFIX: &str = "v1";

/// A parsed sealed blob — the entire contents of the vault file.
///
/// The string representation is `v1.<base64url(nonce)>.<base64url(ciphertext+tag)>`.
/// It is self-contained: no side-channel metadata is needed to open it, and
/// the `v1` prefix leaves room for algorithm migration without breaking
/// blobs already on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedBlob {
    /// Raw nonce bytes.
    pub nonce: [u8; NONCE_LEN],
    /// Raw ciphertext + authentication tag bytes.
    pub ciphertext: Vec<u8>,
}

impl std::fmt::Display for SealedBlob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{}.{}",
            VERSION_PREFIX,
            URL_SAFE_NO_PAD.encode(self.nonce),
            URL_SAFE_NO_PAD.encode(&self.ciphertext),
        )
    }
}

impl std::str::FromStr for SealedBlob {
    type Err = CipherError;

    /// Parse a vault-file string back into a [`SealedBlob`].
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InvalidFormat`] if the string does not match the
    /// expected `v1.<nonce>.<ciphertext>` structure.
    fn from_str(s: &str) -> Result<Self, CipherError> {
        let parts: Vec<&str> = s.trim_end().splitn(3, '.').collect();
        if parts.len() != 3 || parts[0] != VERSION_PREFIX {
            return Err(CipherError::InvalidFormat);
        }
        let nonce_bytes = URL_SAFE_NO_PAD
            .decode(parts[1])
            .map_err(|_| CipherError::InvalidFormat)?;
        if nonce_bytes.len() != NONCE_LEN {
            return Err(CipherError::InvalidFormat);
        }
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&nonce_bytes);

        let ciphertext = URL_SAFE_NO_PAD
            .decode(parts[2])
            .map_err(|_| CipherError::InvalidFormat)?;

        Ok(Self { nonce, ciphertext })
    }
}

/// Errors produced by the cipher layer.
#[derive(Debug, Error)]
pub enum CipherError {
    /// The key is the wrong length (must be [`KEY_LEN`] bytes).
    #[error("invalid key length: expected {KEY_LEN} bytes")]
    InvalidKeyLength,

    /// AES-GCM-SIV authentication failed — wrong key or tampered blob.
    #[error("aead operation failed")]
    AeadFailure,

    /// The vault file contents do not match the expected blob format.
    #[error("invalid sealed blob format")]
    InvalidFormat,
}

/// Seal plaintext bytes under `key` using AES-256-GCM-SIV.
///
/// A random 96-bit nonce is generated per call via the OS CSPRNG and embedded
/// in the returned blob alongside the ciphertext and authentication tag.
///
/// # Errors
///
/// Returns [`CipherError::InvalidKeyLength`] if `key` is not [`KEY_LEN`] bytes.
/// Returns [`CipherError::AeadFailure`] on an internal AEAD error (should be
/// unreachable with a valid key and nonce).
pub fn seal(plaintext: &[u8], key: &[u8]) -> Result<SealedBlob, CipherError> {
    let cipher = build_cipher(key)?;

    // Use OsRng for a cryptographically secure random nonce.
    use aes_gcm_siv::aead::rand_core::RngCore;
    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|_| CipherError::AeadFailure)?;

    Ok(SealedBlob {
        nonce: nonce_bytes,
        ciphertext,
    })
}

/// Open a [`SealedBlob`] back to plaintext bytes.
///
/// Fails closed: on any authentication failure no plaintext is returned, not
/// even a partially decrypted buffer.
///
/// # Errors
///
/// Returns [`CipherError::InvalidKeyLength`] if `key` is not [`KEY_LEN`] bytes.
/// Returns [`CipherError::AeadFailure`] if authentication fails (wrong key or
/// tampered data).
pub fn open(blob: &SealedBlob, key: &[u8]) -> Result<Vec<u8>, CipherError> {
    let cipher = build_cipher(key)?;
    let nonce = Nonce::from_slice(&blob.nonce);
    cipher
        .decrypt(nonce, blob.ciphertext.as_ref())
        .map_err(|_| CipherError::AeadFailure)
}

fn build_cipher(key: &[u8]) -> Result<Aes256GcmSiv, CipherError> {
    if key.len() != KEY_LEN {
        return Err(CipherError::InvalidKeyLength);
    }
    Aes256GcmSiv::new_from_slice(key).map_err(|_| CipherError::InvalidKeyLength)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn random_key() -> Vec<u8> {
        use aes_gcm_siv::aead::rand_core::RngCore;
        let mut key = vec![0u8; KEY_LEN];
        OsRng.fill_bytes(&mut key);
        key
    }

    #[test]
    fn seal_open_round_trip() {
        let key = random_key();
        let plaintext = br#"{"type":"service_account"}"#;
        let blob = seal(plaintext, &key).unwrap();
        let opened = open(&blob, &key).unwrap();
        assert_eq!(opened, plaintext);
    }

    #[test]
    fn wrong_key_fails_open() {
        let key1 = random_key();
        let key2 = random_key();
        let blob = seal(b"secret", &key1).unwrap();
        assert!(matches!(
            open(&blob, &key2),
            Err(CipherError::AeadFailure)
        ));
    }

    #[test]
    fn invalid_key_length_rejected() {
        let short_key = vec![0u8; 16];
        assert!(seal(b"x", &short_key).is_err());
    }

    #[test]
    fn display_round_trip() {
        let key = random_key();
        let blob = seal(b"hello", &key).unwrap();
        let s = blob.to_string();
        assert!(s.starts_with("v1."));
        let parsed = SealedBlob::from_str(&s).unwrap();
        assert_eq!(parsed, blob);
    }

    #[test]
    fn from_str_tolerates_trailing_newline() {
        let key = random_key();
        let blob = seal(b"hello", &key).unwrap();
        let s = format!("{blob}\n");
        assert_eq!(SealedBlob::from_str(&s).unwrap(), blob);
    }

    #[test]
    fn from_str_rejects_bad_prefix() {
        assert!(SealedBlob::from_str("v2.abc.def").is_err());
    }

    #[test]
    fn from_str_rejects_too_few_parts() {
        assert!(SealedBlob::from_str("v1.abc").is_err());
    }

    #[test]
    fn from_str_rejects_bad_base64() {
        assert!(SealedBlob::from_str("v1.!!!.abc").is_err());
    }

    #[test]
    fn tampered_ciphertext_fails_auth() {
        let key = random_key();
        let mut blob = seal(b"tamper me", &key).unwrap();
        blob.ciphertext[0] ^= 0x01;
        assert!(open(&blob, &key).is_err());
    }

    #[test]
    fn tampered_nonce_fails_auth() {
        let key = random_key();
        let mut blob = seal(b"tamper me", &key).unwrap();
        blob.nonce[0] ^= 0x01;
        assert!(open(&blob, &key).is_err());
    }

    #[test]
    fn truncated_ciphertext_fails_auth() {
        let key = random_key();
        let mut blob = seal(b"truncate me", &key).unwrap();
        blob.ciphertext.pop();
        assert!(open(&blob, &key).is_err());
    }
}
