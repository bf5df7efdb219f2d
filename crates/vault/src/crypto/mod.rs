//! AES-256-GCM-SIV sealing primitives.
//!
//! This module is free of file-system and configuration dependencies; it
//! provides the low-level seal/open operations used by the store layer.
//!
//! # Vault file format
//!
//! ```text
//! v1.<base64url-no-pad(nonce)>.<base64url-no-pad(ciphertext+tag)>
//! ```
//!
//! The `v1` prefix enables future algorithm or key-version migration without
//! breaking blobs already on disk.

pub mod cipher;

pub use cipher::{CipherError, SealedBlob, KEY_LEN};
