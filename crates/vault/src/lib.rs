//! `vault` — secret-at-rest codec for the roster bot's credentials file.
//!
//! Two operations, each invoked at most once per process lifetime:
//! - **seal** (offline provisioning): read `secret.json`, encrypt it under a
//!   fresh random key, write `secret.vault`, hand the key to the operator.
//! - **open** (startup): read `secret.vault`, decrypt it with the key from
//!   the `VAULT_KEY` environment variable, parse the credentials document.
//!
//! Everything is synchronous and single-threaded; there is no shared state
//! and no retry path. See [`bootstrap::load_credentials`] for the startup
//! entry point and the `provision` binary for the offline step.

pub mod bootstrap;
pub mod config;
pub mod crypto;
pub mod key;
pub mod store;

pub use bootstrap::load_credentials;
pub use config::Config;
pub use key::VaultKey;
pub use store::SecretStore;
