//! Common types and errors shared across `roster-vault` crates.

pub mod credentials;
pub mod error;

pub use credentials::ServiceAccountKey;
pub use error::VaultError;
