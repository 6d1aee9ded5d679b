//! `dioca-auth` — the login gate.
//!
//! A single credential pair guards the inventory screen. This is a
//! placeholder policy: no hashing, no lockout, no tokens.

pub mod credentials;

pub use credentials::{CredentialPolicy, Credentials, DEFAULT_PASSWORD, DEFAULT_USERNAME};
