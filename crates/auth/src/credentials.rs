use dioca_core::{DomainError, DomainResult};

/// Username used when no override is configured.
pub const DEFAULT_USERNAME: &str = "admin";

/// Password used when no override is configured.
pub const DEFAULT_PASSWORD: &str = "password";

/// A username/password pair as typed on the login screen.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl core::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Accepts exactly one credential pair.
///
/// Comparison is exact: no trimming, no case folding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialPolicy {
    accepted: Credentials,
}

impl CredentialPolicy {
    pub fn fixed(accepted: Credentials) -> Self {
        Self { accepted }
    }

    pub fn verify(&self, username: &str, password: &str) -> DomainResult<()> {
        if username == self.accepted.username && password == self.accepted.password {
            Ok(())
        } else {
            Err(DomainError::InvalidCredentials)
        }
    }
}

impl Default for CredentialPolicy {
    fn default() -> Self {
        Self::fixed(Credentials::new(DEFAULT_USERNAME, DEFAULT_PASSWORD))
    }
}
