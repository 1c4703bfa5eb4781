//! Port for one-way credential hashing.
//!
//! Plaintext passwords are never stored or compared directly; services hash
//! on write and verify on login through this port.

use async_trait::async_trait;

use crate::domain::{Password, PasswordHash};

use super::define_port_error;

define_port_error! {
    /// Errors raised by credential hashing adapters.
    pub enum CredentialHasherError {
        /// Hashing could not be performed.
        Hash { message: String } => "credential hashing failed: {message}",
        /// The stored digest could not be parsed.
        MalformedDigest { message: String } => "stored credential digest is malformed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, CredentialHasherError>;

    /// Whether `password` matches `digest`.
    async fn verify(
        &self,
        password: &Password,
        digest: &PasswordHash,
    ) -> Result<bool, CredentialHasherError>;
}

/// Reversible stand-in for tests; prefixes the plaintext.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCredentialHasher;

impl FixtureCredentialHasher {
    const PREFIX: &'static str = "fixture$";
}

#[async_trait]
impl CredentialHasher for FixtureCredentialHasher {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, CredentialHasherError> {
        Ok(PasswordHash::new(format!(
            "{}{}",
            Self::PREFIX,
            password.expose()
        )))
    }

    async fn verify(
        &self,
        password: &Password,
        digest: &PasswordHash,
    ) -> Result<bool, CredentialHasherError> {
        let plaintext = digest
            .as_str()
            .strip_prefix(Self::PREFIX)
            .ok_or_else(|| CredentialHasherError::malformed_digest("missing fixture prefix"))?;
        Ok(plaintext == password.expose())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_round_trips_passwords() {
        let hasher = FixtureCredentialHasher;
        let password = Password::new("s3cret").expect("password");
        let digest = hasher.hash(&password).await.expect("hash");

        assert_ne!(digest.as_str(), "s3cret");
        assert!(hasher.verify(&password, &digest).await.expect("verify"));

        let wrong = Password::new("other").expect("password");
        assert!(!hasher.verify(&wrong, &digest).await.expect("verify"));
    }

    #[tokio::test]
    async fn fixture_rejects_foreign_digests() {
        let hasher = FixtureCredentialHasher;
        let password = Password::new("s3cret").expect("password");
        let err = hasher
            .verify(&password, &PasswordHash::new("$2b$12$abc"))
            .await
            .expect_err("foreign digest");
        assert!(matches!(err, CredentialHasherError::MalformedDigest { .. }));
    }
}
