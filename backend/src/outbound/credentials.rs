//! bcrypt-backed [`CredentialHasher`] adapter.
//!
//! Hashing is CPU-bound, so both operations run on tokio's blocking pool.

use async_trait::async_trait;
use tokio::task;
use zeroize::Zeroizing;

use crate::domain::ports::{CredentialHasher, CredentialHasherError};
use crate::domain::{Password, PasswordHash};

/// Work factor used when none is configured.
pub const DEFAULT_BCRYPT_COST: u32 = bcrypt::DEFAULT_COST;

#[derive(Debug, Clone, Copy)]
pub struct BcryptCredentialHasher {
    cost: u32,
}

impl BcryptCredentialHasher {
    /// Create a hasher with the given work factor.
    ///
    /// Costs outside bcrypt's accepted range surface as hashing errors.
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptCredentialHasher {
    fn default() -> Self {
        Self::new(DEFAULT_BCRYPT_COST)
    }
}

fn join_failure(err: task::JoinError) -> CredentialHasherError {
    CredentialHasherError::hash(format!("hashing task failed: {err}"))
}

#[async_trait]
impl CredentialHasher for BcryptCredentialHasher {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, CredentialHasherError> {
        let plaintext = Zeroizing::new(password.expose().to_owned());
        let cost = self.cost;
        let digest = task::spawn_blocking(move || bcrypt::hash(plaintext.as_str(), cost))
            .await
            .map_err(join_failure)?
            .map_err(|err| CredentialHasherError::hash(err.to_string()))?;
        Ok(PasswordHash::new(digest))
    }

    async fn verify(
        &self,
        password: &Password,
        digest: &PasswordHash,
    ) -> Result<bool, CredentialHasherError> {
        let plaintext = Zeroizing::new(password.expose().to_owned());
        let digest = digest.as_str().to_owned();
        task::spawn_blocking(move || bcrypt::verify(plaintext.as_str(), &digest))
            .await
            .map_err(join_failure)?
            .map_err(|err| CredentialHasherError::malformed_digest(err.to_string()))
    }
}
