//! Repository trait for password credential storage

use async_trait::async_trait;

use crate::{Error, UserId};

/// Repository for password hashes
///
/// Hashes are stored separately from the user record so the user type never
/// carries credential material.
#[async_trait]
pub trait PasswordRepository: Send + Sync + 'static {
    /// Set the password hash for a user
    async fn set_password_hash(&self, user_id: &UserId, hash: &str) -> Result<(), Error>;

    /// Get the password hash for a user
    async fn get_password_hash(&self, user_id: &UserId) -> Result<Option<String>, Error>;

    /// Remove the password hash for a user
    async fn remove_password_hash(&self, user_id: &UserId) -> Result<(), Error>;
}
