//! Password credential service

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    Error, User, UserId,
    error::AuthError,
    repositories::{PasswordRepository, UserRepository},
    services::{CredentialVerifier, UserService},
    validation::validate_password,
};

/// Service for password authentication operations
///
/// Also the crate's stock [`CredentialVerifier`]: `verify` looks the user up
/// by lowercased email and compares the secret against the stored hash.
pub struct PasswordService<U: UserRepository, P: PasswordRepository> {
    user_service: Arc<UserService<U>>,
    password_repository: Arc<P>,
}

impl<U: UserRepository, P: PasswordRepository> PasswordService<U, P> {
    /// Create a new PasswordService with the given repositories
    pub fn new(user_repository: Arc<U>, password_repository: Arc<P>) -> Self {
        let user_service = Arc::new(UserService::new(user_repository));
        Self {
            user_service,
            password_repository,
        }
    }

    /// Register a new user with a password
    pub async fn register_user(
        &self,
        email: &str,
        password: &str,
        name: Option<String>,
    ) -> Result<User, Error> {
        // Validate password strength before any other operations
        validate_password(password)?;

        let password_hash = Self::hash_password(password)?;

        // Email validation and duplicate checks happen in UserService
        let user = self.user_service.create_user(email, name).await?;

        self.password_repository
            .set_password_hash(&user.id, &password_hash)
            .await?;

        Ok(user)
    }

    /// Change a user's password, verifying the old one first
    pub async fn change_password(
        &self,
        user_id: &UserId,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), Error> {
        validate_password(new_password)?;

        let current_hash = self
            .password_repository
            .get_password_hash(user_id)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !Self::verify_password(old_password, &current_hash)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        let new_hash = Self::hash_password(new_password)?;
        self.password_repository
            .set_password_hash(user_id, &new_hash)
            .await?;

        tracing::info!(user_id = %user_id, "password changed");
        Ok(())
    }

    /// Set a user's password (admin operation, no old password required)
    pub async fn set_password(&self, user_id: &UserId, password: &str) -> Result<(), Error> {
        validate_password(password)?;

        let password_hash = Self::hash_password(password)?;
        self.password_repository
            .set_password_hash(user_id, &password_hash)
            .await
    }

    /// Remove a user's password
    pub async fn remove_password(&self, user_id: &UserId) -> Result<(), Error> {
        self.password_repository.remove_password_hash(user_id).await
    }

    /// Hash a password using argon2
    fn hash_password(password: &str) -> Result<String, Error> {
        use password_auth::generate_hash;
        Ok(generate_hash(password))
    }

    /// Verify a password against a hash
    fn verify_password(password: &str, hash: &str) -> Result<bool, Error> {
        use password_auth::verify_password;
        Ok(verify_password(password, hash).is_ok())
    }
}

#[async_trait]
impl<U: UserRepository, P: PasswordRepository> CredentialVerifier for PasswordService<U, P> {
    /// Unknown emails and users without a stored hash verify false, so
    /// callers cannot tell a missing account from a wrong password.
    async fn verify(&self, identifier: &str, secret: &str) -> Result<bool, Error> {
        let Some(user) = self.user_service.get_user_by_email(identifier).await? else {
            return Ok(false);
        };

        let Some(hash) = self.password_repository.get_password_hash(&user.id).await? else {
            return Ok(false);
        };

        Self::verify_password(secret, &hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::repositories::UserQuery;
    use crate::user::NewUser;
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct MockUserRepository {
        users: Mutex<HashMap<UserId, User>>,
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn create(&self, new_user: NewUser) -> Result<User, Error> {
            let user = User::builder()
                .id(new_user.id)
                .email(new_user.email)
                .name(new_user.name)
                .build()?;
            self.users
                .lock()
                .await
                .insert(user.id.clone(), user.clone());
            Ok(user)
        }

        async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, Error> {
            Ok(self.users.lock().await.get(id).cloned())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<User>, Error> {
            Ok(self
                .users
                .lock()
                .await
                .values()
                .find(|u| u.email == email)
                .cloned())
        }

        async fn update(&self, user: &User) -> Result<User, Error> {
            self.users
                .lock()
                .await
                .insert(user.id.clone(), user.clone());
            Ok(user.clone())
        }

        async fn delete(&self, id: &UserId) -> Result<(), Error> {
            self.users.lock().await.remove(id);
            Ok(())
        }

        async fn list(&self, _query: &UserQuery) -> Result<(Vec<User>, u64), Error> {
            let users: Vec<User> = self.users.lock().await.values().cloned().collect();
            let total = users.len() as u64;
            Ok((users, total))
        }
    }

    #[derive(Default)]
    struct MockPasswordRepository {
        passwords: Mutex<HashMap<UserId, String>>,
    }

    #[async_trait]
    impl PasswordRepository for MockPasswordRepository {
        async fn set_password_hash(&self, user_id: &UserId, hash: &str) -> Result<(), Error> {
            self.passwords
                .lock()
                .await
                .insert(user_id.clone(), hash.to_string());
            Ok(())
        }

        async fn get_password_hash(&self, user_id: &UserId) -> Result<Option<String>, Error> {
            Ok(self.passwords.lock().await.get(user_id).cloned())
        }

        async fn remove_password_hash(&self, user_id: &UserId) -> Result<(), Error> {
            self.passwords.lock().await.remove(user_id);
            Ok(())
        }
    }

    fn service() -> PasswordService<MockUserRepository, MockPasswordRepository> {
        PasswordService::new(
            Arc::new(MockUserRepository::default()),
            Arc::new(MockPasswordRepository::default()),
        )
    }

    #[tokio::test]
    async fn test_register_user_rejects_weak_password() {
        let result = service().register_user("test@example.com", "weak", None).await;

        assert!(matches!(
            result.unwrap_err(),
            Error::Validation(ValidationError::InvalidPassword(_))
        ));
    }

    #[tokio::test]
    async fn test_register_user_rejects_empty_password() {
        let result = service().register_user("test@example.com", "", None).await;

        assert!(matches!(
            result.unwrap_err(),
            Error::Validation(ValidationError::MissingField(_))
        ));
    }

    #[tokio::test]
    async fn test_register_then_verify() {
        let service = service();
        let user = service
            .register_user("test@example.com", "validpass123", None)
            .await
            .unwrap();
        assert_eq!(user.email, "test@example.com");

        assert!(service.verify("test@example.com", "validpass123").await.unwrap());
        assert!(!service.verify("test@example.com", "wrong-pass").await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_lowercases_identifier() {
        let service = service();
        service
            .register_user("Test@Example.com", "validpass123", None)
            .await
            .unwrap();

        assert!(service.verify("TEST@EXAMPLE.COM", "validpass123").await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_unknown_user_is_false_not_error() {
        assert!(!service().verify("ghost@example.com", "whatever").await.unwrap());
    }

    #[tokio::test]
    async fn test_change_password() {
        let service = service();
        let user = service
            .register_user("test@example.com", "original_pass123", None)
            .await
            .unwrap();

        // Wrong old password is rejected and nothing changes.
        let result = service
            .change_password(&user.id, "not-the-old-one", "new_password456")
            .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Auth(AuthError::InvalidCredentials)
        ));
        assert!(service.verify("test@example.com", "original_pass123").await.unwrap());

        service
            .change_password(&user.id, "original_pass123", "new_password456")
            .await
            .unwrap();

        assert!(service.verify("test@example.com", "new_password456").await.unwrap());
        assert!(!service.verify("test@example.com", "original_pass123").await.unwrap());
    }

    #[tokio::test]
    async fn test_remove_password_disables_login() {
        let service = service();
        let user = service
            .register_user("test@example.com", "validpass123", None)
            .await
            .unwrap();

        service.remove_password(&user.id).await.unwrap();
        assert!(!service.verify("test@example.com", "validpass123").await.unwrap());
    }
}
