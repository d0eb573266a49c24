//! Login flow composition
//!
//! [`AuthService`] wires the [`LoginThrottle`] guard around a
//! [`CredentialVerifier`]: check the throttle, verify the credentials, then
//! report the outcome back to the guard. Every state mutation commits before
//! the corresponding error propagates.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::{
    Error,
    error::AuthError,
    throttle::{LoginThrottle, ThrottleDecision},
};

/// The seam to credential checking.
///
/// Implementations compare `secret` against the stored credential for
/// `identifier` and must return `Ok(false)` for unknown identifiers rather
/// than an error, so callers cannot distinguish a missing account from a
/// wrong password.
#[async_trait]
pub trait CredentialVerifier: Send + Sync + 'static {
    async fn verify(&self, identifier: &str, secret: &str) -> Result<bool, Error>;
}

/// Result of a successful login.
#[derive(Debug, Clone, Serialize)]
pub struct LoginOutcome {
    /// The normalized identifier that logged in.
    pub identifier: String,

    /// Consecutive failures recorded for this identifier before the reset
    /// triggered by this login. Informational only.
    pub recently_failed_attempts: u32,
}

/// Service composing the throttle guard and credential verification.
pub struct AuthService<V: CredentialVerifier> {
    throttle: Arc<LoginThrottle>,
    verifier: Arc<V>,
}

impl<V: CredentialVerifier> AuthService<V> {
    /// Create an AuthService with a fresh throttle.
    pub fn new(verifier: Arc<V>) -> Self {
        Self::with_throttle(verifier, Arc::new(LoginThrottle::new()))
    }

    /// Create an AuthService sharing an existing throttle instance.
    pub fn with_throttle(verifier: Arc<V>, throttle: Arc<LoginThrottle>) -> Self {
        Self { throttle, verifier }
    }

    /// The underlying throttle guard.
    pub fn throttle(&self) -> &LoginThrottle {
        &self.throttle
    }

    /// Attempt to log in.
    ///
    /// # Errors
    ///
    /// - [`AuthError::TooManyAttempts`] if the identifier is inside its
    ///   lockout window; verification is not attempted.
    /// - [`AuthError::InvalidCredentials`] if verification fails; the
    ///   failure is recorded against the identifier first.
    pub async fn login(&self, identifier: &str, secret: &str) -> Result<LoginOutcome, Error> {
        let prior_failures = match self.throttle.check(identifier) {
            ThrottleDecision::Blocked { minutes_remaining } => {
                return Err(AuthError::TooManyAttempts { minutes_remaining }.into());
            }
            ThrottleDecision::Allowed { prior_failures } => prior_failures,
        };

        if !self.verifier.verify(identifier, secret).await? {
            self.throttle.record_failure(identifier);
            return Err(AuthError::InvalidCredentials.into());
        }

        self.throttle.record_success(identifier);

        let identifier = identifier.to_lowercase();
        tracing::info!(identifier = %identifier, prior_failures, "login succeeded");

        Ok(LoginOutcome {
            identifier,
            recently_failed_attempts: prior_failures,
        })
    }
}
