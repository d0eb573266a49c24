//! Service layer for business logic
//!
//! Concrete service implementations that encapsulate authentication and
//! user management logic on top of the repository traits.

pub mod auth;
pub mod password;
pub mod user;

pub use auth::{AuthService, CredentialVerifier, LoginOutcome};
pub use password::PasswordService;
pub use user::{UserPage, UserService};
