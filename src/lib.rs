//! Login throttling and user management core
//!
//! This crate is the storage-agnostic core of a user-management backend:
//! login with per-account failed-attempt throttling, plus user CRUD and
//! paginated listing over a pluggable document store.
//!
//! The centerpiece is [`LoginThrottle`], an in-memory guard that tracks
//! consecutive failed login attempts per account and enforces a 30-minute
//! lockout after 5 failures, with lazy expiry on the next check. See
//! [`throttle`] for the full protocol.
//!
//! [`AuthService`] composes the guard with a [`CredentialVerifier`];
//! [`PasswordService`] is the stock verifier backed by argon2 hashes behind
//! a [`repositories::PasswordRepository`]. HTTP routing and concrete storage
//! backends live outside this crate, behind the traits in [`repositories`].
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use warden::{AuthService, PasswordService};
//!
//! let passwords = PasswordService::new(user_repo, password_repo);
//! let auth = AuthService::new(Arc::new(passwords));
//!
//! match auth.login("user@example.com", "hunter2hunter2").await {
//!     Ok(outcome) => println!("welcome back ({} recent failures)", outcome.recently_failed_attempts),
//!     Err(e) if e.is_rate_limited() => println!("locked out: {e}"),
//!     Err(e) => println!("rejected: {e}"),
//! }
//! ```

pub mod error;
pub mod id;
pub mod repositories;
pub mod services;
pub mod throttle;
pub mod user;
pub mod validation;

pub use error::Error;
pub use services::{AuthService, CredentialVerifier, LoginOutcome, PasswordService, UserService};
pub use throttle::{LOCKOUT_MINUTES, LoginThrottle, MAX_FAILURES, ThrottleDecision};
pub use user::{NewUser, User, UserId};
