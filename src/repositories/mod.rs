//! Repository traits for the data access layer
//!
//! These traits are the seams to the document store. Services depend on them
//! rather than on a concrete backend, so storage implementations stay
//! swappable and tests can run against in-memory mocks.

pub mod password;
pub mod user;

pub use password::PasswordRepository;
pub use user::{SearchField, SearchFilter, SortOrder, UserQuery, UserRepository};
