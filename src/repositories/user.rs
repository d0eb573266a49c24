//! Repository trait and query types for user data access

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{Error, User, UserId, user::NewUser};

/// Fields a user listing may be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    Name,
    Email,
}

/// A case-insensitive substring filter over a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    pub field: SearchField,
    pub value: String,
}

/// Sort order for user listings. Name ascending is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    NameAscending,
    NameDescending,
    EmailDescending,
}

/// A paginated, filtered, sorted user listing request.
///
/// `page_number` is 1-based. A `page_size` of zero disables pagination and
/// returns every matching row.
#[derive(Debug, Clone, Default)]
pub struct UserQuery {
    pub page_number: u64,
    pub page_size: u64,
    pub sort: SortOrder,
    pub search: Option<SearchFilter>,
}

/// Repository for user data access
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Create a new user
    async fn create(&self, user: NewUser) -> Result<User, Error>;

    /// Find a user by ID
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, Error>;

    /// Find a user by email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, Error>;

    /// Update an existing user
    async fn update(&self, user: &User) -> Result<User, Error>;

    /// Delete a user by ID
    async fn delete(&self, id: &UserId) -> Result<(), Error>;

    /// List users matching the query, returning the requested page together
    /// with the total count of matching rows.
    async fn list(&self, query: &UserQuery) -> Result<(Vec<User>, u64), Error>;
}
