//! User management service

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::{
    Error, User, UserId,
    error::AuthError,
    repositories::{SearchField, SearchFilter, SortOrder, UserQuery, UserRepository},
    user::NewUser,
    validation::{validate_email, validate_name},
};

/// One page of a user listing, with the pagination envelope the API layer
/// serializes as-is.
#[derive(Debug, Clone, Serialize)]
pub struct UserPage {
    pub page_number: u64,
    pub page_size: u64,
    pub page_total: u64,
    pub has_previous_page: bool,
    pub has_next_page: bool,
    pub data: Vec<User>,
}

/// Service for user management operations
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    /// Create a new UserService with the given repository
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Create a new user
    ///
    /// Emails are stored lowercased; a duplicate email is rejected rather
    /// than silently returning the existing user.
    pub async fn create_user(&self, email: &str, name: Option<String>) -> Result<User, Error> {
        validate_email(email)?;
        validate_name(name.as_deref())?;

        let email = email.to_lowercase();
        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(AuthError::UserAlreadyExists.into());
        }

        let new_user = match name {
            Some(name) => NewUser::with_name(email, name),
            None => NewUser::new(email),
        };

        let user = self.repository.create(new_user).await?;
        tracing::info!(user_id = %user.id, "created user");
        Ok(user)
    }

    /// Get a user by ID
    pub async fn get_user(&self, user_id: &UserId) -> Result<Option<User>, Error> {
        self.repository.find_by_id(user_id).await
    }

    /// Get a user by email
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        self.repository.find_by_email(&email.to_lowercase()).await
    }

    /// Update a user's name and/or email
    ///
    /// Changing the email to one already held by another user is rejected.
    pub async fn update_user(
        &self,
        user_id: &UserId,
        name: Option<String>,
        email: Option<String>,
    ) -> Result<User, Error> {
        let mut user = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if let Some(name) = name {
            validate_name(Some(&name))?;
            user.name = Some(name);
        }

        if let Some(email) = email {
            validate_email(&email)?;
            let email = email.to_lowercase();
            if email != user.email {
                if let Some(existing) = self.repository.find_by_email(&email).await?
                    && existing.id != user.id
                {
                    return Err(AuthError::UserAlreadyExists.into());
                }
                user.email = email;
            }
        }

        user.updated_at = Utc::now();
        self.repository.update(&user).await
    }

    /// Delete a user by ID
    pub async fn delete_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.repository.delete(user_id).await?;
        tracing::info!(user_id = %user_id, "deleted user");
        Ok(())
    }

    /// Record a successful login on the user row
    pub async fn mark_logged_in(&self, user_id: &UserId) -> Result<(), Error> {
        let mut user = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        user.last_login_at = Some(Utc::now());
        self.repository.update(&user).await?;
        Ok(())
    }

    /// List users with pagination, sorting, and search
    ///
    /// `sort` and `search` are the raw query-string values:
    /// - `search` is `"field:value"`, where field is `name` or `email`;
    ///   matching is case-insensitive substring. Anything unparsable means
    ///   no filter.
    /// - `sort` is `"desc"` (name descending) or `"name:desc"`/`"email:desc"`;
    ///   anything else sorts by name ascending.
    /// - `page_size` of zero returns all matching users as a single page.
    pub async fn list_users(
        &self,
        page_number: u64,
        page_size: u64,
        sort: &str,
        search: &str,
    ) -> Result<UserPage, Error> {
        let page_number = page_number.max(1);
        let query = UserQuery {
            page_number,
            page_size,
            sort: parse_sort(sort),
            search: parse_search(search),
        };

        let (data, total) = self.repository.list(&query).await?;

        let page_total = if page_size == 0 {
            u64::from(total > 0)
        } else {
            total.div_ceil(page_size)
        };

        Ok(UserPage {
            page_number,
            page_size,
            page_total,
            has_previous_page: page_number > 1,
            has_next_page: page_number < page_total,
            data,
        })
    }
}

fn parse_sort(sort: &str) -> SortOrder {
    match sort.trim() {
        "desc" | "name:desc" => SortOrder::NameDescending,
        "email:desc" => SortOrder::EmailDescending,
        _ => SortOrder::NameAscending,
    }
}

fn parse_search(search: &str) -> Option<SearchFilter> {
    let (field, value) = search.split_once(':')?;
    if value.is_empty() {
        return None;
    }

    let field = match field.trim() {
        "name" => SearchField::Name,
        "email" => SearchField::Email,
        _ => return None,
    };

    Some(SearchFilter {
        field,
        value: value.to_string(),
    })
}
