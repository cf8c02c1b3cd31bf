/// User directory: registration, login and user lookup
///
/// Password hashing is CPU bound and runs on tokio's blocking pool.

use sqlx::PgPool;
use tracing::{debug, info};

use crate::auth::password::{hash_password, validate_credentials, verify_password};
use crate::error::{is_unique_violation, KanbanError, KanbanResult};
use crate::models::user::{CreateUser, User};

/// Minimum trimmed query length for [`UserDirectory::search`]
pub const MIN_SEARCH_LENGTH: usize = 2;

/// Maximum number of search results
pub const SEARCH_LIMIT: i64 = 10;

/// Message returned for every failed login
const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Debug, Clone)]
pub struct UserDirectory {
    pool: PgPool,
}

impl UserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Registers a new account
    ///
    /// # Errors
    ///
    /// - `Validation` if email or password is empty, or the password is too short
    /// - `Conflict` if the email is taken in any letter case
    pub async fn register(&self, email: &str, password: &str) -> KanbanResult<User> {
        validate_credentials(email, password).map_err(KanbanError::Validation)?;

        let email = email.trim().to_string();
        let password = password.to_string();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| KanbanError::Internal(format!("Hashing task failed: {}", e)))??;

        let user = User::create(
            &self.pool,
            CreateUser {
                email,
                password_hash,
            },
        )
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                KanbanError::conflict("Email already registered")
            } else {
                KanbanError::from(e)
            }
        })?;

        info!(user_id = user.id, "User registered");

        Ok(user)
    }

    /// Checks credentials and returns the matching user
    ///
    /// Unknown emails and wrong passwords fail with the same `Auth` error.
    pub async fn authenticate(&self, email: &str, password: &str) -> KanbanResult<User> {
        let user = match User::find_by_email(&self.pool, email.trim()).await? {
            Some(user) => user,
            None => {
                debug!("Login attempt for unknown email");
                return Err(KanbanError::auth(INVALID_CREDENTIALS));
            }
        };

        let password = password.to_string();
        let hash = user.password_hash.clone();
        let valid = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|e| KanbanError::Internal(format!("Verification task failed: {}", e)))??;

        if !valid {
            debug!(user_id = user.id, "Login attempt with wrong password");
            return Err(KanbanError::auth(INVALID_CREDENTIALS));
        }

        info!(user_id = user.id, "User authenticated");

        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> KanbanResult<User> {
        User::find_by_email(&self.pool, email.trim())
            .await?
            .ok_or_else(|| KanbanError::not_found("User not found"))
    }

    pub async fn find_by_id(&self, id: i64) -> KanbanResult<User> {
        User::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| KanbanError::not_found("User not found"))
    }

    /// Finds other users by email substring
    ///
    /// Queries shorter than [`MIN_SEARCH_LENGTH`] characters after trimming
    /// return nothing. Matching ignores case and never includes the caller.
    pub async fn search(&self, query: &str, excluding_user_id: i64) -> KanbanResult<Vec<User>> {
        let query = query.trim();
        if query.chars().count() < MIN_SEARCH_LENGTH {
            return Ok(Vec::new());
        }

        let users =
            User::search_by_email(&self.pool, query, excluding_user_id, SEARCH_LIMIT).await?;

        Ok(users)
    }
}
