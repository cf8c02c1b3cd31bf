/// Authentication and authorization utilities
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and credential validation
/// - [`jwt`]: JWT token generation and validation
/// - [`context`]: bearer token resolution into a typed [`context::AuthContext`]
/// - [`authorization`]: board access and ownership checks
///
/// # Example
///
/// ```no_run
/// use chrono::Duration;
/// use kanban_shared::auth::password::{hash_password, verify_password};
/// use kanban_shared::auth::jwt::{create_token, validate_token, Claims};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// // Password authentication
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// // JWT token generation
/// let claims = Claims::new(1, "user@example.com", Duration::days(7));
/// let token = create_token(&claims, "secret-key-of-at-least-32-bytes!!")?;
/// # Ok(())
/// # }
/// ```

pub mod authorization;
pub mod context;
pub mod jwt;
pub mod password;
