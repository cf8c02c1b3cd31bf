/// Authenticated identity threaded through every protected operation
///
/// The API layer resolves a bearer token into an [`AuthContext`] once per
/// request and handlers pass `auth.user_id` explicitly to each service call.
/// Services trust this id unconditionally.

use serde::{Deserialize, Serialize};

use super::jwt::{validate_token, Claims, JwtError};

/// Authentication context resolved from a bearer token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID
    pub user_id: i64,

    /// Email carried in the token
    pub email: String,
}

impl AuthContext {
    /// Creates auth context from validated JWT claims
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email.clone(),
        }
    }
}

/// Error type for bearer authentication
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Missing authorization header
    #[error("Authorization header required")]
    MissingCredentials,

    /// Header present but not `Bearer <token>`
    #[error("Invalid authorization header")]
    InvalidFormat,

    /// Token failed validation
    #[error("Invalid token: {0}")]
    InvalidToken(#[from] JwtError),
}

/// Resolves an `Authorization` header value into an [`AuthContext`]
///
/// # Example
///
/// ```
/// use chrono::Duration;
/// use kanban_shared::auth::context::{authenticate_bearer, AuthError};
/// use kanban_shared::auth::jwt::{create_token, Claims};
///
/// let secret = "a-secret-that-is-at-least-32-bytes";
/// let claims = Claims::new(5, "eve@example.com", Duration::hours(1));
/// let token = create_token(&claims, secret).unwrap();
///
/// let auth = authenticate_bearer(Some(&format!("Bearer {}", token)), secret).unwrap();
/// assert_eq!(auth.user_id, 5);
///
/// assert!(matches!(authenticate_bearer(None, secret), Err(AuthError::MissingCredentials)));
/// ```
pub fn authenticate_bearer(header: Option<&str>, secret: &str) -> Result<AuthContext, AuthError> {
    let header = header.ok_or(AuthError::MissingCredentials)?;

    let token = header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::InvalidFormat)?;

    let claims = validate_token(token, secret)?;

    Ok(AuthContext::from_claims(&claims))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::create_token;
    use chrono::Duration;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_auth_context_from_claims() {
        let claims = Claims::new(3, "bob@example.com", Duration::hours(1));
        let context = AuthContext::from_claims(&claims);

        assert_eq!(context.user_id, 3);
        assert_eq!(context.email, "bob@example.com");
    }

    #[test]
    fn test_authenticate_bearer_valid() {
        let token =
            create_token(&Claims::new(8, "c@example.com", Duration::hours(1)), SECRET).unwrap();
        let header = format!("Bearer {}", token);

        let context = authenticate_bearer(Some(&header), SECRET).unwrap();
        assert_eq!(context.user_id, 8);
    }

    #[test]
    fn test_authenticate_bearer_bad_format() {
        assert!(matches!(
            authenticate_bearer(Some("Token abc"), SECRET),
            Err(AuthError::InvalidFormat)
        ));
        assert!(matches!(
            authenticate_bearer(Some("Bearer "), SECRET),
            Err(AuthError::InvalidFormat)
        ));
    }

    #[test]
    fn test_authenticate_bearer_invalid_token() {
        assert!(matches!(
            authenticate_bearer(Some("Bearer nope"), SECRET),
            Err(AuthError::InvalidToken(_))
        ));
    }
}
