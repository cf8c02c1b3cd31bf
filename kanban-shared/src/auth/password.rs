/// Password hashing module using Argon2id
///
/// Passwords are never stored in plaintext. Each hash embeds its own random salt
/// and parameters in PHC string format, so verification needs only the stored
/// hash.
///
/// # Parameters
///
/// - **Algorithm**: Argon2id, version 0x13
/// - **Memory**: 19 MiB (19456 KiB)
/// - **Iterations**: 2 passes
/// - **Parallelism**: 1 lane
///
/// # Example
///
/// ```
/// use kanban_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("hunter22")?;
/// assert!(verify_password("hunter22", &hash)?);
/// assert!(!verify_password("hunter23", &hash)?);
/// # Ok(())
/// # }
/// ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, ParamsBuilder, Version,
};

/// Minimum accepted password length, in characters
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),

    /// Failed to verify password
    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    /// Invalid password hash format
    #[error("Invalid password hash format: {0}")]
    InvalidHash(String),
}

fn hasher() -> Result<Argon2<'static>, PasswordError> {
    let params = ParamsBuilder::new()
        .m_cost(19456)
        .t_cost(2)
        .p_cost(1)
        .output_len(32)
        .build()
        .map_err(|e| PasswordError::HashError(format!("Invalid parameters: {}", e)))?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hashes a password with a fresh random salt
///
/// Returns the PHC string, e.g. `$argon2id$v=19$m=19456,t=2,p=1$<salt>$<hash>`.
///
/// # Errors
///
/// Returns `PasswordError::HashError` if hashing fails
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(format!("Hash generation failed: {}", e)))?;

    Ok(password_hash.to_string())
}

/// Verifies a password against a stored hash
///
/// Comparison is constant-time. Returns `Ok(false)` for a wrong password and an
/// error when the stored hash cannot be parsed. A hash that parses but carries
/// malformed parameters may also come back as `Ok(false)`.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| PasswordError::InvalidHash(format!("Failed to parse hash: {}", e)))?;

    // Parameters are read back from the hash itself
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(_) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(format!("Verification failed: {}", e))),
    }
}

/// Validates registration credentials
///
/// Both fields must be non-empty and the password must be at least
/// [`MIN_PASSWORD_LENGTH`] characters long.
///
/// ```
/// use kanban_shared::auth::password::validate_credentials;
///
/// assert!(validate_credentials("a@example.com", "secret").is_ok());
/// assert!(validate_credentials("a@example.com", "short").is_err());
/// assert!(validate_credentials("", "secret").is_err());
/// ```
pub fn validate_credentials(email: &str, password: &str) -> Result<(), String> {
    if email.trim().is_empty() || password.is_empty() {
        return Err("Email and password are required".to_string());
    }

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password() {
        let hash = hash_password("test_password_123").expect("Hash should succeed");

        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("v=19"));
        assert!(hash.contains("m=19456"));
        assert!(hash.contains("t=2"));
        assert!(hash.contains("p=1"));
    }

    #[test]
    fn test_hash_password_produces_different_salts() {
        let hash1 = hash_password("same_password").expect("Hash 1 should succeed");
        let hash2 = hash_password("same_password").expect("Hash 2 should succeed");

        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_verify_password_correct() {
        let hash = hash_password("correct_password").expect("Hash should succeed");
        assert!(verify_password("correct_password", &hash).expect("Verify should succeed"));
    }

    #[test]
    fn test_verify_password_incorrect() {
        let hash = hash_password("correct_password").expect("Hash should succeed");
        assert!(!verify_password("wrong_password", &hash).expect("Verify should succeed"));
        assert!(!verify_password("", &hash).expect("Verify should succeed"));
    }

    #[test]
    fn test_verify_password_invalid_hash() {
        assert!(verify_password("password", "invalid_hash").is_err());
        assert!(verify_password("password", "$argon2id$v=19$m=19456,t=2,p=1$!!!$!!!").is_err());
        assert!(!matches!(verify_password("password", "$argon2id$invalid"), Ok(true)));
    }

    #[test]
    fn test_unicode_password_roundtrip() {
        let hash = hash_password("пароль-密码").expect("Hash should succeed");
        assert!(verify_password("пароль-密码", &hash).expect("Verify should succeed"));
    }

    #[test]
    fn test_validate_credentials_ok() {
        assert!(validate_credentials("user@example.com", "123456").is_ok());
    }

    #[test]
    fn test_validate_credentials_missing_fields() {
        let err = validate_credentials("", "secret1").unwrap_err();
        assert_eq!(err, "Email and password are required");

        let err = validate_credentials("   ", "secret1").unwrap_err();
        assert_eq!(err, "Email and password are required");

        let err = validate_credentials("user@example.com", "").unwrap_err();
        assert_eq!(err, "Email and password are required");
    }

    #[test]
    fn test_validate_credentials_too_short() {
        let err = validate_credentials("user@example.com", "12345").unwrap_err();
        assert!(err.contains("at least 6 characters"));
    }

    #[test]
    fn test_min_length_counts_characters_not_bytes() {
        // Five two-byte characters
        assert!(validate_credentials("user@example.com", "ééééé").is_err());
        assert!(validate_credentials("user@example.com", "éééééé").is_ok());
    }
}
