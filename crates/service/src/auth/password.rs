use argon2::{
    password_hash::{PasswordHasher, PasswordVerifier, SaltString},
    Argon2, PasswordHash,
};
use rand::rngs::OsRng;

use super::errors::AuthError;

pub const MIN_PASSWORD_LEN: usize = 3;

pub fn validate(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }
    Ok(())
}

/// Argon2id PHC string with a fresh random salt.
pub fn hash(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AuthError::HashError(e.to_string()))
}

pub fn verify(password: &str, stored: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(stored).map_err(|e| AuthError::HashError(e.to_string()))?;
    Ok(Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let h = hash("s3cret").unwrap();
        assert!(h.starts_with("$argon2"));
        assert!(verify("s3cret", &h).unwrap());
        assert!(!verify("wrong", &h).unwrap());
        assert_ne!(hash("s3cret").unwrap(), h);
    }

    #[test]
    fn short_passwords_rejected() {
        assert!(validate("ab").is_err());
        assert!(validate("abc").is_ok());
    }

    #[test]
    fn garbage_hash_is_an_error() {
        assert!(matches!(verify("x", "not-a-phc-string"), Err(AuthError::HashError(_))));
    }
}
