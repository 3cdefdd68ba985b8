//! Argon2id password hashing and strength checks.
//!
//! Hashes are stored as PHC strings so the salt and parameters travel with them.

use std::sync::LazyLock;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Minimum accepted password length at registration.
pub const MIN_PASSWORD_LENGTH: usize = 8;

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// `Ok(false)` on mismatch; `Err` only when `hash` is not a valid PHC string.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Verified in place of a real hash when a login names no usable account,
/// so every attempt costs one full Argon2 verification.
static DUMMY_HASH: LazyLock<Result<String, argon2::password_hash::Error>> =
    LazyLock::new(|| hash_password("rollcall-unused-account"));

/// Check a login attempt against the candidate's stored hash.
///
/// With no candidate the password is still verified, against [`DUMMY_HASH`],
/// and the answer is always `false`.
pub fn verify_credentials(
    password: &str,
    stored_hash: Option<&str>,
) -> Result<bool, argon2::password_hash::Error> {
    match stored_hash {
        Some(hash) => verify_password(password, hash),
        None => {
            let dummy = DUMMY_HASH.as_deref().map_err(|e| *e)?;
            verify_password(password, dummy)?;
            Ok(false)
        }
    }
}

pub fn validate_password_strength(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_only_the_original_password() {
        let hash = hash_password("correct-horse").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct-horse", &hash).unwrap());
        assert!(!verify_password("wrong-horse", &hash).unwrap());
    }

    #[test]
    fn missing_account_is_verified_but_never_accepted() {
        assert!(!verify_credentials("rollcall-unused-account", None).unwrap());
        assert!(!verify_credentials("anything", None).unwrap());

        let hash = hash_password("correct-horse").unwrap();
        assert!(verify_credentials("correct-horse", Some(&hash)).unwrap());
    }

    #[test]
    fn stand_in_hash_costs_the_same_as_a_real_one() {
        // Algorithm, version and m/t/p parameters: everything before the salt.
        fn cost(hash: &str) -> Vec<&str> {
            hash.split('$').take(4).collect()
        }

        let dummy = DUMMY_HASH.as_deref().unwrap();
        let real = hash_password("correct-horse").unwrap();
        assert_eq!(cost(dummy), cost(&real));
        assert!(PasswordHash::new(dummy).is_ok());
    }

    #[test]
    fn garbage_hash_is_an_error() {
        assert!(verify_password("anything", "not-a-phc-string").is_err());
    }

    #[test]
    fn strength_boundary() {
        assert!(validate_password_strength("1234567").is_err());
        assert!(validate_password_strength("12345678").is_ok());
    }
}
