use anyhow::{anyhow, Result};
use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use lazy_static::lazy_static;

lazy_static! {
    /// Stand-in hash checked when no account matches, so a miss costs one argon2 run
    static ref MISSING_ACCOUNT_HASH: String =
        hash_password("mindbridge-missing-account").unwrap_or_default();
}

/// Hash a password into an argon2 PHC string
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| anyhow!("Failed to hash password: {}", e))
}

/// Check a password against a stored PHC string; malformed hashes never verify
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Spend the same argon2 work as a real check; always fails
pub fn verify_missing_account(password: &str) -> bool {
    verify_password(password, &MISSING_ACCOUNT_HASH);
    false
}
