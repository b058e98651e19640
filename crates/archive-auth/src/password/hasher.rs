//! Hashing of archive account passwords.
//!
//! Every account password, whether from REST or form registration or the
//! bootstrap administrator, is stored in `users.password_hash` as an
//! Argon2id PHC string (`$argon2id$v=19$m=19456,t=2,p=1$<salt>$<hash>`)
//! with a fresh random salt. Length rules live in
//! [`PasswordValidator`](crate::PasswordValidator), which callers run
//! before hashing; this type never sees a password that failed the
//! `auth.password_min_length` check.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use archive_core::error::AppError;

/// Argon2id with the crate's default cost parameters.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce the PHC string stored for an account.
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::internal(format!("Could not hash account password: {e}")))
    }

    /// Check a login attempt against a stored PHC string.
    ///
    /// A wrong password is `Ok(false)`; only an unreadable stored hash is
    /// an error, since that points at corrupted account data.
    pub fn verify_password(&self, password: &str, stored: &str) -> Result<bool, AppError> {
        let parsed = PasswordHash::new(stored)
            .map_err(|e| AppError::internal(format!("Stored password hash is unreadable: {e}")))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!(
                "Could not verify account password: {e}"
            ))),
        }
    }
}
