use anyhow::{Result, anyhow};
use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{self, SaltString, rand_core::OsRng},
};

/// Hash a password with Argon2id. Returns a PHC string.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("Password hashing failed: {}", e))?;

    Ok(hash.to_string())
}

/// Check `password` against a stored Argon2 or bcrypt hash.
///
/// `Ok(false)` means the password is wrong; `Err` means the stored hash could
/// not be used at all.
pub fn verify_password(password: &str, stored: &str) -> Result<bool> {
    if is_bcrypt(stored) {
        return bcrypt::verify(password, stored).map_err(|e| anyhow!("Invalid bcrypt hash: {}", e));
    }

    let parsed = PasswordHash::new(stored).map_err(|e| anyhow!("Invalid password hash: {}", e))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(anyhow!("Password verification failed: {}", e)),
    }
}

fn is_bcrypt(stored: &str) -> bool {
    ["$2a$", "$2b$", "$2y$"].iter().any(|p| stored.starts_with(p))
}
