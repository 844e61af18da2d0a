//! Roomgate token library
//!
//! Mints the signed access tokens media clients present when joining a room,
//! and hashes/verifies the passwords that gate them.
//!
//! New password hashes are Argon2id. Verification also accepts bcrypt hashes
//! so user tables carried over from older deployments keep working.

pub mod password;
pub mod token;

pub use password::{hash_password, verify_password};
pub use token::TokenIssuer;
