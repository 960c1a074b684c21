//! Salted password hashing
//!
//! Stored form: `{salt_hex}${digest_hex}` where the digest is
//! sha-256 over salt bytes followed by the password bytes. Verification never
//! reports whether the email or the password was wrong; callers collapse all
//! failures into one credentials error.

use crate::AuthError;
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};

const SALT_BYTES: usize = 16;

/// Hash a password with a fresh random salt
pub fn hash_password(password: &str) -> String {
    let mut salt = [0_u8; SALT_BYTES];
    OsRng.fill_bytes(&mut salt);

    format!("{}${}", hex::encode(salt), digest_hex(&salt, password))
}

/// Check a password against a stored `salt$digest` hash
pub fn verify_password(password: &str, stored: &str) -> Result<bool, AuthError> {
    let (salt_hex, digest) = stored.split_once('$').ok_or(AuthError::MalformedHash)?;
    let salt = hex::decode(salt_hex).map_err(|_| AuthError::MalformedHash)?;

    Ok(digest_hex(&salt, password) == digest)
}

fn digest_hex(salt: &[u8], password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}
