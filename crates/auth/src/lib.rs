//! Credential and bearer-token primitives for the shopfront services
//!
//! Pure functions only: token formatting/parsing/digesting and salted
//! password hashing. Persistence of token records and user rows belongs to
//! the API service's storage layer.

pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Principal role embedded in a token record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular storefront customer
    Customer,
    /// Back-office principal with write access
    Admin,
}

impl Role {
    /// Canonical string form used in verifier digests
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token format is invalid")]
    InvalidFormat,

    #[error("token uses an unsupported version")]
    UnsupportedVersion,

    #[error("token secret encoding is invalid")]
    InvalidSecretEncoding,

    #[error("stored password hash is malformed")]
    MalformedHash,
}

pub use password::{hash_password, verify_password};
pub use token::{
    format_token, generate_secret, parse_token, verifier_digest, ParsedToken, TOKEN_PREFIX,
    TOKEN_SECRET_BYTES,
};
