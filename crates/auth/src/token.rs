//! Opaque bearer-token formatting, parsing, and digest construction
//!
//! Token wire form: `sf_v1_<token-uuid>.<secret-hex>`. The server never
//! stores the secret; it stores a sha-256 verifier digest bound to the token
//! uuid and the principal's role, so a leaked record cannot be replayed as a
//! token.

use crate::{AuthError, Role};
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Token identifier prefix
pub const TOKEN_PREFIX: &str = "sf";

/// Number of random secret bytes encoded in a token
pub const TOKEN_SECRET_BYTES: usize = 32;

const VERSION_SEGMENT: &str = "v1";

/// A bearer token split back into its parts
#[derive(Debug, Clone)]
pub struct ParsedToken {
    pub token_id: Uuid,
    pub secret: [u8; TOKEN_SECRET_BYTES],
}

/// Generate a fresh token secret from the OS RNG
pub fn generate_secret() -> [u8; TOKEN_SECRET_BYTES] {
    let mut secret = [0_u8; TOKEN_SECRET_BYTES];
    OsRng.fill_bytes(&mut secret);
    secret
}

/// Render a token into its wire form
pub fn format_token(token_id: Uuid, secret: &[u8; TOKEN_SECRET_BYTES]) -> String {
    format!(
        "{TOKEN_PREFIX}_{VERSION_SEGMENT}_{}.{}",
        token_id.simple(),
        hex::encode(secret)
    )
}

/// Parse a bearer string back into its parts
pub fn parse_token(token: &str) -> Result<ParsedToken, AuthError> {
    let (prefix_and_id, secret_hex) = token.split_once('.').ok_or(AuthError::InvalidFormat)?;

    let mut segments = prefix_and_id.splitn(3, '_');
    let prefix = segments.next().ok_or(AuthError::InvalidFormat)?;
    let version = segments.next().ok_or(AuthError::InvalidFormat)?;
    let id_segment = segments.next().ok_or(AuthError::InvalidFormat)?;

    if prefix != TOKEN_PREFIX {
        return Err(AuthError::InvalidFormat);
    }
    if version != VERSION_SEGMENT {
        return Err(AuthError::UnsupportedVersion);
    }

    let token_id = Uuid::try_parse(id_segment).map_err(|_| AuthError::InvalidFormat)?;

    let secret_bytes = hex::decode(secret_hex).map_err(|_| AuthError::InvalidSecretEncoding)?;
    let secret: [u8; TOKEN_SECRET_BYTES] = secret_bytes
        .try_into()
        .map_err(|_| AuthError::InvalidSecretEncoding)?;

    Ok(ParsedToken { token_id, secret })
}

/// Compute the verifier digest stored alongside a token record.
///
/// Input layout: `{token_uuid_hex}:{role}:{secret_hex}`.
pub fn verifier_digest(token_id: Uuid, role: Role, secret: &[u8; TOKEN_SECRET_BYTES]) -> String {
    let input = format!(
        "{}:{}:{}",
        token_id.simple(),
        role.as_str(),
        hex::encode(secret)
    );

    hex::encode(Sha256::digest(input.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parse_round_trip() {
        let token_id = Uuid::new_v4();
        let secret = [0xAB_u8; TOKEN_SECRET_BYTES];

        let token = format_token(token_id, &secret);
        let parsed = parse_token(&token).expect("token should parse");

        assert_eq!(parsed.token_id, token_id);
        assert_eq!(parsed.secret, secret);
    }

    #[test]
    fn parse_rejects_wrong_prefix() {
        let token = format_token(Uuid::nil(), &[0_u8; TOKEN_SECRET_BYTES]);
        let mangled = token.replacen("sf_", "xx_", 1);
        assert!(matches!(
            parse_token(&mangled),
            Err(AuthError::InvalidFormat)
        ));
    }

    #[test]
    fn parse_rejects_unknown_version() {
        let token = format_token(Uuid::nil(), &[0_u8; TOKEN_SECRET_BYTES]);
        let mangled = token.replacen("_v1_", "_v9_", 1);
        assert!(matches!(
            parse_token(&mangled),
            Err(AuthError::UnsupportedVersion)
        ));
    }

    #[test]
    fn parse_rejects_short_secret() {
        let token = format!("sf_v1_{}.abcd", Uuid::nil().simple());
        assert!(matches!(
            parse_token(&token),
            Err(AuthError::InvalidSecretEncoding)
        ));
    }

    #[test]
    fn digest_binds_role() {
        let token_id = Uuid::new_v4();
        let secret = generate_secret();

        let admin = verifier_digest(token_id, Role::Admin, &secret);
        let customer = verifier_digest(token_id, Role::Customer, &secret);

        assert_ne!(admin, customer);
        assert_eq!(admin, verifier_digest(token_id, Role::Admin, &secret));
    }
}
