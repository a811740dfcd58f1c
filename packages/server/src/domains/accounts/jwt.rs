use std::collections::HashMap;

use jsonwebtoken::{
    decode, decode_header, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header,
    Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::common::AccountId;
use crate::config::JwtConfig;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// JWT Claims - data stored in the token
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    pub sub: String,           // Subject (account_id as string)
    pub account_id: AccountId, // Stable key for profile mutations
    pub full_name: String,
    pub phone_number: String,
    pub iat: i64, // Issued at timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>, // Expiration timestamp, absent unless a TTL is configured
    pub iss: String, // Issuer
    pub jti: String, // JWT ID (unique token identifier)
}

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("token is not well-formed")]
    Malformed,

    #[error("unsupported signing algorithm: {0:?}")]
    UnsupportedAlgorithm(Algorithm),

    #[error("unknown signing key: {0}")]
    UnknownKey(String),

    #[error("token signature does not match")]
    BadSignature,

    #[error("token has expired")]
    Expired,

    #[error("token lifetime is out of range")]
    InvalidLifetime,

    #[error("invalid token: {0}")]
    Invalid(jsonwebtoken::errors::Error),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidToken | ErrorKind::Base64(_) | ErrorKind::Json(_) | ErrorKind::Utf8(_) => {
                TokenError::Malformed
            }
            ErrorKind::InvalidSignature => TokenError::BadSignature,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid(err),
        }
    }
}

/// JWT Service - creates and verifies session tokens
///
/// Tokens are signed with the current key and name it in the `kid` header.
/// Verification accepts the current key plus any retired keys still configured,
/// which lets the secret rotate without logging everyone out.
#[derive(Clone)]
pub struct JwtService {
    key_id: String,
    encoding_key: EncodingKey,
    decoding_keys: HashMap<String, DecodingKey>,
    issuer: String,
    ttl: Option<chrono::Duration>,
}

impl JwtService {
    /// Create new JWT service with secret and issuer (key id `v1`, no expiry)
    pub fn new(secret: &str, issuer: String) -> Self {
        Self::with_key_id("v1", secret, issuer)
    }

    pub fn with_key_id(key_id: &str, secret: &str, issuer: String) -> Self {
        let mut decoding_keys = HashMap::new();
        decoding_keys.insert(key_id.to_string(), DecodingKey::from_secret(secret.as_bytes()));

        Self {
            key_id: key_id.to_string(),
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_keys,
            issuer,
            ttl: None,
        }
    }

    pub fn from_config(config: &JwtConfig) -> Self {
        let mut service = Self::with_key_id(&config.key_id, &config.secret, config.issuer.clone());
        for (kid, secret) in &config.previous_keys {
            service = service.with_previous_key(kid, secret);
        }
        match config.ttl_hours {
            // An unrepresentable lifetime fails at issue time rather than disabling expiry
            Some(hours) => service
                .with_ttl(chrono::Duration::try_hours(hours).unwrap_or(chrono::Duration::MAX)),
            None => service,
        }
    }

    /// Accept tokens signed by a retired key
    pub fn with_previous_key(mut self, key_id: &str, secret: &str) -> Self {
        // Never let a retired entry shadow the current key
        if key_id != self.key_id {
            self.decoding_keys
                .insert(key_id.to_string(), DecodingKey::from_secret(secret.as_bytes()));
        }
        self
    }

    /// Stamp new tokens with `exp` and require it on verification
    pub fn with_ttl(mut self, ttl: chrono::Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Create a new JWT token for an account
    pub fn create_token(
        &self,
        account_id: AccountId,
        full_name: String,
        phone_number: String,
    ) -> Result<String, TokenError> {
        let now = chrono::Utc::now();
        let exp = match self.ttl {
            Some(ttl) if ttl > chrono::Duration::zero() => Some(
                now.checked_add_signed(ttl)
                    .ok_or(TokenError::InvalidLifetime)?
                    .timestamp(),
            ),
            Some(_) => return Err(TokenError::InvalidLifetime),
            None => None,
        };

        let claims = Claims {
            sub: account_id.to_string(),
            account_id,
            full_name,
            phone_number,
            iat: now.timestamp(),
            exp,
            iss: self.issuer.clone(),
            jti: Uuid::new_v4().to_string(), // Unique token ID
        };

        self.issue(&claims)
    }

    /// Sign the given claims as-is
    pub fn issue(&self, claims: &Claims) -> Result<String, TokenError> {
        let mut header = Header::new(ALGORITHM);
        header.kid = Some(self.key_id.clone());

        encode(&header, claims, &self.encoding_key).map_err(Into::into)
    }

    /// Verify and decode a JWT token
    ///
    /// Returns the embedded claims unchanged if the token is well-formed,
    /// HS256-signed by a known key, from our issuer, and not expired.
    pub fn verify_token(&self, token: &str) -> Result<Claims, TokenError> {
        let header = decode_header(token).map_err(|_| TokenError::Malformed)?;
        if header.alg != ALGORITHM {
            return Err(TokenError::UnsupportedAlgorithm(header.alg));
        }

        let kid = header.kid.unwrap_or_default();
        let key = self
            .decoding_keys
            .get(&kid)
            .ok_or(TokenError::UnknownKey(kid))?;

        let mut validation = Validation::new(ALGORITHM);
        validation.set_issuer(&[&self.issuer]);
        if self.ttl.is_some() {
            validation.set_required_spec_claims(&["iss", "exp"]);
        } else {
            validation.set_required_spec_claims(&["iss"]);
        }

        decode::<Claims>(token, key, &validation)
            .map(|data| data.claims)
            .map_err(Into::into)
    }
}
