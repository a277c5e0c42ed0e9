//! Token codec: issues and verifies the two session credentials.
//!
//! Access tokens and refresh tokens are HS256-signed JWTs carrying the account
//! id and the token kind. Each kind has its own signing secret and its own
//! expiry, so a leaked access-token key cannot forge refresh tokens and vice
//! versa. The codec is pure: no storage, no side effects, deterministic for a
//! given configuration.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// The two credential kinds issued per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Short-lived credential authorizing ordinary API calls.
    Access,
    /// Long-lived credential used solely to mint new access tokens.
    Refresh,
}

/// JWT claims embedded in every token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject -- the account's internal database id.
    pub sub: i64,
    /// Which credential this token is; checked against the expected kind on
    /// verification.
    pub kind: TokenKind,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
}

/// Verification failure reasons.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TokenError {
    /// Signature does not match, or the token is structurally invalid.
    #[error("invalid token signature")]
    InvalidSignature,
    /// The token is past its expiry.
    #[error("token expired")]
    Expired,
    /// The decoded kind does not equal the expected kind.
    #[error("token kind mismatch")]
    KindMismatch,
}

/// Signing configuration for one token kind.
#[derive(Clone)]
struct KindConfig {
    secret: String,
    lifetime_secs: i64,
}

/// Stateless issuer/verifier for access and refresh tokens.
#[derive(Clone)]
pub struct TokenService {
    access: KindConfig,
    refresh: KindConfig,
}

impl TokenService {
    /// Creates a token service with distinct secrets per kind.
    ///
    /// `access_expiry_mins` and `refresh_expiry_days` follow the session
    /// design: short-lived access (15 minutes by default), long-lived refresh
    /// (7 days by default).
    pub fn new(
        access_secret: String,
        refresh_secret: String,
        access_expiry_mins: i64,
        refresh_expiry_days: i64,
    ) -> Self {
        Self {
            access: KindConfig {
                secret: access_secret,
                lifetime_secs: access_expiry_mins * 60,
            },
            refresh: KindConfig {
                secret: refresh_secret,
                lifetime_secs: refresh_expiry_days * 24 * 60 * 60,
            },
        }
    }

    /// Lifetime in seconds of tokens of the given kind.
    ///
    /// Used by the transport layer to align cookie `Max-Age` with token
    /// expiry.
    pub fn lifetime_secs(&self, kind: TokenKind) -> i64 {
        self.config_for(kind).lifetime_secs
    }

    fn config_for(&self, kind: TokenKind) -> &KindConfig {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }

    /// Issues a signed token of the given kind for an account.
    pub fn issue(&self, account_id: i64, kind: TokenKind) -> Result<String, TokenError> {
        let config = self.config_for(kind);
        let now = Utc::now().timestamp();

        let claims = Claims {
            sub: account_id,
            kind,
            exp: now + config.lifetime_secs,
            iat: now,
        };

        encode(
            &Header::default(), // HS256
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .map_err(|_| TokenError::InvalidSignature)
    }

    /// Verifies a token against the expected kind and returns its claims.
    ///
    /// # Errors
    ///
    /// - [`TokenError::Expired`] if past expiry
    /// - [`TokenError::KindMismatch`] if the decoded kind differs from
    ///   `expected` (a refresh token can never stand in for an access token)
    /// - [`TokenError::InvalidSignature`] for every other verification failure
    pub fn verify(&self, token: &str, expected: TokenKind) -> Result<Claims, TokenError> {
        let config = self.config_for(expected);

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(config.secret.as_bytes()),
            &Validation::default(), // HS256, validates exp
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::InvalidSignature,
        })?;

        if data.claims.kind != expected {
            return Err(TokenError::KindMismatch);
        }

        Ok(data.claims)
    }
}
