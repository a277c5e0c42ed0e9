//! Authentication session management: register, login, me, refresh.
//!
//! The server keeps no session state. A session is nothing but the two signed
//! tokens held by the client transport; validity is purely a function of
//! signature, expiry, and kind. Password hashing and verification are
//! CPU-bound and run on the blocking thread pool so they never stall
//! unrelated requests.

use std::sync::Arc;

use serde_json::json;

use crate::application::services::token_service::{TokenError, TokenKind, TokenService};
use crate::domain::entities::{Account, NewAccount};
use crate::domain::repositories::AccountRepository;
use crate::error::AppError;
use crate::utils::password;

/// The two credential artifacts issued on register/login.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Service orchestrating registration, login, and session refresh.
pub struct AuthService<R: AccountRepository> {
    repository: Arc<R>,
    tokens: TokenService,
}

impl<R: AccountRepository> AuthService<R> {
    /// Creates a new authentication service.
    pub fn new(repository: Arc<R>, tokens: TokenService) -> Self {
        Self { repository, tokens }
    }

    /// The token codec, exposed for cookie lifetime alignment.
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Registers a new account and issues both session tokens.
    ///
    /// The email is normalized to lowercase before lookup and storage. The
    /// plaintext password is hashed before the persisted record is
    /// constructed; repositories never see it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] (`USER_EXISTS`) if the email is already
    /// registered. Returns [`AppError::Internal`] on hashing or store faults.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(Account, TokenPair), AppError> {
        let email = email.trim().to_lowercase();

        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict(
                "USER_EXISTS",
                "User already exists",
                json!({ "email": email }),
            ));
        }

        let password = password.to_string();
        let password_hash = tokio::task::spawn_blocking(move || password::hash_password(&password))
            .await
            .map_err(|e| {
                AppError::internal("HASH_ERROR", "Password hashing task failed", json!({ "error": e.to_string() }))
            })?
            .map_err(|e| {
                AppError::internal("HASH_ERROR", "Password hashing failed", json!({ "error": e.to_string() }))
            })?;

        // The unique-email constraint is the final authority if two
        // registrations race past the lookup above.
        let account = self
            .repository
            .create(NewAccount {
                email,
                password_hash,
            })
            .await
            .map_err(|e| match e {
                AppError::Conflict { .. } => AppError::conflict(
                    "USER_EXISTS",
                    "User already exists",
                    json!({}),
                ),
                other => other,
            })?;

        let pair = self.issue_pair(account.id)?;
        Ok((account, pair))
    }

    /// Authenticates an account and issues both session tokens.
    ///
    /// # Errors
    ///
    /// Returns a single generic [`AppError::Unauthorized`]
    /// (`INVALID_CREDENTIALS`) whether the account does not exist or the
    /// password comparison fails, so the response never reveals which.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(Account, TokenPair), AppError> {
        let email = email.trim().to_lowercase();

        let Some(account) = self.repository.find_by_email(&email).await? else {
            return Err(Self::invalid_credentials());
        };

        let password = password.to_string();
        let hash = account.password_hash.clone();
        let verified =
            tokio::task::spawn_blocking(move || password::verify_password(&password, &hash))
                .await
                .map_err(|e| {
                    AppError::internal(
                        "HASH_ERROR",
                        "Password verification task failed",
                        json!({ "error": e.to_string() }),
                    )
                })?
                .map_err(|e| {
                    AppError::internal(
                        "HASH_ERROR",
                        "Password verification failed",
                        json!({ "error": e.to_string() }),
                    )
                })?;

        if !verified {
            return Err(Self::invalid_credentials());
        }

        let pair = self.issue_pair(account.id)?;
        Ok((account, pair))
    }

    /// Looks up an account by id, for handlers that already hold a verified
    /// account id.
    pub async fn find_account(&self, id: i64) -> Result<Option<Account>, AppError> {
        self.repository.find_by_id(id).await
    }

    /// Verifies an access token, mapping codec failures onto the HTTP error
    /// taxonomy.
    pub fn verify_access(
        &self,
        token: &str,
    ) -> Result<crate::application::services::token_service::Claims, AppError> {
        self.tokens
            .verify(token, TokenKind::Access)
            .map_err(|e| match e {
                TokenError::Expired => AppError::unauthorized(
                    "TOKEN_EXPIRED",
                    "Access token expired",
                    json!({}),
                ),
                _ => AppError::unauthorized(
                    "INVALID_TOKEN",
                    "Invalid or malformed access token",
                    json!({}),
                ),
            })
    }

    /// Mints a new access token from a valid refresh token.
    ///
    /// The refresh token itself is not rotated: it stays valid until its own
    /// expiry, at which point the client must log in again.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] with `REFRESH_TOKEN_EXPIRED` when
    /// the refresh token is past expiry, or `INVALID_REFRESH_TOKEN` for any
    /// other verification failure or when the account no longer exists.
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, AppError> {
        let claims = self
            .tokens
            .verify(refresh_token, TokenKind::Refresh)
            .map_err(|e| match e {
                TokenError::Expired => AppError::unauthorized(
                    "REFRESH_TOKEN_EXPIRED",
                    "Refresh token expired, please login again",
                    json!({}),
                ),
                _ => AppError::unauthorized(
                    "INVALID_REFRESH_TOKEN",
                    "Invalid refresh token",
                    json!({}),
                ),
            })?;

        // Confirm the account still exists before minting a credential for it.
        if self.repository.find_by_id(claims.sub).await?.is_none() {
            return Err(AppError::unauthorized(
                "INVALID_REFRESH_TOKEN",
                "User not found",
                json!({ "id": claims.sub }),
            ));
        }

        self.issue_token(claims.sub, TokenKind::Access)
    }

    fn issue_pair(&self, account_id: i64) -> Result<TokenPair, AppError> {
        Ok(TokenPair {
            access_token: self.issue_token(account_id, TokenKind::Access)?,
            refresh_token: self.issue_token(account_id, TokenKind::Refresh)?,
        })
    }

    fn issue_token(&self, account_id: i64, kind: TokenKind) -> Result<String, AppError> {
        self.tokens.issue(account_id, kind).map_err(|e| {
            AppError::internal(
                "TOKEN_ERROR",
                "Failed to issue token",
                json!({ "error": e.to_string() }),
            )
        })
    }

    fn invalid_credentials() -> AppError {
        AppError::unauthorized(
            "INVALID_CREDENTIALS",
            "Invalid email or password",
            json!({}),
        )
    }
}
