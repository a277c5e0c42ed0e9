//! Link creation, ownership-gated retrieval, and redirect resolution.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, validate_custom_code};
use crate::utils::destination::validate_destination;

/// Maximum attempts at generating a collision-free random code.
///
/// At 36^6 lowercase combinations, repeated exhaustion indicates a store
/// fault rather than bad luck.
const MAX_CODE_ATTEMPTS: usize = 10;

/// Service for creating and managing shortened links.
///
/// Authenticated operations take an explicit `owner_id` threaded in from the
/// transport layer; there is no ambient current-user state. The redirect path
/// ([`Self::resolve`]) is the only operation without an ownership check.
pub struct LinkService<L: LinkRepository> {
    link_repository: Arc<L>,
}

impl<L: LinkRepository> LinkService<L> {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>) -> Self {
        Self { link_repository }
    }

    /// Creates a short link owned by `owner_id`.
    ///
    /// # Code Allocation
    ///
    /// - If `custom_code` is provided, it must be 6-8 alphanumeric characters;
    ///   it is folded to lowercase and rejected with a conflict if taken.
    /// - Otherwise a random 6-character code is generated, with up to
    ///   [`MAX_CODE_ATTEMPTS`] collision retries.
    ///
    /// The check-then-insert sequence is not atomic; the store's unique-code
    /// constraint is the final authority, and a lost race surfaces as the
    /// same `CODE_TAKEN` conflict.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a missing or malformed
    /// destination or custom code, [`AppError::Conflict`] (`CODE_TAKEN`) for
    /// a taken code, and [`AppError::Internal`] (`CODE_SPACE_EXHAUSTED`) when
    /// all generation attempts collide.
    pub async fn create_link(
        &self,
        owner_id: i64,
        long_url: String,
        custom_code: Option<String>,
    ) -> Result<Link, AppError> {
        validate_destination(&long_url)?;

        let code = match custom_code {
            Some(custom) => {
                validate_custom_code(&custom)?;
                let custom = custom.to_lowercase();

                if self.link_repository.find_by_code(&custom).await?.is_some() {
                    return Err(Self::code_taken(&custom));
                }

                custom
            }
            None => self.allocate_code().await?,
        };

        self.link_repository
            .create(NewLink {
                code: code.clone(),
                long_url,
                owner_id,
            })
            .await
            .map_err(|e| match e {
                AppError::Conflict { .. } => Self::code_taken(&code),
                other => other,
            })
    }

    /// Lists all links owned by an account, newest first.
    pub async fn list_links(&self, owner_id: i64) -> Result<Vec<Link>, AppError> {
        self.link_repository.list_by_owner(owner_id).await
    }

    /// Retrieves a link by code, only if `owner_id` owns it.
    ///
    /// # Errors
    ///
    /// Returns one merged [`AppError::NotFound`] whether the code does not
    /// exist or it belongs to another account, so non-owners cannot probe
    /// which codes are taken.
    pub async fn get_link(&self, owner_id: i64, code: &str) -> Result<Link, AppError> {
        let code = code.to_lowercase();

        match self.link_repository.find_by_code(&code).await? {
            Some(link) if link.owner_id == owner_id => Ok(link),
            _ => Err(Self::not_found_or_unauthorized(&code)),
        }
    }

    /// Deletes a link by code, only if `owner_id` owns it.
    ///
    /// # Errors
    ///
    /// Returns the same merged [`AppError::NotFound`] as [`Self::get_link`]
    /// for a missing code or a foreign owner.
    pub async fn delete_link(&self, owner_id: i64, code: &str) -> Result<(), AppError> {
        let code = code.to_lowercase();

        if !self.link_repository.delete_owned(&code, owner_id).await? {
            return Err(Self::not_found_or_unauthorized(&code));
        }

        Ok(())
    }

    /// Resolves a code to its destination and records the visit.
    ///
    /// Public path: no ownership check. The click increment and visit stamp
    /// happen in one atomic store operation, so concurrent redirects never
    /// lose a count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn resolve(&self, code: &str) -> Result<Link, AppError> {
        let code = code.to_lowercase();

        self.link_repository
            .register_visit(&code)
            .await?
            .ok_or_else(|| {
                AppError::not_found("NOT_FOUND", "Link not found", json!({ "code": code }))
            })
    }

    /// Generates a unique lowercase short code with collision retry.
    async fn allocate_code(&self) -> Result<String, AppError> {
        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = generate_code().to_lowercase();

            if self.link_repository.find_by_code(&code).await?.is_none() {
                return Ok(code);
            }
        }

        Err(AppError::internal(
            "CODE_SPACE_EXHAUSTED",
            "Failed to generate unique short code",
            json!({ "attempts": MAX_CODE_ATTEMPTS }),
        ))
    }

    fn code_taken(code: &str) -> AppError {
        AppError::conflict(
            "CODE_TAKEN",
            "Short code already in use",
            json!({ "code": code }),
        )
    }

    fn not_found_or_unauthorized(code: &str) -> AppError {
        AppError::not_found(
            "NOT_FOUND",
            "Link not found or unauthorized",
            json!({ "code": code }),
        )
    }
}
