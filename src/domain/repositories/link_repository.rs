//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing short links.
///
/// Every operation touches exactly one link record. Ownership-scoped
/// operations (`delete_owned`) filter by owner in the same statement so the
/// check and the mutation cannot be split by a concurrent request.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Creates a new short link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code already exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its short code, regardless of owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Lists all links owned by an account, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Link>, AppError>;

    /// Deletes a link only if it is owned by `owner_id`.
    ///
    /// Returns `Ok(true)` if a row was deleted, `Ok(false)` if no link with
    /// that code exists or it belongs to another owner. Callers cannot tell
    /// the two `false` cases apart.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete_owned(&self, code: &str, owner_id: i64) -> Result<bool, AppError>;

    /// Atomically increments the click counter and stamps the visit time.
    ///
    /// The increment and timestamp update execute as a single statement, so N
    /// concurrent visits to the same code always raise the counter by exactly
    /// N. Returns the updated link, or `None` if the code does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn register_visit(&self, code: &str) -> Result<Option<Link>, AppError>;
}
