//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::services::{AuthService, LinkService};
use crate::infrastructure::persistence::{PgAccountRepository, PgLinkRepository};

/// Application state shared across handlers and middleware.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService<PgAccountRepository>>,
    pub link_service: Arc<LinkService<PgLinkRepository>>,
    /// When true, auth cookies carry the `Secure` attribute.
    pub cookie_secure: bool,
}

impl AppState {
    /// Creates application state from wired services.
    pub fn new(
        auth_service: Arc<AuthService<PgAccountRepository>>,
        link_service: Arc<LinkService<PgLinkRepository>>,
        cookie_secure: bool,
    ) -> Self {
        Self {
            auth_service,
            link_service,
            cookie_secure,
        }
    }
}
