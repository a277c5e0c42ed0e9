//! Business logic services orchestrating domain operations.

pub mod auth_service;
pub mod link_service;
pub mod token_service;

pub use auth_service::{AuthService, TokenPair};
pub use link_service::LinkService;
pub use token_service::{Claims, TokenError, TokenKind, TokenService};
