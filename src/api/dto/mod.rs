//! Data Transfer Objects for request/response serialization.

pub mod auth;
pub mod health;
pub mod links;
