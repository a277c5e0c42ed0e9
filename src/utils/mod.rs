//! Shared utilities used across layers.

pub mod code_generator;
pub mod cookies;
pub mod destination;
pub mod password;
