//! Account entity representing a registered user.

use chrono::{DateTime, Utc};

/// A registered account.
///
/// `email` is stored normalized to lowercase and is unique across all
/// accounts. `password_hash` is an Argon2id PHC string; the entity does not
/// implement `Serialize`, so the hash cannot leak into a response body.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Account {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for creating a new account.
///
/// `password_hash` must already be hashed; repositories never see plaintext
/// secrets.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password_hash: String,
}
