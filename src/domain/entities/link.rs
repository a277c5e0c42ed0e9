//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL link with click statistics.
///
/// Represents the mapping between a short code and a destination URL.
/// `code` is stored lowercase and is globally unique. `owner_id` references
/// the account that created the link and never changes.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub long_url: String,
    pub owner_id: i64,
    pub clicks: i64,
    pub last_visited_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Returns true if the link has been visited at least once.
    pub fn was_visited(&self) -> bool {
        self.last_visited_at.is_some()
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub code: String,
    pub long_url: String,
    pub owner_id: i64,
}
