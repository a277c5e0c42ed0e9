//! DTOs for link management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::Link;

/// Request to create a shortened link.
///
/// Destination and custom-code validation live in the link service so the
/// tagged error codes (`LONG_URL_REQUIRED`, `INVALID_URL`, `INVALID_CODE`)
/// stay in one place.
#[derive(Debug, Deserialize)]
pub struct CreateLinkRequest {
    #[serde(rename = "longUrl")]
    pub long_url: String,

    /// Optional custom short code (6-8 alphanumeric characters).
    pub code: Option<String>,
}

/// Public view of a link returned to its owner.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub code: String,
    #[serde(rename = "longUrl")]
    pub long_url: String,
    pub clicks: i64,
    #[serde(rename = "lastVisitedAt")]
    pub last_visited_at: Option<DateTime<Utc>>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl From<&Link> for LinkResponse {
    fn from(link: &Link) -> Self {
        Self {
            code: link.code.clone(),
            long_url: link.long_url.clone(),
            clicks: link.clicks,
            last_visited_at: link.last_visited_at,
            created_at: link.created_at,
        }
    }
}

/// Envelope for endpoints returning one link.
#[derive(Debug, Serialize)]
pub struct LinkEnvelope {
    pub ok: bool,
    pub data: LinkResponse,
}

/// Envelope for the list endpoint.
#[derive(Debug, Serialize)]
pub struct LinkListEnvelope {
    pub ok: bool,
    pub data: Vec<LinkResponse>,
}
