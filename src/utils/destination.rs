//! Destination URL validation.

use crate::error::AppError;
use serde_json::json;
use url::Url;

/// Validates that a destination is a well-formed absolute http(s) URL.
///
/// The destination is stored exactly as supplied; this only rejects input,
/// it never rewrites it.
///
/// # Errors
///
/// Returns [`AppError::Validation`] with code `LONG_URL_REQUIRED` when the
/// destination is empty, or `INVALID_URL` when it is not an absolute URL with
/// an `http` or `https` scheme.
pub fn validate_destination(long_url: &str) -> Result<(), AppError> {
    if long_url.trim().is_empty() {
        return Err(AppError::bad_request(
            "LONG_URL_REQUIRED",
            "longUrl is required",
            json!({}),
        ));
    }

    let parsed = Url::parse(long_url).map_err(|e| {
        AppError::bad_request(
            "INVALID_URL",
            "Invalid URL format",
            json!({ "reason": e.to_string() }),
        )
    })?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(AppError::bad_request(
            "INVALID_URL",
            "URL must use the http or https scheme",
            json!({ "scheme": parsed.scheme() }),
        ));
    }

    Ok(())
}
