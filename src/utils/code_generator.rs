//! Short code generation and validation.
//!
//! Provides random code generation and format validation for custom
//! user-provided codes. Codes are compared and stored lowercase everywhere;
//! generation samples the full 62-symbol alphanumeric alphabet and the caller
//! folds the result to lowercase before the collision check.

use crate::error::AppError;
use rand::Rng;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Alphanumeric alphabet used for random codes (62 symbols).
const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of generated codes.
const GENERATED_CODE_LENGTH: usize = 6;

/// Compiled regex for custom code validation: 6-8 alphanumeric characters.
static CUSTOM_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{6,8}$").unwrap());

/// Generates a random 6-character short code.
///
/// The result may contain mixed case; callers fold it to lowercase before
/// storage so the effective code space matches the stored form.
pub fn generate_code() -> String {
    let mut rng = rand::rng();

    (0..GENERATED_CODE_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CODE_ALPHABET.len());
            CODE_ALPHABET[idx] as char
        })
        .collect()
}

/// Validates a user-provided custom short code.
///
/// # Rules
///
/// - Length: 6-8 characters
/// - Allowed characters: ASCII letters and digits
///
/// Case is accepted here; the caller normalizes to lowercase afterwards.
///
/// # Errors
///
/// Returns [`AppError::Validation`] with code `INVALID_CODE` if the format
/// rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if !CUSTOM_CODE_REGEX.is_match(code) {
        return Err(AppError::bad_request(
            "INVALID_CODE",
            "Short code must be 6-8 alphanumeric characters",
            json!({ "code": code }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_correct_length() {
        let code = generate_code();
        assert_eq!(code.len(), 6);
    }

    #[test]
    fn test_generate_code_alphanumeric() {
        for _ in 0..100 {
            let code = generate_code();
            assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_generate_code_valid_as_custom_code() {
        // Every generated code passes the same validation applied to
        // user-supplied codes.
        for _ in 0..100 {
            assert!(validate_custom_code(&generate_code()).is_ok());
        }
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let mut codes = HashSet::new();

        for _ in 0..1000 {
            codes.insert(generate_code());
        }

        // A handful of collisions in 1000 draws would indicate a broken RNG.
        assert!(codes.len() > 990);
    }

    #[test]
    fn test_validate_minimum_length() {
        assert!(validate_custom_code("abc123").is_ok());
    }

    #[test]
    fn test_validate_maximum_length() {
        assert!(validate_custom_code("abcd1234").is_ok());
    }

    #[test]
    fn test_validate_mixed_case_allowed() {
        assert!(validate_custom_code("MyCode1").is_ok());
    }

    #[test]
    fn test_validate_too_short() {
        let result = validate_custom_code("abc");
        assert!(result.is_err());

        let err = result.unwrap_err();
        assert_eq!(err.code(), "INVALID_CODE");
        assert!(err.to_string().contains("6-8 alphanumeric"));
    }

    #[test]
    fn test_validate_too_long() {
        assert!(validate_custom_code("abcd12345").is_err());
    }

    #[test]
    fn test_validate_special_characters() {
        assert!(validate_custom_code("my-code").is_err());
        assert!(validate_custom_code("my_code").is_err());
        assert!(validate_custom_code("code 12").is_err());
    }

    #[test]
    fn test_validate_empty_string() {
        assert!(validate_custom_code("").is_err());
    }
}
