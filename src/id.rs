//! ID generation utilities with prefix support
//!
//! User identifiers take the form `usr_{random}`, where the random part is
//! 96 bits of OS entropy encoded as URL-safe base64 without padding.

use base64::{Engine, prelude::BASE64_URL_SAFE_NO_PAD};
use rand::{TryRngCore, rngs::OsRng};

/// Generate a prefixed ID with 96 bits of entropy
///
/// The ID format is: `{prefix}_{random_string}`
pub fn generate_prefixed_id(prefix: &str) -> String {
    let mut bytes = [0u8; 12];
    OsRng.try_fill_bytes(&mut bytes).unwrap();

    let encoded = BASE64_URL_SAFE_NO_PAD.encode(bytes);

    format!("{prefix}_{encoded}")
}

/// Validate that a prefixed ID has the expected format
pub fn validate_prefixed_id(id: &str, expected_prefix: &str) -> bool {
    let Some(rest) = id.strip_prefix(expected_prefix) else {
        return false;
    };
    let Some(encoded) = rest.strip_prefix('_') else {
        return false;
    };

    // 12 bytes encode to 16 base64 characters without padding
    encoded.len() >= 16 && BASE64_URL_SAFE_NO_PAD.decode(encoded).is_ok()
}
