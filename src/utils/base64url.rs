//! Base64URL encoding/decoding per RFC 4648
//!
//! URL-safe alphabet (`-`/`_`), no padding. This is the only base64 variant
//! the token wire format uses; the rest of the crate goes through this module
//! rather than touching the `base64` engine directly.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

/// Encode bytes to a Base64URL string
pub fn encode(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Decode a Base64URL string to bytes
///
/// Rejects padding characters, the `+`/`/` alphabet and any other byte
/// outside the URL-safe set.
pub fn decode(input: &str) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(input)
}
