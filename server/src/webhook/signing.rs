//! HMAC-SHA256 Webhook Signatures
//!
//! The platform signs every request body with the channel secret and sends the
//! base64-encoded digest in the `X-Line-Signature` header.

use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Request header carrying the body signature.
pub const SIGNATURE_HEADER: &str = "x-line-signature";

/// Sign a body with HMAC-SHA256 and return the base64-encoded digest.
pub fn sign_body(secret: &[u8], body: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(body);
    STANDARD.encode(mac.finalize().into_bytes())
}

/// Verify a base64 HMAC-SHA256 signature against the raw request body.
///
/// A signature that is not valid standard base64 fails verification like any
/// other mismatch; the decode error is never surfaced.
pub fn validate_signature(secret: &[u8], signature: &str, body: &[u8]) -> bool {
    let Ok(decoded) = STANDARD.decode(signature) else {
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(secret) else {
        return false;
    };
    mac.update(body);

    // Constant-time, length-checked comparison
    mac.verify_slice(&decoded).is_ok()
}
