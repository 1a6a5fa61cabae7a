//! Integrity signature codec for the payment gateway.
//!
//! The gateway's recipe is a plain SHA-256 over a delimiter-free
//! concatenation; field order and the absence of separators are part of the
//! wire contract, not a local choice. Webhook verification runs over the
//! exact raw bytes received - re-serializing parsed JSON can reorder fields
//! and silently invalidate every signature.

use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use super::errors::SignatureError;

/// Computes the checkout-request integrity signature.
///
/// Digest: `SHA256(reference ‖ amount_in_cents ‖ currency ‖ secret)`,
/// hex-encoded. Amounts are integer minor units; a negative value is
/// rejected rather than signed (the integer type already rules out the
/// classic majors-units-float mistake).
///
/// # Errors
///
/// - `InvalidAmount` - amount is negative
/// - `MissingSecret` - secret is empty (server misconfiguration, fail closed)
pub fn sign_checkout_request(
    reference: &str,
    amount_in_cents: i64,
    currency: &str,
    secret: &SecretString,
) -> Result<String, SignatureError> {
    if amount_in_cents < 0 {
        return Err(SignatureError::InvalidAmount(amount_in_cents));
    }
    let secret = secret.expose_secret();
    if secret.is_empty() {
        return Err(SignatureError::MissingSecret);
    }

    let mut hasher = Sha256::new();
    hasher.update(reference.as_bytes());
    hasher.update(amount_in_cents.to_string().as_bytes());
    hasher.update(currency.as_bytes());
    hasher.update(secret.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

/// Verifies a webhook notification signature.
///
/// Recomputes `SHA256(raw_body ‖ timestamp ‖ secret)` over the unmodified
/// request bytes and compares it to `received_hex` in constant time.
/// Any mismatch - including malformed hex or wrong length - yields
/// `Ok(false)`, never an error.
///
/// # Errors
///
/// - `MissingSecret` - secret is empty; verification must fail closed, not
///   open, when the server is misconfigured
pub fn verify_webhook_signature(
    raw_body: &[u8],
    timestamp: &str,
    received_hex: &str,
    secret: &SecretString,
) -> Result<bool, SignatureError> {
    let secret = secret.expose_secret();
    if secret.is_empty() {
        return Err(SignatureError::MissingSecret);
    }

    let mut hasher = Sha256::new();
    hasher.update(raw_body);
    hasher.update(timestamp.as_bytes());
    hasher.update(secret.as_bytes());
    let expected = hasher.finalize();

    let received = match hex::decode(received_hex) {
        Ok(bytes) => bytes,
        Err(_) => return Ok(false),
    };

    Ok(constant_time_compare(expected.as_slice(), &received))
}

/// Constant-time comparison; length is checked first, content never
/// short-circuits.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
