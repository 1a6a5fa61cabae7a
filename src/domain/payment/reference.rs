//! Payment reference construction and parsing.
//!
//! Canonical scheme: `VTECH-{CODE}-{USER}-{SUFFIX}`, dash-delimited, exactly
//! four fields. Dash is the separator because real service codes contain
//! underscores (`LP_BASIC_01`); [`ServiceCode`] validation guarantees a code
//! can never contain the separator. The suffix is 12 random hex characters,
//! so two checkouts in the same millisecond never collide the way
//! `Date.now()`-only references do.

use uuid::Uuid;

use crate::domain::catalog::ServiceCode;

use super::errors::ReferenceError;

/// Merchant prefix identifying references minted by this backend.
pub const REFERENCE_PREFIX: &str = "VTECH";

const SEPARATOR: char = '-';
const SUFFIX_LEN: usize = 12;
const USER_SEGMENT_MAX: usize = 8;

/// A minted payment reference.
///
/// Ephemeral: not persisted on creation, only echoed back by the gateway
/// and parsed again in the webhook handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReference(String);

impl PaymentReference {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for PaymentReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builds a reference for one checkout attempt.
///
/// The user segment keeps at most 8 alphanumeric characters of the caller's
/// id (enough to correlate in logs, never trusted for resolution); anything
/// else is stripped so the separator cannot leak in. An id with no
/// alphanumeric characters falls back to `anon`.
pub fn build_reference(code: &ServiceCode, user_id: &str) -> PaymentReference {
    let mut user_segment: String = user_id
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(USER_SEGMENT_MAX)
        .collect();
    if user_segment.is_empty() {
        user_segment.push_str("anon");
    }

    let suffix: String = Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(SUFFIX_LEN)
        .collect();

    PaymentReference(format!(
        "{REFERENCE_PREFIX}{SEPARATOR}{code}{SEPARATOR}{user_segment}{SEPARATOR}{suffix}"
    ))
}

/// Recovers the service code embedded in a reference.
///
/// Exact inverse of [`build_reference`]: four dash-delimited fields, our
/// prefix, a valid service code, a non-empty user segment and a fixed-width
/// hex suffix. The width check matters: it guarantees no valid reference is
/// a prefix of another, which keeps the delimiter-free checkout digest free
/// of cross-field ambiguity.
pub fn parse_service_code(reference: &str) -> Result<ServiceCode, ReferenceError> {
    let fields: Vec<&str> = reference.split(SEPARATOR).collect();
    if fields.len() != 4 {
        return Err(ReferenceError::Malformed(reference.to_string()));
    }
    if fields[0] != REFERENCE_PREFIX {
        return Err(ReferenceError::WrongPrefix(fields[0].to_string()));
    }
    if fields[2].is_empty() {
        return Err(ReferenceError::Malformed(reference.to_string()));
    }
    let suffix = fields[3];
    if suffix.len() != SUFFIX_LEN || !suffix.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ReferenceError::Malformed(reference.to_string()));
    }

    ServiceCode::new(fields[1]).map_err(|_| ReferenceError::Malformed(reference.to_string()))
}
