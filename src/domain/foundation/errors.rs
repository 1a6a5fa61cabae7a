//! Error types shared by the storage ports.

use thiserror::Error;

/// Failure reported by a catalog or order store adapter.
///
/// The distinction matters for webhook handling: `Unavailable` is the one
/// failure the gateway should retry (5xx), everything else is permanent.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The backing store could not be reached or timed out.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store returned data the domain layer cannot interpret.
    #[error("corrupted record: {0}")]
    Corrupted(String),
}

impl StoreError {
    /// Returns true if the operation may succeed on a later attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_is_retryable() {
        assert!(StoreError::Unavailable("timeout".into()).is_retryable());
    }

    #[test]
    fn corrupted_is_not_retryable() {
        assert!(!StoreError::Corrupted("bad state column".into()).is_retryable());
    }
}
