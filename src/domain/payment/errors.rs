//! Error taxonomies for the payment flow.
//!
//! Expected conditions are explicit variants with HTTP status mapping and
//! retryability semantics; nothing here is signalled by panicking.

use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::catalog::CatalogError;
use crate::domain::foundation::StoreError;

/// Errors from the signature codec.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SignatureError {
    /// Amount is not a valid non-negative minor-unit value.
    #[error("invalid amount in cents: {0}")]
    InvalidAmount(i64),

    /// Signing/verification secret is empty or unset.
    ///
    /// A misconfigured server must fail closed; the public-facing message
    /// never states which secret is involved.
    #[error("integrity secret is not configured")]
    MissingSecret,
}

/// Errors from payment reference parsing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReferenceError {
    /// Reference does not have the `VTECH-CODE-USER-SUFFIX` shape.
    #[error("malformed reference: {0}")]
    Malformed(String),

    /// Reference is well-shaped but carries a foreign prefix.
    #[error("unrecognized reference prefix: {0}")]
    WrongPrefix(String),
}

/// Errors surfaced by checkout session creation.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Client-supplied service code failed validation.
    #[error("{0}")]
    InvalidServiceCode(CatalogError),

    /// No active offering exists for the code.
    #[error("service not found: {0}")]
    ServiceNotFound(String),

    /// Stored price failed validation (data corruption, not client error).
    #[error("{0}")]
    InvalidPrice(CatalogError),

    /// Advisory client amount disagrees with the catalog price.
    #[error("amount mismatch: expected {expected_cents} minor units, client sent {provided_cents}")]
    AmountMismatch {
        expected_cents: i64,
        provided_cents: i64,
    },

    /// Required gateway configuration is absent.
    #[error("payment configuration error")]
    Misconfigured,

    /// Catalog store could not be reached.
    #[error("catalog unavailable: {0}")]
    CatalogUnavailable(StoreError),

    /// The payment gateway rejected or failed the transaction request.
    #[error("gateway error: {0}")]
    Gateway(GatewayError),
}

impl CheckoutError {
    /// HTTP status for the error, per the response policy:
    /// client input 4xx, configuration 5xx, upstream 502/503.
    pub fn status_code(&self) -> StatusCode {
        match self {
            CheckoutError::InvalidServiceCode(_) => StatusCode::BAD_REQUEST,
            CheckoutError::ServiceNotFound(_) => StatusCode::NOT_FOUND,
            CheckoutError::AmountMismatch { .. } => StatusCode::BAD_REQUEST,
            // Corrupted catalog data is our fault, not the caller's.
            CheckoutError::InvalidPrice(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CheckoutError::Misconfigured => StatusCode::INTERNAL_SERVER_ERROR,
            CheckoutError::CatalogUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            CheckoutError::Gateway(err) => err.status_code(),
        }
    }

    /// Stable machine-readable code for the error body.
    pub fn error_code(&self) -> &'static str {
        match self {
            CheckoutError::InvalidServiceCode(_) => "INVALID_SERVICE_CODE",
            CheckoutError::ServiceNotFound(_) => "SERVICE_NOT_FOUND",
            CheckoutError::AmountMismatch { .. } => "AMOUNT_MISMATCH",
            CheckoutError::InvalidPrice(_) => "INVALID_CATALOG_PRICE",
            CheckoutError::Misconfigured => "SERVER_MISCONFIGURED",
            CheckoutError::CatalogUnavailable(_) => "CATALOG_UNAVAILABLE",
            CheckoutError::Gateway(_) => "GATEWAY_ERROR",
        }
    }

    /// Message safe to expose to the caller.
    ///
    /// Server-side faults collapse to generic text; details stay in logs.
    pub fn public_message(&self) -> String {
        match self {
            CheckoutError::InvalidServiceCode(_)
            | CheckoutError::ServiceNotFound(_)
            | CheckoutError::AmountMismatch { .. } => self.to_string(),
            CheckoutError::InvalidPrice(_) | CheckoutError::Misconfigured => {
                "server misconfigured".to_string()
            }
            CheckoutError::CatalogUnavailable(_) => "service temporarily unavailable".to_string(),
            CheckoutError::Gateway(_) => "payment gateway error, please retry later".to_string(),
        }
    }
}

/// Errors from the outbound gateway client.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// Transport-level failure (connect, timeout). Retried once.
    #[error("gateway transport failure: {0}")]
    Transport(String),

    /// Gateway answered with a non-2xx status. Never retried.
    #[error("gateway rejected request with status {status}")]
    Rejected { status: u16 },

    /// Gateway answered 2xx but the body was not the documented shape.
    #[error("unexpected gateway response: {0}")]
    InvalidResponse(String),
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Transport(_) => StatusCode::SERVICE_UNAVAILABLE,
            GatewayError::Rejected { .. } | GatewayError::InvalidResponse(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }
}

/// Errors from webhook processing.
///
/// Outcomes that are not errors (ignored events, unresolvable references)
/// live in [`super::webhook_processor::WebhookOutcome`]; this enum only
/// covers conditions that change the HTTP response away from 200.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Signature header absent.
    #[error("missing signature header")]
    MissingSignatureHeader,

    /// Signature header present but not the documented JSON shape.
    #[error("malformed signature header: {0}")]
    MalformedSignatureHeader(String),

    /// Recomputed digest does not match. Logged as a security event.
    #[error("invalid webhook signature")]
    InvalidSignature,

    /// Body is not valid JSON of the documented event shape.
    #[error("malformed webhook payload: {0}")]
    MalformedPayload(String),

    /// Events integrity secret is unset; fail closed.
    #[error("webhook configuration error")]
    Misconfigured,

    /// Order store failed transiently; the gateway should retry.
    #[error("order store error: {0}")]
    Store(StoreError),
}

impl WebhookError {
    /// Returns true if the gateway retrying delivery could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            WebhookError::Store(err) => err.is_retryable(),
            _ => false,
        }
    }

    /// Response policy: 403 for signature failures, 400 for malformed
    /// input, 5xx only for faults a retry can fix.
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::InvalidSignature => StatusCode::FORBIDDEN,
            WebhookError::MissingSignatureHeader
            | WebhookError::MalformedSignatureHeader(_)
            | WebhookError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            WebhookError::Misconfigured => StatusCode::INTERNAL_SERVER_ERROR,
            WebhookError::Store(err) => {
                if err.is_retryable() {
                    StatusCode::SERVICE_UNAVAILABLE
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            }
        }
    }
}
