//! HTTP DTOs for the payments endpoints.
//!
//! These types define the JSON boundary; domain types never serialize
//! straight onto the wire.

use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to start a checkout for a catalog service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequestBody {
    /// Code of the service to purchase, e.g. `LP_BASIC_01`.
    pub service_code: String,

    /// Optional advisory amount in major units. Cross-checked against the
    /// catalog price; the server never charges this value.
    #[serde(default)]
    pub amount: Option<f64>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for a successfully created checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponseBody {
    /// Hosted checkout URL to redirect the customer to.
    pub checkout_url: String,

    /// Payment reference; the client polls the order by it after redirect.
    pub reference: String,

    pub amount_in_cents: i64,
    pub currency: String,

    /// Gateway transaction id, present only in API integration mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

/// Acknowledgement body for a processed webhook delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookAckBody {
    /// One of `applied`, `already_applied`, `ignored`, `dropped`.
    pub result: String,
}

/// Standard error response for API errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message, safe to show to a caller.
    pub error: String,

    /// Stable code for programmatic handling.
    pub code: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }
}
