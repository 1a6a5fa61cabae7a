//! Gateway webhook payload types.
//!
//! Parsed strictly AFTER signature verification; the raw bytes are what the
//! signature covers, and these types never feed back into it.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::order::PaymentOutcome;

use super::errors::WebhookError;

/// Event type the gateway sends on every transaction state change.
pub const TRANSACTION_UPDATED: &str = "transaction.updated";

/// A gateway notification envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayEvent {
    /// Event type, e.g. `transaction.updated` or `nequi_token.updated`.
    pub event: String,

    pub data: GatewayEventData,

    /// Gateway-side emission time (epoch seconds), informational only.
    #[serde(default)]
    pub timestamp: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GatewayEventData {
    pub transaction: GatewayTransaction,
}

/// Transaction snapshot inside a notification.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayTransaction {
    pub id: String,
    pub status: String,
    pub reference: String,

    #[serde(default)]
    pub amount_in_cents: Option<i64>,

    #[serde(default)]
    pub currency: Option<String>,

    #[serde(default)]
    pub customer_email: Option<String>,

    /// When the gateway finalized the transaction; absent on some event
    /// variants, in which case processing time is used instead.
    #[serde(default)]
    pub finalized_at: Option<DateTime<Utc>>,
}

impl GatewayEvent {
    /// Parses a raw body into an event.
    pub fn parse(raw_body: &[u8]) -> Result<Self, WebhookError> {
        serde_json::from_slice(raw_body).map_err(|e| WebhookError::MalformedPayload(e.to_string()))
    }

    /// Only transaction updates drive order transitions.
    pub fn is_transaction_update(&self) -> bool {
        self.event == TRANSACTION_UPDATED
    }
}

/// Transaction status as reported by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionStatus {
    Approved,
    Declined,
    Voided,
    Error,
    Pending,
    /// Forward compatibility: statuses this version does not know are
    /// acknowledged without side effects.
    Unknown(String),
}

impl TransactionStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "APPROVED" => TransactionStatus::Approved,
            "DECLINED" => TransactionStatus::Declined,
            "VOIDED" => TransactionStatus::Voided,
            "ERROR" => TransactionStatus::Error,
            "PENDING" => TransactionStatus::Pending,
            other => TransactionStatus::Unknown(other.to_string()),
        }
    }

    /// Maps a terminal gateway status to the domain outcome that drives the
    /// order state machine. Non-terminal and unknown statuses map to `None`
    /// and are acknowledged without a transition.
    pub fn outcome(&self) -> Option<PaymentOutcome> {
        match self {
            TransactionStatus::Approved => Some(PaymentOutcome::Approved),
            TransactionStatus::Declined => Some(PaymentOutcome::Declined),
            TransactionStatus::Voided => Some(PaymentOutcome::Voided),
            TransactionStatus::Error => Some(PaymentOutcome::Errored),
            TransactionStatus::Pending | TransactionStatus::Unknown(_) => None,
        }
    }
}
