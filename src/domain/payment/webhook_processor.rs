//! Webhook event processing pipeline.
//!
//! Verify, then parse, then resolve, then apply - strictly in that order.
//! Nothing derived from the body is trusted (or even deserialized) before the
//! signature over the raw bytes checks out. Gateways redeliver events, so the
//! whole pipeline is idempotent: replays and late out-of-order statuses are
//! acknowledged without changing state.

use std::sync::Arc;

use secrecy::SecretString;
use serde::Deserialize;

use crate::domain::catalog::ServiceCode;
use crate::domain::order::OrderState;
use crate::ports::{ApplyOutcome, OrderStore, PaymentRecord};

use super::errors::{SignatureError, WebhookError};
use super::event::{GatewayEvent, TransactionStatus};
use super::reference::parse_service_code;
use super::signature::verify_webhook_signature;

/// Signature material from the `X-Event-Signature` header.
///
/// The header carries a small JSON document; the timestamp inside it is part
/// of the signed material, so it travels with the signature rather than as a
/// separate header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookSignature {
    pub signature: String,
    pub timestamp: String,
}

#[derive(Deserialize)]
struct RawSignatureHeader {
    signature: String,
    timestamp: RawTimestamp,
}

// Some gateway versions send the timestamp as a JSON number, others as a
// string. Both forms feed the digest as their decimal text.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Number(i64),
    Text(String),
}

impl WebhookSignature {
    /// Parses the JSON header value, e.g.
    /// `{"signature":"ab12...","timestamp":"1754049600"}`.
    pub fn from_header_value(raw: &str) -> Result<Self, WebhookError> {
        let parsed: RawSignatureHeader = serde_json::from_str(raw)
            .map_err(|e| WebhookError::MalformedSignatureHeader(e.to_string()))?;
        if parsed.signature.is_empty() {
            return Err(WebhookError::MalformedSignatureHeader(
                "empty signature field".to_string(),
            ));
        }
        let timestamp = match parsed.timestamp {
            RawTimestamp::Number(n) => n.to_string(),
            RawTimestamp::Text(s) => s,
        };
        Ok(Self {
            signature: parsed.signature,
            timestamp,
        })
    }
}

/// How a verified, well-formed event was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// The order moved to a new state.
    Applied {
        service_code: ServiceCode,
        state: OrderState,
    },

    /// Redelivery of an already-processed event; nothing changed.
    AlreadyApplied {
        service_code: ServiceCode,
        state: OrderState,
    },

    /// Event is authentic but carries nothing to act on (wrong event type,
    /// non-terminal status, or a transition the policy refuses).
    Ignored(&'static str),

    /// Reference could not be resolved to an order. Acknowledged so the
    /// gateway stops redelivering; a retry can never succeed.
    Dropped(&'static str),
}

/// Drives order transitions from gateway notifications.
pub struct WebhookProcessor {
    orders: Arc<dyn OrderStore>,
    events_integrity_secret: SecretString,
}

impl WebhookProcessor {
    pub fn new(orders: Arc<dyn OrderStore>, events_integrity_secret: SecretString) -> Self {
        Self {
            orders,
            events_integrity_secret,
        }
    }

    /// Processes one webhook delivery.
    ///
    /// `raw_body` must be the exact bytes received on the wire; the signature
    /// covers them and any re-serialization breaks verification.
    pub async fn process(
        &self,
        raw_body: &[u8],
        signature: &WebhookSignature,
    ) -> Result<WebhookOutcome, WebhookError> {
        let authentic = verify_webhook_signature(
            raw_body,
            &signature.timestamp,
            &signature.signature,
            &self.events_integrity_secret,
        )
        .map_err(|err| {
            // Verification only errors on a missing secret; mismatched
            // signatures come back as Ok(false).
            debug_assert!(matches!(err, SignatureError::MissingSecret));
            tracing::error!("webhook rejected: events integrity secret is not configured");
            WebhookError::Misconfigured
        })?;

        if !authentic {
            tracing::warn!(
                timestamp = %signature.timestamp,
                body_len = raw_body.len(),
                "webhook signature verification failed"
            );
            return Err(WebhookError::InvalidSignature);
        }

        let event = GatewayEvent::parse(raw_body)?;

        if !event.is_transaction_update() {
            tracing::debug!(event = %event.event, "ignoring non-transaction event");
            return Ok(WebhookOutcome::Ignored("event type not handled"));
        }

        let transaction = &event.data.transaction;
        let status = TransactionStatus::parse(&transaction.status);
        let Some(outcome) = status.outcome() else {
            tracing::debug!(
                transaction_id = %transaction.id,
                status = %transaction.status,
                "ignoring non-terminal transaction status"
            );
            return Ok(WebhookOutcome::Ignored("non-terminal status"));
        };

        let service_code = match parse_service_code(&transaction.reference) {
            Ok(code) => code,
            Err(err) => {
                // Foreign or malformed references can never resolve, so the
                // delivery is acknowledged rather than retried forever.
                tracing::warn!(
                    reference = %transaction.reference,
                    error = %err,
                    "webhook reference did not resolve, dropping event"
                );
                return Ok(WebhookOutcome::Dropped("unresolvable reference"));
            }
        };

        let record = PaymentRecord {
            outcome,
            transaction_id: transaction.id.clone(),
            finalized_at: transaction.finalized_at.unwrap_or_else(chrono::Utc::now),
        };

        match self
            .orders
            .apply_payment(&service_code, record)
            .await
            .map_err(WebhookError::Store)?
        {
            ApplyOutcome::Applied(state) => {
                tracing::info!(
                    service_code = %service_code,
                    transaction_id = %transaction.id,
                    state = ?state,
                    "payment outcome applied"
                );
                Ok(WebhookOutcome::Applied {
                    service_code,
                    state,
                })
            }
            ApplyOutcome::AlreadyApplied(state) => {
                tracing::info!(
                    service_code = %service_code,
                    transaction_id = %transaction.id,
                    "duplicate webhook delivery, no change"
                );
                Ok(WebhookOutcome::AlreadyApplied {
                    service_code,
                    state,
                })
            }
            ApplyOutcome::Refused(state) => {
                tracing::info!(
                    service_code = %service_code,
                    transaction_id = %transaction.id,
                    current_state = ?state,
                    "transition refused by order policy"
                );
                Ok(WebhookOutcome::Ignored("transition refused"))
            }
            ApplyOutcome::NotFound => {
                tracing::warn!(
                    service_code = %service_code,
                    "no order for webhook reference, dropping event"
                );
                Ok(WebhookOutcome::Dropped("no matching order"))
            }
        }
    }
}
