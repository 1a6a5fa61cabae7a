//! HTTP handlers for the payments endpoints.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::domain::payment::{
    CheckoutError, CheckoutRequest, CheckoutSessionBuilder, WebhookError, WebhookOutcome,
    WebhookProcessor, WebhookSignature,
};

use super::dto::{CheckoutRequestBody, CheckoutResponseBody, ErrorResponse, WebhookAckBody};

/// Header carrying the gateway's event signature material.
pub const EVENT_SIGNATURE_HEADER: &str = "X-Event-Signature";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state, cloned per request.
#[derive(Clone)]
pub struct PaymentsAppState {
    pub checkout: Arc<CheckoutSessionBuilder>,
    pub webhooks: Arc<WebhookProcessor>,
}

// ════════════════════════════════════════════════════════════════════════════════
// User Context (supplied by the edge auth layer)
// ════════════════════════════════════════════════════════════════════════════════

/// Authenticated user context extracted from request headers.
///
/// Authentication itself lives at the edge; by the time a request reaches
/// this service the identity headers are trusted. Requests without them are
/// rejected rather than treated as anonymous.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub email: String,
    pub full_name: String,
}

/// Rejection type for AuthenticatedUser extraction.
pub struct AuthenticationRequired;

impl IntoResponse for AuthenticationRequired {
    fn into_response(self) -> axum::response::Response {
        let error = ErrorResponse::new("AUTHENTICATION_REQUIRED", "authentication is required");
        (StatusCode::UNAUTHORIZED, Json(error)).into_response()
    }
}

impl<S> axum::extract::FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthenticationRequired;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let header = |name: &str| {
                parts
                    .headers
                    .get(name)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string)
            };

            let user_id = header("X-User-Id")
                .filter(|s| !s.is_empty())
                .ok_or(AuthenticationRequired)?;
            let email = header("X-User-Email")
                .filter(|s| !s.is_empty())
                .ok_or(AuthenticationRequired)?;
            let full_name = header("X-User-Name").unwrap_or_default();

            Ok(AuthenticatedUser {
                user_id,
                email,
                full_name,
            })
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Checkout
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/payments/checkout - Start a checkout for a catalog service
pub async fn create_checkout(
    State(state): State<PaymentsAppState>,
    user: AuthenticatedUser,
    Json(body): Json<CheckoutRequestBody>,
) -> Result<impl IntoResponse, PaymentsApiError> {
    // Zero is a legal advisory amount (the catalog allows free offerings);
    // whether it matches the price is the cross-check's call.
    if let Some(amount) = body.amount {
        if !amount.is_finite() || amount < 0.0 {
            return Err(PaymentsApiError::InvalidAmount);
        }
    }

    let session = state
        .checkout
        .build(CheckoutRequest {
            user_id: user.user_id,
            email: user.email,
            full_name: user.full_name,
            service_code: body.service_code,
            advisory_amount: body.amount,
        })
        .await?;

    let response = CheckoutResponseBody {
        checkout_url: session.checkout_url,
        reference: session.reference.into_string(),
        amount_in_cents: session.amount_in_cents,
        currency: session.currency.to_string(),
        transaction_id: session.transaction_id,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Webhook
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/payments/webhook - Handle gateway transaction notifications
///
/// Takes the body as raw bytes: the signature covers the exact wire bytes,
/// so this handler must never go through a JSON extractor.
pub async fn handle_gateway_webhook(
    State(state): State<PaymentsAppState>,
    headers: axum::http::HeaderMap,
    body: axum::body::Bytes,
) -> Result<impl IntoResponse, PaymentsApiError> {
    let raw_header = headers
        .get(EVENT_SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(WebhookError::MissingSignatureHeader)?;

    let signature = WebhookSignature::from_header_value(raw_header)?;

    let outcome = state.webhooks.process(&body, &signature).await?;

    let result = match outcome {
        WebhookOutcome::Applied { .. } => "applied",
        WebhookOutcome::AlreadyApplied { .. } => "already_applied",
        WebhookOutcome::Ignored(_) => "ignored",
        WebhookOutcome::Dropped(_) => "dropped",
    };

    Ok((
        StatusCode::OK,
        Json(WebhookAckBody {
            result: result.to_string(),
        }),
    ))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts domain errors to HTTP responses.
pub enum PaymentsApiError {
    /// Advisory amount failed basic validation before reaching the domain.
    InvalidAmount,
    Checkout(CheckoutError),
    Webhook(WebhookError),
}

impl From<CheckoutError> for PaymentsApiError {
    fn from(err: CheckoutError) -> Self {
        Self::Checkout(err)
    }
}

impl From<WebhookError> for PaymentsApiError {
    fn from(err: WebhookError) -> Self {
        Self::Webhook(err)
    }
}

fn webhook_error_code(err: &WebhookError) -> &'static str {
    match err {
        WebhookError::MissingSignatureHeader => "MISSING_SIGNATURE",
        WebhookError::MalformedSignatureHeader(_) => "MALFORMED_SIGNATURE_HEADER",
        WebhookError::InvalidSignature => "INVALID_SIGNATURE",
        WebhookError::MalformedPayload(_) => "MALFORMED_PAYLOAD",
        WebhookError::Misconfigured => "SERVER_MISCONFIGURED",
        WebhookError::Store(_) => "STORE_ERROR",
    }
}

/// Message safe to return to the webhook caller. Store details stay in logs.
fn webhook_public_message(err: &WebhookError) -> String {
    match err {
        WebhookError::Misconfigured => "server misconfigured".to_string(),
        WebhookError::Store(inner) => {
            if inner.is_retryable() {
                "temporary storage failure, retry later".to_string()
            } else {
                "internal error".to_string()
            }
        }
        other => other.to_string(),
    }
}

impl IntoResponse for PaymentsApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match &self {
            PaymentsApiError::InvalidAmount => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("INVALID_AMOUNT", "amount must be a non-negative number"),
            ),
            PaymentsApiError::Checkout(err) => {
                if err.status_code().is_server_error() {
                    tracing::error!(error = %err, "checkout failed");
                }
                (
                    err.status_code(),
                    ErrorResponse::new(err.error_code(), err.public_message()),
                )
            }
            PaymentsApiError::Webhook(err) => {
                if err.status_code().is_server_error() {
                    tracing::error!(error = %err, "webhook processing failed");
                }
                (
                    err.status_code(),
                    ErrorResponse::new(webhook_error_code(err), webhook_public_message(err)),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
