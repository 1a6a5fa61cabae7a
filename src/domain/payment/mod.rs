//! Payment core: signed checkout sessions and webhook-driven transitions.

mod checkout;
mod errors;
mod event;
mod reference;
mod signature;
mod webhook_processor;

pub use checkout::{
    CheckoutRequest, CheckoutSession, CheckoutSessionBuilder, CheckoutSettings, IntegrationMode,
};
pub use errors::{CheckoutError, GatewayError, ReferenceError, SignatureError, WebhookError};
pub use event::{
    GatewayEvent, GatewayEventData, GatewayTransaction, TransactionStatus, TRANSACTION_UPDATED,
};
pub use reference::{build_reference, parse_service_code, PaymentReference, REFERENCE_PREFIX};
pub use signature::{sign_checkout_request, verify_webhook_signature};
pub use webhook_processor::{WebhookOutcome, WebhookProcessor, WebhookSignature};
