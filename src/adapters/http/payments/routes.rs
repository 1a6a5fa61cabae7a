//! Axum router configuration for the payments endpoints.

use std::time::Duration;

use axum::{routing::post, Router};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{create_checkout, handle_gateway_webhook, PaymentsAppState};

/// Request timeout for the whole router.
///
/// Generous enough for a gateway round trip in API mode; the outbound client
/// carries its own tighter timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Create the payments API router.
///
/// # Routes
///
/// ## User Endpoints (identity headers required)
/// - `POST /checkout` - Start a checkout for a catalog service
///
/// ## Webhook Endpoints (no auth, signature verified)
/// - `POST /webhook` - Handle gateway transaction notifications
pub fn payments_routes() -> Router<PaymentsAppState> {
    Router::new()
        .route("/checkout", post(create_checkout))
        .route("/webhook", post(handle_gateway_webhook))
}

/// Create the complete payments router with ambient layers, suitable for
/// mounting at `/api/payments`.
pub fn payments_router() -> Router<PaymentsAppState> {
    Router::new()
        .nest("/api/payments", payments_routes())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use secrecy::SecretString;
    use url::Url;

    use crate::adapters::memory::{InMemoryCatalog, InMemoryOrderStore};
    use crate::domain::payment::{
        CheckoutSessionBuilder, CheckoutSettings, IntegrationMode, WebhookProcessor,
    };

    fn test_state() -> PaymentsAppState {
        let catalog = Arc::new(InMemoryCatalog::new());
        let orders = Arc::new(InMemoryOrderStore::new());
        let settings = CheckoutSettings {
            public_key: "pub_test".to_string(),
            transaction_integrity_secret: SecretString::new("txn_secret".to_string()),
            redirect_base_url: Url::parse("https://app.test/result").unwrap(),
            checkout_base_url: Url::parse("https://checkout.test/p/").unwrap(),
            integration_mode: IntegrationMode::Redirect,
        };
        PaymentsAppState {
            checkout: Arc::new(CheckoutSessionBuilder::new(catalog, None, settings)),
            webhooks: Arc::new(WebhookProcessor::new(
                orders,
                SecretString::new("events_secret".to_string()),
            )),
        }
    }

    #[test]
    fn payments_routes_creates_router() {
        let router = payments_routes();
        let _: Router<()> = router.with_state(test_state());
    }

    #[test]
    fn payments_router_creates_layered_router() {
        let router = payments_router();
        let _: Router<()> = router.with_state(test_state());
    }
}
