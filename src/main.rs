use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::Router;
use tracing_subscriber::EnvFilter;

use vtech_payments::adapters::gateway::{GatewayClientConfig, RestGatewayClient};
use vtech_payments::adapters::http::{payments_router, PaymentsAppState};
use vtech_payments::adapters::memory::{InMemoryCatalog, InMemoryOrderStore};
use vtech_payments::config::AppConfig;
use vtech_payments::domain::payment::{
    CheckoutSessionBuilder, CheckoutSettings, IntegrationMode, WebhookProcessor,
};
use vtech_payments::ports::PaymentGateway;

#[tokio::main]
async fn main() {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {e}");
            std::process::exit(2);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone())),
        )
        .init();

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "invalid configuration");
        std::process::exit(2);
    }

    let state = match build_state(&config).await {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "failed to assemble application state");
            std::process::exit(2);
        }
    };

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(payments_router())
        .with_state(state);

    let addr = match config.server.socket_addr() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!(error = %e, "invalid bind address");
            std::process::exit(2);
        }
    };

    tracing::info!(%addr, "starting payments service");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, "failed to bind");
            std::process::exit(2);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}

async fn build_state(config: &AppConfig) -> Result<PaymentsAppState, Box<dyn std::error::Error>> {
    let offerings = config.catalog.load_offerings()?;
    tracing::info!(count = offerings.len(), "seeding catalog");
    let catalog = Arc::new(InMemoryCatalog::seeded(offerings));

    let orders = Arc::new(InMemoryOrderStore::new());

    let gateway_client: Option<Arc<dyn PaymentGateway>> =
        if config.gateway.integration_mode == IntegrationMode::Api {
            let client = RestGatewayClient::new(GatewayClientConfig {
                api_base_url: config.gateway.api_base_url()?,
                checkout_base_url: config.gateway.checkout_base_url()?,
                private_key: config
                    .gateway
                    .private_key
                    .clone()
                    .ok_or("API integration mode requires a private key")?,
                request_timeout: Duration::from_secs(config.gateway.request_timeout_secs),
            })?;
            Some(Arc::new(client))
        } else {
            None
        };

    let settings = CheckoutSettings {
        public_key: config.gateway.public_key.clone(),
        transaction_integrity_secret: config.gateway.transaction_integrity_secret.clone(),
        redirect_base_url: config.gateway.redirect_base_url()?,
        checkout_base_url: config.gateway.checkout_base_url()?,
        integration_mode: config.gateway.integration_mode,
    };

    let checkout = Arc::new(CheckoutSessionBuilder::new(
        catalog,
        gateway_client,
        settings,
    ));
    let webhooks = Arc::new(WebhookProcessor::new(
        orders,
        config.gateway.events_integrity_secret.clone(),
    ));

    Ok(PaymentsAppState { checkout, webhooks })
}
