//! REST client for the payment gateway's transaction API.
//!
//! Only used in API integration mode. The redirect mode never calls the
//! gateway from the backend at all.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::payment::GatewayError;
use crate::ports::{CreateTransactionRequest, GatewayTransactionHandle, PaymentGateway};

/// Settings for the outbound gateway client.
#[derive(Clone)]
pub struct GatewayClientConfig {
    /// Base URL of the gateway REST API, e.g. `https://sandbox.gateway.co`.
    pub api_base_url: Url,

    /// Base URL of the hosted checkout page, used when the gateway response
    /// carries a transaction id but no URL.
    pub checkout_base_url: Url,

    /// Private (server-side) API key, sent as a bearer token.
    pub private_key: SecretString,

    pub request_timeout: Duration,
}

/// Wire body for `POST /v1/transactions`.
#[derive(Debug, Serialize)]
struct TransactionBody<'a> {
    reference: &'a str,
    amount_in_cents: i64,
    currency: &'a str,
    customer_email: &'a str,
    signature: &'a str,
    redirect_url: &'a str,
}

#[derive(Debug, Deserialize)]
struct TransactionEnvelope {
    data: TransactionData,
}

#[derive(Debug, Deserialize)]
struct TransactionData {
    id: String,

    #[serde(default)]
    checkout_url: Option<String>,
}

/// Gateway REST adapter.
pub struct RestGatewayClient {
    config: GatewayClientConfig,
    http_client: reqwest::Client,
}

impl RestGatewayClient {
    /// Builds the client. Fails only if reqwest cannot assemble a client,
    /// which indicates a broken TLS environment rather than bad input.
    pub fn new(config: GatewayClientConfig) -> Result<Self, GatewayError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        Ok(Self {
            config,
            http_client,
        })
    }

    fn transactions_url(&self) -> Result<Url, GatewayError> {
        self.config
            .api_base_url
            .join("v1/transactions")
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))
    }

    async fn post_transaction(
        &self,
        url: Url,
        body: &TransactionBody<'_>,
    ) -> Result<reqwest::Response, reqwest::Error> {
        self.http_client
            .post(url)
            .bearer_auth(self.config.private_key.expose_secret())
            .json(body)
            .send()
            .await
    }

    fn checkout_url_for(&self, transaction_id: &str) -> String {
        let mut url = self.config.checkout_base_url.clone();
        url.query_pairs_mut().append_pair("id", transaction_id);
        url.to_string()
    }
}

#[async_trait]
impl PaymentGateway for RestGatewayClient {
    async fn create_transaction(
        &self,
        request: CreateTransactionRequest,
    ) -> Result<GatewayTransactionHandle, GatewayError> {
        let url = self.transactions_url()?;
        let body = TransactionBody {
            reference: &request.reference,
            amount_in_cents: request.amount_in_cents,
            currency: &request.currency,
            customer_email: &request.customer_email,
            signature: &request.signature,
            redirect_url: &request.redirect_url,
        };

        // One retry, transport failures only. A 4xx answer is final: the
        // gateway saw the request, so retrying cannot change the outcome and
        // risks a duplicate transaction.
        let response = match self.post_transaction(url.clone(), &body).await {
            Ok(response) => response,
            Err(first) => {
                tracing::warn!(
                    reference = %request.reference,
                    error = %first,
                    "gateway request failed, retrying once"
                );
                self.post_transaction(url, &body)
                    .await
                    .map_err(|e| GatewayError::Transport(e.to_string()))?
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                reference = %request.reference,
                status = status.as_u16(),
                "gateway rejected transaction creation"
            );
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
            });
        }

        let envelope: TransactionEnvelope = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        let checkout_url = envelope
            .data
            .checkout_url
            .unwrap_or_else(|| self.checkout_url_for(&envelope.data.id));

        tracing::info!(
            reference = %request.reference,
            transaction_id = %envelope.data.id,
            "gateway transaction created"
        );

        Ok(GatewayTransactionHandle {
            id: envelope.data.id,
            checkout_url,
        })
    }
}
