//! PaymentGateway port - outbound transaction creation.
//!
//! Used only in the API integration mode, where the backend creates the
//! transaction server-side and redirects the customer to the URL the
//! gateway returns. The redirect mode composes the URL locally and never
//! touches this port.

use async_trait::async_trait;

use crate::domain::payment::GatewayError;

/// Request body for the gateway's transaction-creation endpoint.
#[derive(Debug, Clone)]
pub struct CreateTransactionRequest {
    pub reference: String,
    pub amount_in_cents: i64,
    pub currency: String,
    pub customer_email: String,
    pub signature: String,
    pub redirect_url: String,
}

/// What the gateway hands back for a created transaction.
#[derive(Debug, Clone)]
pub struct GatewayTransactionHandle {
    pub id: String,
    pub checkout_url: String,
}

/// Port for the gateway's REST API.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Creates a transaction and returns its id and hosted checkout URL.
    ///
    /// Implementations must carry an explicit timeout and retry at most
    /// once, only on transport failures; a 4xx from the gateway is final.
    async fn create_transaction(
        &self,
        request: CreateTransactionRequest,
    ) -> Result<GatewayTransactionHandle, GatewayError>;
}
