//! The service order record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::catalog::ServiceCode;

use super::state::OrderState;

/// A provisioned service awaiting (or past) payment.
///
/// One order exists per service record; the payment reference embeds the
/// service code so the webhook can find its way back here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceOrder {
    pub service_code: ServiceCode,
    pub state: OrderState,

    /// Gateway-assigned transaction id, recorded on the transition that
    /// finalized the order.
    pub gateway_transaction_id: Option<String>,

    /// When the gateway finalized the transaction.
    pub finalized_at: Option<DateTime<Utc>>,

    pub updated_at: DateTime<Utc>,
}

impl ServiceOrder {
    /// Creates a fresh pending order for a service.
    pub fn pending(service_code: ServiceCode) -> Self {
        Self {
            service_code,
            state: OrderState::Pending,
            gateway_transaction_id: None,
            finalized_at: None,
            updated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_order_is_pending_and_unpaid() {
        let order = ServiceOrder::pending(ServiceCode::new("LP_BASIC_01").unwrap());
        assert_eq!(order.state, OrderState::Pending);
        assert!(order.gateway_transaction_id.is_none());
        assert!(order.finalized_at.is_none());
    }
}
