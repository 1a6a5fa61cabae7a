//! OrderStore port - atomic conditional state transitions for orders.
//!
//! The order record is the only shared mutable resource in the payment flow.
//! Gateways retry webhook delivery, and duplicates can race a slow handler,
//! so the transition must be a single compare-and-set style operation inside
//! the store - never read-modify-write across the port boundary.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::catalog::ServiceCode;
use crate::domain::foundation::StoreError;
use crate::domain::order::{OrderState, PaymentOutcome, ServiceOrder};

/// The payment facts a verified webhook wants to record.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRecord {
    pub outcome: PaymentOutcome,
    pub transaction_id: String,
    pub finalized_at: DateTime<Utc>,
}

/// Result of a conditional transition attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The order moved to a new state.
    Applied(OrderState),

    /// Replay: this exact transaction already drove the order to its
    /// current state. Stored transaction id and timestamps are untouched.
    AlreadyApplied(OrderState),

    /// The monotonic policy refused the transition (e.g. a decline arriving
    /// after activation). Not an error; the event is acknowledged.
    Refused(OrderState),

    /// No order exists for the service code.
    NotFound,
}

/// Port for the externally-owned order/service records.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Reads the current order for a service.
    async fn find_by_service_code(
        &self,
        code: &ServiceCode,
    ) -> Result<Option<ServiceOrder>, StoreError>;

    /// Applies a payment outcome as one atomic conditional update.
    ///
    /// Implementations evaluate the [`OrderState::apply`] policy and write
    /// state, transaction id and `finalized_at` in the same critical section
    /// (a SQL adapter would express this as a conditional `UPDATE`). Calling
    /// twice with the same record must leave the row identical to the first
    /// call and report `AlreadyApplied`.
    async fn apply_payment(
        &self,
        code: &ServiceCode,
        record: PaymentRecord,
    ) -> Result<ApplyOutcome, StoreError>;
}
