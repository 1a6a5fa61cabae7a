//! In-memory order store adapter.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::catalog::ServiceCode;
use crate::domain::foundation::StoreError;
use crate::domain::order::{ServiceOrder, Transition};
use crate::ports::{ApplyOutcome, OrderStore, PaymentRecord};

/// Order store backed by a map.
///
/// `apply_payment` evaluates the transition policy and writes the result
/// under one write lock, which gives this adapter the same atomicity a SQL
/// adapter gets from a conditional `UPDATE`.
#[derive(Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<HashMap<ServiceCode, ServiceOrder>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provisions a pending order, as the out-of-scope CRUD side would.
    pub async fn provision(&self, code: ServiceCode) {
        let order = ServiceOrder::pending(code.clone());
        self.orders.write().await.insert(code, order);
    }

    pub async fn insert(&self, order: ServiceOrder) {
        self.orders
            .write()
            .await
            .insert(order.service_code.clone(), order);
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn find_by_service_code(
        &self,
        code: &ServiceCode,
    ) -> Result<Option<ServiceOrder>, StoreError> {
        Ok(self.orders.read().await.get(code).cloned())
    }

    async fn apply_payment(
        &self,
        code: &ServiceCode,
        record: PaymentRecord,
    ) -> Result<ApplyOutcome, StoreError> {
        let mut orders = self.orders.write().await;
        let Some(order) = orders.get_mut(code) else {
            return Ok(ApplyOutcome::NotFound);
        };

        match order.state.apply(record.outcome) {
            Transition::Enter(next) => {
                order.state = next;
                order.gateway_transaction_id = Some(record.transaction_id);
                order.finalized_at = Some(record.finalized_at);
                order.updated_at = chrono::Utc::now();
                Ok(ApplyOutcome::Applied(next))
            }
            Transition::Stay => {
                // Same transaction id means this is a redelivery of the event
                // that finalized the order; anything else is a refused
                // transition (late decline, replay of a different attempt).
                if order.gateway_transaction_id.as_deref() == Some(record.transaction_id.as_str()) {
                    Ok(ApplyOutcome::AlreadyApplied(order.state))
                } else {
                    Ok(ApplyOutcome::Refused(order.state))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::domain::order::{OrderState, PaymentOutcome};

    fn code(s: &str) -> ServiceCode {
        ServiceCode::new(s).unwrap()
    }

    fn record(outcome: PaymentOutcome, txn: &str) -> PaymentRecord {
        PaymentRecord {
            outcome,
            transaction_id: txn.to_string(),
            finalized_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn approval_activates_pending_order() {
        let store = InMemoryOrderStore::new();
        store.provision(code("LP_BASIC_01")).await;

        let outcome = store
            .apply_payment(&code("LP_BASIC_01"), record(PaymentOutcome::Approved, "t1"))
            .await
            .unwrap();

        assert_eq!(outcome, ApplyOutcome::Applied(OrderState::Active));
        let order = store
            .find_by_service_code(&code("LP_BASIC_01"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(order.state, OrderState::Active);
        assert_eq!(order.gateway_transaction_id.as_deref(), Some("t1"));
        assert!(order.finalized_at.is_some());
    }

    #[tokio::test]
    async fn replay_of_same_transaction_is_already_applied_and_changes_nothing() {
        let store = InMemoryOrderStore::new();
        store.provision(code("LP_BASIC_01")).await;
        let rec = record(PaymentOutcome::Approved, "t1");

        store
            .apply_payment(&code("LP_BASIC_01"), rec.clone())
            .await
            .unwrap();
        let first = store
            .find_by_service_code(&code("LP_BASIC_01"))
            .await
            .unwrap()
            .unwrap();

        let outcome = store
            .apply_payment(&code("LP_BASIC_01"), rec)
            .await
            .unwrap();
        let second = store
            .find_by_service_code(&code("LP_BASIC_01"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(outcome, ApplyOutcome::AlreadyApplied(OrderState::Active));
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn late_decline_after_activation_is_refused() {
        let store = InMemoryOrderStore::new();
        store.provision(code("LP_BASIC_01")).await;
        store
            .apply_payment(&code("LP_BASIC_01"), record(PaymentOutcome::Approved, "t1"))
            .await
            .unwrap();

        let outcome = store
            .apply_payment(&code("LP_BASIC_01"), record(PaymentOutcome::Declined, "t2"))
            .await
            .unwrap();

        assert_eq!(outcome, ApplyOutcome::Refused(OrderState::Active));
    }

    #[tokio::test]
    async fn compensating_void_cancels_an_active_order() {
        let store = InMemoryOrderStore::new();
        store.provision(code("LP_BASIC_01")).await;
        store
            .apply_payment(&code("LP_BASIC_01"), record(PaymentOutcome::Approved, "t1"))
            .await
            .unwrap();

        let outcome = store
            .apply_payment(&code("LP_BASIC_01"), record(PaymentOutcome::Voided, "t1"))
            .await
            .unwrap();

        assert_eq!(outcome, ApplyOutcome::Applied(OrderState::Cancelled));
    }

    #[tokio::test]
    async fn unknown_code_is_not_found() {
        let store = InMemoryOrderStore::new();
        let outcome = store
            .apply_payment(&code("GHOST"), record(PaymentOutcome::Approved, "t1"))
            .await
            .unwrap();
        assert_eq!(outcome, ApplyOutcome::NotFound);
    }

    #[tokio::test]
    async fn concurrent_duplicates_apply_exactly_once() {
        use std::sync::Arc;

        let store = Arc::new(InMemoryOrderStore::new());
        store.provision(code("LP_BASIC_01")).await;

        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .apply_payment(&code("LP_BASIC_01"), record(PaymentOutcome::Approved, "t1"))
                    .await
                    .unwrap()
            }));
        }

        let mut applied = 0;
        for handle in handles {
            if matches!(handle.await.unwrap(), ApplyOutcome::Applied(_)) {
                applied += 1;
            }
        }
        assert_eq!(applied, 1);
    }
}
