//! Order state machine.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a service order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderState {
    /// Provisioned, awaiting payment.
    Pending,
    /// Paid and usable.
    Active,
    /// Payment was declined or errored at the gateway.
    Declined,
    /// Voided by the gateway or cancelled by the merchant.
    Cancelled,
}

impl OrderState {
    /// Terminal states never transition again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderState::Declined | OrderState::Cancelled)
    }
}

impl std::fmt::Display for OrderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderState::Pending => "pending",
            OrderState::Active => "active",
            OrderState::Declined => "declined",
            OrderState::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Final disposition a gateway notification reports for a transaction.
///
/// This is the domain-side view; mapping from the gateway's status strings
/// lives with the webhook payload types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    Approved,
    Declined,
    Voided,
    Errored,
}

/// Result of asking the state machine about a payment outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Move to the new state.
    Enter(OrderState),
    /// No change; duplicates, downgrades and anything after a terminal
    /// state land here.
    Stay,
}

impl OrderState {
    /// Applies the monotonic transition policy.
    ///
    /// - `pending` moves to `active` (approved), `declined` (declined or
    ///   errored) or `cancelled` (voided).
    /// - `active` is absorbing except for a compensating void.
    /// - `declined` and `cancelled` are absorbing.
    ///
    /// Replayed notifications therefore always yield `Stay`, which is what
    /// makes webhook application idempotent.
    pub fn apply(&self, outcome: PaymentOutcome) -> Transition {
        use OrderState::*;
        use PaymentOutcome::*;

        match (self, outcome) {
            (Pending, Approved) => Transition::Enter(Active),
            (Pending, PaymentOutcome::Declined) | (Pending, Errored) => {
                Transition::Enter(OrderState::Declined)
            }
            (Pending, Voided) => Transition::Enter(Cancelled),
            (Active, Voided) => Transition::Enter(Cancelled),
            _ => Transition::Stay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ══════════════════════════════════════════════════════════════
    // Pending Transitions
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn pending_approved_activates() {
        assert_eq!(
            OrderState::Pending.apply(PaymentOutcome::Approved),
            Transition::Enter(OrderState::Active)
        );
    }

    #[test]
    fn pending_declined_declines() {
        assert_eq!(
            OrderState::Pending.apply(PaymentOutcome::Declined),
            Transition::Enter(OrderState::Declined)
        );
    }

    #[test]
    fn pending_errored_declines() {
        assert_eq!(
            OrderState::Pending.apply(PaymentOutcome::Errored),
            Transition::Enter(OrderState::Declined)
        );
    }

    #[test]
    fn pending_voided_cancels() {
        assert_eq!(
            OrderState::Pending.apply(PaymentOutcome::Voided),
            Transition::Enter(OrderState::Cancelled)
        );
    }

    // ══════════════════════════════════════════════════════════════
    // Monotonic Policy
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn active_absorbs_replayed_approval() {
        assert_eq!(OrderState::Active.apply(PaymentOutcome::Approved), Transition::Stay);
    }

    #[test]
    fn active_is_not_downgraded_by_decline() {
        assert_eq!(OrderState::Active.apply(PaymentOutcome::Declined), Transition::Stay);
        assert_eq!(OrderState::Active.apply(PaymentOutcome::Errored), Transition::Stay);
    }

    #[test]
    fn active_yields_to_compensating_void() {
        assert_eq!(
            OrderState::Active.apply(PaymentOutcome::Voided),
            Transition::Enter(OrderState::Cancelled)
        );
    }

    #[test]
    fn terminal_states_absorb_everything() {
        for state in [OrderState::Declined, OrderState::Cancelled] {
            for outcome in [
                PaymentOutcome::Approved,
                PaymentOutcome::Declined,
                PaymentOutcome::Voided,
                PaymentOutcome::Errored,
            ] {
                assert_eq!(state.apply(outcome), Transition::Stay);
            }
        }
    }

    #[test]
    fn terminal_flags() {
        assert!(!OrderState::Pending.is_terminal());
        assert!(!OrderState::Active.is_terminal());
        assert!(OrderState::Declined.is_terminal());
        assert!(OrderState::Cancelled.is_terminal());
    }

    #[test]
    fn state_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&OrderState::Active).unwrap(), "\"active\"");
    }
}
