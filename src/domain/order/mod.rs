//! Service order domain - the record a verified payment transitions.
//!
//! An order starts `pending` when the service is provisioned and only a
//! verified gateway notification moves it forward. The transition policy is
//! monotonic: terminal states absorb everything, and `active` can only be
//! left by a compensating void.

mod order;
mod state;

pub use order::ServiceOrder;
pub use state::{OrderState, PaymentOutcome, Transition};
