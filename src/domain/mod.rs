//! Domain layer - pure business logic behind the payment flow.
//!
//! Nothing in here performs I/O directly; storage and gateway access go
//! through the traits in [`crate::ports`].

pub mod catalog;
pub mod foundation;
pub mod order;
pub mod payment;
