//! HTTP adapter for the payments endpoints.
//!
//! Exposes the payment core via REST API:
//! - `POST /api/payments/checkout` - Start a checkout for a catalog service
//! - `POST /api/payments/webhook` - Handle gateway transaction notifications

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{AuthenticatedUser, PaymentsAppState, EVENT_SIGNATURE_HEADER};
pub use routes::{payments_router, payments_routes};
