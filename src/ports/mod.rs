//! Ports - async trait seams between the payment core and its collaborators.
//!
//! The catalog and order stores are owned elsewhere (database, another
//! service); the gateway is an external API. Adapters implement these traits,
//! the domain only ever sees the traits.

mod order_store;
mod payment_gateway;
mod service_catalog;

pub use order_store::{ApplyOutcome, OrderStore, PaymentRecord};
pub use payment_gateway::{CreateTransactionRequest, GatewayTransactionHandle, PaymentGateway};
pub use service_catalog::ServiceCatalog;
