//! Adapters - implementations of the port interfaces.
//!
//! - `gateway` - outbound payment gateway REST client
//! - `http` - inbound REST API
//! - `memory` - in-memory stand-ins for the externally-owned stores

pub mod gateway;
pub mod http;
pub mod memory;

pub use gateway::{GatewayClientConfig, RestGatewayClient};
pub use http::{payments_router, PaymentsAppState};
pub use memory::{InMemoryCatalog, InMemoryOrderStore};
