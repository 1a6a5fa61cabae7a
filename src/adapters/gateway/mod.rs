//! Outbound payment gateway adapter.

mod rest_client;

pub use rest_client::{GatewayClientConfig, RestGatewayClient};
