//! Shared building blocks used across domain modules.

mod errors;

pub use errors::StoreError;
