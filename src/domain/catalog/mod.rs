//! Service catalog domain - purchasable offerings and their identifiers.
//!
//! The catalog itself is owned elsewhere (CRUD lives outside this crate);
//! this module defines the value objects the payment flow depends on and the
//! validation that keeps checkout amounts authoritative.

mod errors;
mod offering;

pub use errors::CatalogError;
pub use offering::{Currency, ServiceCode, ServiceOffering};
