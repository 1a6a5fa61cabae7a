//! In-memory adapters for the storage ports.
//!
//! The catalog and order records are owned by a CRUD surface outside this
//! crate; these adapters stand in for it in the deployable binary and in
//! tests, honoring the same port contracts a database adapter would.

mod catalog;
mod orders;

pub use catalog::InMemoryCatalog;
pub use orders::InMemoryOrderStore;
