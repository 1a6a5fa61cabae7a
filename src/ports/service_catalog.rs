//! ServiceCatalog port - read-only offering lookup.

use async_trait::async_trait;

use crate::domain::catalog::{ServiceCode, ServiceOffering};
use crate::domain::foundation::StoreError;

/// Read-only lookup of purchasable offerings.
///
/// The payment core derives every amount from this port; client-supplied
/// prices are advisory at best. Codes are already canonical
/// ([`ServiceCode`] normalizes case), so implementations compare exactly.
#[async_trait]
pub trait ServiceCatalog: Send + Sync {
    /// Finds an offering by canonical code. `None` when absent.
    async fn find_by_code(&self, code: &ServiceCode)
        -> Result<Option<ServiceOffering>, StoreError>;
}
