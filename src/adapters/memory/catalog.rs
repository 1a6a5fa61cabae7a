//! In-memory catalog adapter.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::catalog::{ServiceCode, ServiceOffering};
use crate::domain::foundation::StoreError;
use crate::ports::ServiceCatalog;

/// Catalog backed by a map, seeded at startup from configuration.
///
/// Lookups clone the offering; the catalog is read-mostly and offerings are
/// small.
#[derive(Default)]
pub struct InMemoryCatalog {
    offerings: RwLock<HashMap<ServiceCode, ServiceOffering>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from a seed list. Later entries win on duplicate
    /// codes.
    pub fn seeded(offerings: impl IntoIterator<Item = ServiceOffering>) -> Self {
        let map = offerings
            .into_iter()
            .map(|offering| (offering.code.clone(), offering))
            .collect();
        Self {
            offerings: RwLock::new(map),
        }
    }

    pub async fn insert(&self, offering: ServiceOffering) {
        self.offerings
            .write()
            .await
            .insert(offering.code.clone(), offering);
    }

    pub async fn len(&self) -> usize {
        self.offerings.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.offerings.read().await.is_empty()
    }
}

#[async_trait]
impl ServiceCatalog for InMemoryCatalog {
    async fn find_by_code(
        &self,
        code: &ServiceCode,
    ) -> Result<Option<ServiceOffering>, StoreError> {
        Ok(self.offerings.read().await.get(code).cloned())
    }
}
