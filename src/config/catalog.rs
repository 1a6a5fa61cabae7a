//! Catalog seed configuration

use serde::Deserialize;

use crate::domain::catalog::ServiceOffering;

use super::error::ConfigError;

/// Catalog configuration.
///
/// The catalog is owned by a CRUD surface outside this service; in this
/// deployment it is seeded at startup from a JSON file so the checkout flow
/// has offerings to resolve against.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    /// Path to a JSON array of offerings. Optional; an absent path means an
    /// empty catalog, which is valid but makes every checkout a 404.
    #[serde(default)]
    pub seed_path: Option<String>,
}

impl CatalogConfig {
    /// Load the seed offerings, if a seed file is configured.
    pub fn load_offerings(&self) -> Result<Vec<ServiceOffering>, ConfigError> {
        let Some(path) = &self.seed_path else {
            return Ok(Vec::new());
        };
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::SeedFile(format!("{path}: {e}")))?;
        serde_json::from_str(&raw).map_err(|e| ConfigError::SeedFile(format!("{path}: {e}")))
    }
}
