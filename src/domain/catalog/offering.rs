//! Service offering value objects.

use serde::{Deserialize, Serialize};

use super::errors::CatalogError;

/// Canonical identifier of a purchasable service.
///
/// Codes are stored uppercase and compared case-insensitively: callers supply
/// `lp_basic_01` or `LP_Basic_01` and both resolve to `LP_BASIC_01`. Only
/// `[A-Z0-9_]` is accepted so the code can be embedded in a payment reference
/// without ever containing the reference field separator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ServiceCode(String);

impl ServiceCode {
    /// Parses and normalizes a caller-supplied code.
    pub fn new(raw: &str) -> Result<Self, CatalogError> {
        let normalized = raw.trim().to_ascii_uppercase();
        if normalized.is_empty() {
            return Err(CatalogError::EmptyCode);
        }
        if !normalized
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_')
        {
            return Err(CatalogError::InvalidCode(raw.to_string()));
        }
        Ok(ServiceCode(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ServiceCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ServiceCode {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ServiceCode::new(&value)
    }
}

impl From<ServiceCode> for String {
    fn from(code: ServiceCode) -> Self {
        code.0
    }
}

/// ISO-style 3-letter currency code, uppercase canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency(String);

impl Currency {
    pub fn new(raw: &str) -> Result<Self, CatalogError> {
        let normalized = raw.trim().to_ascii_uppercase();
        if normalized.len() != 3 || !normalized.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(CatalogError::InvalidCurrency(raw.to_string()));
        }
        Ok(Currency(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Currency {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Currency::new(&value)
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.0
    }
}

/// A purchasable catalog entry.
///
/// `price` is in major currency units (pesos, not centavos) because that is
/// how the catalog stores it; everything past [`ServiceOffering::amount_in_cents`]
/// works in integer minor units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceOffering {
    pub code: ServiceCode,
    pub price: f64,
    pub currency: Currency,
    pub active: bool,
}

impl ServiceOffering {
    /// Converts the stored major-unit price to integer minor units.
    ///
    /// This is the single place the float boundary is crossed. Non-finite or
    /// negative prices are rejected rather than truncated.
    pub fn amount_in_cents(&self) -> Result<i64, CatalogError> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(CatalogError::InvalidPrice {
                code: self.code.to_string(),
                price: self.price,
            });
        }
        Ok((self.price * 100.0).round() as i64)
    }
}
