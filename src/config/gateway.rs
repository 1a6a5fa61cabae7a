//! Payment gateway configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

use crate::domain::payment::IntegrationMode;

use super::error::ValidationError;

/// Payment gateway configuration.
///
/// The two integrity secrets are distinct on purpose: one signs outgoing
/// checkout parameters, the other verifies incoming webhook events. Neither
/// has a default; a deployment without them must fail at startup, not at the
/// first webhook.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Public (publishable) gateway key embedded in checkout URLs.
    pub public_key: String,

    /// Secret for signing checkout requests.
    pub transaction_integrity_secret: SecretString,

    /// Secret for verifying webhook event signatures.
    pub events_integrity_secret: SecretString,

    /// Where the gateway redirects the customer after payment.
    pub redirect_base_url: String,

    /// Hosted checkout page base URL.
    #[serde(default = "default_checkout_base_url")]
    pub checkout_base_url: String,

    /// Gateway REST API base URL (API integration mode only).
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Private API key, required only in API integration mode.
    #[serde(default)]
    pub private_key: Option<SecretString>,

    #[serde(default)]
    pub integration_mode: IntegrationMode,

    /// Timeout for outbound gateway requests, in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl GatewayConfig {
    pub fn redirect_base_url(&self) -> Result<Url, ValidationError> {
        parse_url("GATEWAY__REDIRECT_BASE_URL", &self.redirect_base_url)
    }

    pub fn checkout_base_url(&self) -> Result<Url, ValidationError> {
        parse_url("GATEWAY__CHECKOUT_BASE_URL", &self.checkout_base_url)
    }

    pub fn api_base_url(&self) -> Result<Url, ValidationError> {
        parse_url("GATEWAY__API_BASE_URL", &self.api_base_url)
    }

    /// Validate gateway configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.public_key.is_empty() {
            return Err(ValidationError::MissingRequired("GATEWAY__PUBLIC_KEY"));
        }
        if self.transaction_integrity_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired(
                "GATEWAY__TRANSACTION_INTEGRITY_SECRET",
            ));
        }
        if self.events_integrity_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired(
                "GATEWAY__EVENTS_INTEGRITY_SECRET",
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }

        self.redirect_base_url()?;
        self.checkout_base_url()?;
        self.api_base_url()?;

        if self.integration_mode == IntegrationMode::Api {
            match &self.private_key {
                Some(key) if !key.expose_secret().is_empty() => {}
                _ => return Err(ValidationError::ApiModeWithoutPrivateKey),
            }
        }

        Ok(())
    }
}

fn parse_url(field: &'static str, raw: &str) -> Result<Url, ValidationError> {
    Url::parse(raw).map_err(|e| ValidationError::InvalidUrl {
        field,
        reason: e.to_string(),
    })
}

fn default_checkout_base_url() -> String {
    "https://checkout.wompi.co/p/".to_string()
}

fn default_api_base_url() -> String {
    "https://sandbox.wompi.co/".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GatewayConfig {
        GatewayConfig {
            public_key: "pub_test_key".to_string(),
            transaction_integrity_secret: SecretString::new("txn_secret".to_string()),
            events_integrity_secret: SecretString::new("events_secret".to_string()),
            redirect_base_url: "https://app.example.com/payment-result".to_string(),
            checkout_base_url: default_checkout_base_url(),
            api_base_url: default_api_base_url(),
            private_key: None,
            integration_mode: IntegrationMode::Redirect,
            request_timeout_secs: 10,
        }
    }

    #[test]
    fn valid_redirect_config_passes() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn empty_events_secret_is_rejected() {
        let mut c = config();
        c.events_integrity_secret = SecretString::new(String::new());
        assert!(matches!(
            c.validate(),
            Err(ValidationError::MissingRequired(_))
        ));
    }

    #[test]
    fn empty_transaction_secret_is_rejected() {
        let mut c = config();
        c.transaction_integrity_secret = SecretString::new(String::new());
        assert!(c.validate().is_err());
    }

    #[test]
    fn bad_redirect_url_is_rejected() {
        let mut c = config();
        c.redirect_base_url = "not a url".to_string();
        assert!(matches!(
            c.validate(),
            Err(ValidationError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn api_mode_requires_private_key() {
        let mut c = config();
        c.integration_mode = IntegrationMode::Api;
        assert!(matches!(
            c.validate(),
            Err(ValidationError::ApiModeWithoutPrivateKey)
        ));

        c.private_key = Some(SecretString::new("prv_test_key".to_string()));
        assert!(c.validate().is_ok());
    }
}
