//! Checkout session construction.
//!
//! Pure computation over catalog data: no state is persisted here. The
//! authoritative amount always comes from the catalog; a client-supplied
//! amount is only ever cross-checked against it.

use std::sync::Arc;

use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

use crate::domain::catalog::{Currency, ServiceCode};
use crate::ports::{CreateTransactionRequest, PaymentGateway, ServiceCatalog};

use super::errors::{CheckoutError, SignatureError};
use super::reference::{build_reference, PaymentReference};
use super::signature::sign_checkout_request;

/// How checkout URLs are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationMode {
    /// Compose the hosted-checkout URL locally from signed parameters.
    #[default]
    Redirect,
    /// Create the transaction via the gateway REST API and use the
    /// checkout URL it returns.
    Api,
}

/// Gateway-facing settings the builder needs.
///
/// Constructed once at startup from validated configuration and passed in;
/// business logic never reads ambient environment state.
#[derive(Debug, Clone)]
pub struct CheckoutSettings {
    /// Public (publishable) gateway key, embedded in redirect URLs.
    pub public_key: String,

    /// Secret that signs checkout requests. Distinct from the events
    /// secret; each is reachable only from the code path that needs it.
    pub transaction_integrity_secret: SecretString,

    /// Where the gateway sends the customer after payment; the reference
    /// is appended as a query parameter so the client can poll by it.
    pub redirect_base_url: Url,

    /// Base URL of the gateway's hosted checkout page.
    pub checkout_base_url: Url,

    pub integration_mode: IntegrationMode,
}

/// Input for one checkout attempt. Identity fields come from the external
/// auth collaborator, never from the request body.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub user_id: String,
    pub email: String,
    pub full_name: String,
    pub service_code: String,

    /// Advisory amount in major units, if the client sent one. Cross-checked
    /// against the catalog price and never substituted for it.
    pub advisory_amount: Option<f64>,
}

/// A prepared checkout the client can be redirected to.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    pub checkout_url: String,
    pub reference: PaymentReference,
    pub amount_in_cents: i64,
    pub currency: Currency,

    /// Present only in API mode, where the gateway assigns an id upfront.
    pub transaction_id: Option<String>,
}

/// Builds signed checkout sessions for active catalog offerings.
pub struct CheckoutSessionBuilder {
    catalog: Arc<dyn ServiceCatalog>,
    gateway: Option<Arc<dyn PaymentGateway>>,
    settings: CheckoutSettings,
}

impl CheckoutSessionBuilder {
    pub fn new(
        catalog: Arc<dyn ServiceCatalog>,
        gateway: Option<Arc<dyn PaymentGateway>>,
        settings: CheckoutSettings,
    ) -> Self {
        Self {
            catalog,
            gateway,
            settings,
        }
    }

    /// Produces a checkout session for `{user, service}`.
    ///
    /// Order of operations matters for the failure contract: nothing is
    /// signed and no external call is made until the offering is resolved
    /// and the amount validated.
    pub async fn build(&self, request: CheckoutRequest) -> Result<CheckoutSession, CheckoutError> {
        let code = ServiceCode::new(&request.service_code)
            .map_err(CheckoutError::InvalidServiceCode)?;

        let offering = self
            .catalog
            .find_by_code(&code)
            .await
            .map_err(CheckoutError::CatalogUnavailable)?
            .ok_or_else(|| CheckoutError::ServiceNotFound(code.to_string()))?;

        // Inactive offerings are indistinguishable from absent ones to the
        // caller; do not leak which it was.
        if !offering.active {
            return Err(CheckoutError::ServiceNotFound(code.to_string()));
        }

        let amount_in_cents = offering
            .amount_in_cents()
            .map_err(CheckoutError::InvalidPrice)?;

        if let Some(advisory) = request.advisory_amount {
            let advisory_cents = if advisory.is_finite() {
                (advisory * 100.0).round() as i64
            } else {
                -1
            };
            if advisory_cents != amount_in_cents {
                return Err(CheckoutError::AmountMismatch {
                    expected_cents: amount_in_cents,
                    provided_cents: advisory_cents,
                });
            }
        }

        if self.settings.public_key.is_empty() {
            return Err(CheckoutError::Misconfigured);
        }

        let reference = build_reference(&code, &request.user_id);

        let signature = sign_checkout_request(
            reference.as_str(),
            amount_in_cents,
            offering.currency.as_str(),
            &self.settings.transaction_integrity_secret,
        )
        .map_err(|err| match err {
            SignatureError::MissingSecret => CheckoutError::Misconfigured,
            SignatureError::InvalidAmount(_) => {
                CheckoutError::InvalidPrice(crate::domain::catalog::CatalogError::InvalidPrice {
                    code: code.to_string(),
                    price: offering.price,
                })
            }
        })?;

        let completion_url = self.completion_url(&reference);

        match self.settings.integration_mode {
            IntegrationMode::Redirect => {
                let checkout_url = self.compose_redirect_url(
                    &reference,
                    amount_in_cents,
                    offering.currency.as_str(),
                    &signature,
                    &completion_url,
                    &request,
                );
                Ok(CheckoutSession {
                    checkout_url,
                    reference,
                    amount_in_cents,
                    currency: offering.currency,
                    transaction_id: None,
                })
            }
            IntegrationMode::Api => {
                let gateway = self.gateway.as_ref().ok_or(CheckoutError::Misconfigured)?;
                let handle = gateway
                    .create_transaction(CreateTransactionRequest {
                        reference: reference.as_str().to_string(),
                        amount_in_cents,
                        currency: offering.currency.as_str().to_string(),
                        customer_email: request.email.clone(),
                        signature,
                        redirect_url: completion_url,
                    })
                    .await
                    .map_err(CheckoutError::Gateway)?;
                Ok(CheckoutSession {
                    checkout_url: handle.checkout_url,
                    reference,
                    amount_in_cents,
                    currency: offering.currency,
                    transaction_id: Some(handle.id),
                })
            }
        }
    }

    /// Redirect-on-completion URL with the reference echoed back for
    /// client-side polling.
    fn completion_url(&self, reference: &PaymentReference) -> String {
        let mut url = self.settings.redirect_base_url.clone();
        url.query_pairs_mut()
            .append_pair("reference", reference.as_str());
        url.to_string()
    }

    fn compose_redirect_url(
        &self,
        reference: &PaymentReference,
        amount_in_cents: i64,
        currency: &str,
        signature: &str,
        completion_url: &str,
        request: &CheckoutRequest,
    ) -> String {
        let mut url = self.settings.checkout_base_url.clone();
        url.query_pairs_mut()
            .append_pair("public-key", &self.settings.public_key)
            .append_pair("currency", currency)
            .append_pair("amount-in-cents", &amount_in_cents.to_string())
            .append_pair("reference", reference.as_str())
            .append_pair("signature:integrity", signature)
            .append_pair("redirect-url", completion_url)
            .append_pair("customer-data:email", &request.email)
            .append_pair("customer-data:full-name", &request.full_name);
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    use crate::domain::catalog::ServiceOffering;
    use crate::domain::foundation::StoreError;
    use crate::domain::payment::GatewayError;
    use crate::ports::GatewayTransactionHandle;

    struct FixedCatalog {
        offering: Option<ServiceOffering>,
    }

    #[async_trait]
    impl ServiceCatalog for FixedCatalog {
        async fn find_by_code(
            &self,
            code: &ServiceCode,
        ) -> Result<Option<ServiceOffering>, StoreError> {
            Ok(self
                .offering
                .clone()
                .filter(|offering| &offering.code == code))
        }
    }

    struct CountingGateway {
        calls: AtomicU32,
        fail: bool,
    }

    impl CountingGateway {
        fn new() -> Self {
            Self {
                calls: AtomicU32::new(0),
                fail: false,
            }
        }
    }

    #[async_trait]
    impl PaymentGateway for CountingGateway {
        async fn create_transaction(
            &self,
            request: CreateTransactionRequest,
        ) -> Result<GatewayTransactionHandle, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(GatewayError::Rejected { status: 422 });
            }
            Ok(GatewayTransactionHandle {
                id: "txn-42".to_string(),
                checkout_url: format!("https://gateway.test/pay/{}", request.reference),
            })
        }
    }

    fn offering() -> ServiceOffering {
        ServiceOffering {
            code: ServiceCode::new("LP_BASIC_01").unwrap(),
            price: 50000.0,
            currency: Currency::new("COP").unwrap(),
            active: true,
        }
    }

    fn settings(mode: IntegrationMode) -> CheckoutSettings {
        CheckoutSettings {
            public_key: "pub_test_key".to_string(),
            transaction_integrity_secret: SecretString::new("txn_secret".to_string()),
            redirect_base_url: Url::parse("https://app.example.com/dashboard/payment-result")
                .unwrap(),
            checkout_base_url: Url::parse("https://checkout.gateway.test/p/").unwrap(),
            integration_mode: mode,
        }
    }

    fn request() -> CheckoutRequest {
        CheckoutRequest {
            user_id: "u123".to_string(),
            email: "buyer@example.com".to_string(),
            full_name: "Ada Buyer".to_string(),
            service_code: "lp_basic_01".to_string(),
            advisory_amount: None,
        }
    }

    fn builder(
        offering: Option<ServiceOffering>,
        gateway: Option<Arc<CountingGateway>>,
        mode: IntegrationMode,
    ) -> CheckoutSessionBuilder {
        CheckoutSessionBuilder::new(
            Arc::new(FixedCatalog { offering }),
            gateway.map(|g| g as Arc<dyn PaymentGateway>),
            settings(mode),
        )
    }

    // ══════════════════════════════════════════════════════════════
    // Redirect Mode
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn redirect_session_carries_signed_parameters() {
        let b = builder(Some(offering()), None, IntegrationMode::Redirect);

        let session = b.build(request()).await.unwrap();

        assert_eq!(session.amount_in_cents, 5_000_000);
        assert_eq!(session.currency.as_str(), "COP");
        assert!(session.transaction_id.is_none());

        let url = Url::parse(&session.checkout_url).unwrap();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let get = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
                .unwrap()
        };

        assert_eq!(get("public-key"), "pub_test_key");
        assert_eq!(get("currency"), "COP");
        assert_eq!(get("amount-in-cents"), "5000000");
        assert_eq!(get("reference"), session.reference.as_str());
        assert_eq!(get("signature:integrity").len(), 64);
        assert!(get("redirect-url").contains("reference="));
        assert_eq!(get("customer-data:email"), "buyer@example.com");
    }

    #[tokio::test]
    async fn amount_is_always_derived_from_catalog() {
        // Price authority: the advisory amount matching is the only thing
        // the client's number is used for.
        let b = builder(Some(offering()), None, IntegrationMode::Redirect);
        let mut req = request();
        req.advisory_amount = Some(50000.0);

        let session = b.build(req).await.unwrap();
        assert_eq!(session.amount_in_cents, 5_000_000);
    }

    #[tokio::test]
    async fn mismatched_advisory_amount_is_rejected() {
        let b = builder(Some(offering()), None, IntegrationMode::Redirect);
        let mut req = request();
        req.advisory_amount = Some(1.0);

        let err = b.build(req).await.unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::AmountMismatch {
                expected_cents: 5_000_000,
                provided_cents: 100
            }
        ));
    }

    #[tokio::test]
    async fn non_finite_advisory_amount_is_rejected() {
        let b = builder(Some(offering()), None, IntegrationMode::Redirect);
        let mut req = request();
        req.advisory_amount = Some(f64::NAN);

        let err = b.build(req).await.unwrap_err();
        assert!(matches!(err, CheckoutError::AmountMismatch { .. }));
    }

    #[tokio::test]
    async fn unknown_service_fails_without_signing_or_calling_out() {
        let gateway = Arc::new(CountingGateway::new());
        let b = builder(None, Some(gateway.clone()), IntegrationMode::Api);
        let mut req = request();
        req.service_code = "DOES_NOT_EXIST".to_string();

        let err = b.build(req).await.unwrap_err();

        assert!(matches!(err, CheckoutError::ServiceNotFound(_)));
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn inactive_service_reads_as_not_found() {
        let mut inactive = offering();
        inactive.active = false;
        let b = builder(Some(inactive), None, IntegrationMode::Redirect);

        let err = b.build(request()).await.unwrap_err();
        assert!(matches!(err, CheckoutError::ServiceNotFound(_)));
    }

    #[tokio::test]
    async fn invalid_service_code_is_a_client_error() {
        let b = builder(Some(offering()), None, IntegrationMode::Redirect);
        let mut req = request();
        req.service_code = "bad-code!".to_string();

        let err = b.build(req).await.unwrap_err();
        assert!(matches!(err, CheckoutError::InvalidServiceCode(_)));
    }

    #[tokio::test]
    async fn corrupted_price_is_rejected() {
        let mut corrupted = offering();
        corrupted.price = f64::NAN;
        let b = builder(Some(corrupted), None, IntegrationMode::Redirect);

        let err = b.build(request()).await.unwrap_err();
        assert!(matches!(err, CheckoutError::InvalidPrice(_)));
    }

    #[tokio::test]
    async fn empty_secret_is_a_configuration_error() {
        let mut s = settings(IntegrationMode::Redirect);
        s.transaction_integrity_secret = SecretString::new(String::new());
        let b = CheckoutSessionBuilder::new(
            Arc::new(FixedCatalog {
                offering: Some(offering()),
            }),
            None,
            s,
        );

        let err = b.build(request()).await.unwrap_err();
        assert!(matches!(err, CheckoutError::Misconfigured));
    }

    #[tokio::test]
    async fn references_are_unique_per_attempt() {
        let b = builder(Some(offering()), None, IntegrationMode::Redirect);
        let a = b.build(request()).await.unwrap();
        let c = b.build(request()).await.unwrap();
        assert_ne!(a.reference, c.reference);
    }

    // ══════════════════════════════════════════════════════════════
    // API Mode
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn api_mode_uses_gateway_checkout_url() {
        let gateway = Arc::new(CountingGateway::new());
        let b = builder(Some(offering()), Some(gateway.clone()), IntegrationMode::Api);

        let session = b.build(request()).await.unwrap();

        assert_eq!(session.transaction_id.as_deref(), Some("txn-42"));
        assert!(session.checkout_url.starts_with("https://gateway.test/pay/"));
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn api_mode_without_client_is_misconfigured() {
        let b = builder(Some(offering()), None, IntegrationMode::Api);
        let err = b.build(request()).await.unwrap_err();
        assert!(matches!(err, CheckoutError::Misconfigured));
    }

    #[tokio::test]
    async fn gateway_rejection_propagates() {
        let gateway = Arc::new(CountingGateway {
            calls: AtomicU32::new(0),
            fail: true,
        });
        let b = builder(Some(offering()), Some(gateway), IntegrationMode::Api);

        let err = b.build(request()).await.unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::Gateway(GatewayError::Rejected { status: 422 })
        ));
    }
}
