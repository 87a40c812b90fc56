//! Verification requests and premium checkout
//!
//! Both are independent of the save flow; the backend owns the resulting state
//! changes, the form only mirrors them.

use shared::{
    validate_mpesa_phone, CheckoutRequest, PaymentProvider, PremiumPackage, StkPushRequest,
    VerificationStatus,
};

use super::ProfileFormController;
use crate::controllers::Navigation;
use crate::error::{ClientError, ClientResult};
use crate::external::MarketplaceApi;

/// What happened after a checkout was started
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// The UI must leave the app for this payment page
    Redirect(String),
    /// A payment prompt was pushed to the phone
    PushSent { checkout_request_id: Option<String> },
}

impl<A: MarketplaceApi> ProfileFormController<A> {
    pub async fn request_verification(&mut self) -> ClientResult<()> {
        let id = self.require_profile()?;

        if let Err(e) = self.api.request_verification().await {
            tracing::error!("Verification request for profile {} failed: {}", id, e);
            return Err(self.reject(e));
        }

        tracing::info!("Verification requested for profile {}", id);
        self.verification = VerificationStatus::Pending;
        self.feedback
            .success("Verification requested. We will review your business shortly");
        Ok(())
    }

    /// Start a premium purchase. `phone` is required for M-Pesa only.
    pub async fn initiate_checkout(
        &mut self,
        package_id: &str,
        provider: PaymentProvider,
        phone: Option<&str>,
    ) -> ClientResult<CheckoutOutcome> {
        self.require_profile()?;

        let Some(package) = PremiumPackage::find(package_id) else {
            return Err(self.reject(ClientError::validation(
                "package_id",
                "Please select a premium package",
            )));
        };

        if provider == PaymentProvider::Mpesa {
            return self.mpesa_checkout(&package, phone).await;
        }

        let request = CheckoutRequest {
            package_id: package.id.to_string(),
        };

        match self.api.create_checkout(provider, &request).await {
            Ok(session) => {
                tracing::info!("Redirecting to {:?} checkout for {}", provider, package.id);
                self.feedback
                    .navigate(Navigation::ExternalCheckout(session.checkout_url.clone()));
                Ok(CheckoutOutcome::Redirect(session.checkout_url))
            }
            Err(e) => {
                tracing::error!("Checkout for {} failed: {}", package.id, e);
                Err(self.reject(e))
            }
        }
    }

    async fn mpesa_checkout(
        &mut self,
        package: &PremiumPackage,
        phone: Option<&str>,
    ) -> ClientResult<CheckoutOutcome> {
        let phone_number = match validate_mpesa_phone(phone.unwrap_or_default()) {
            Ok(normalized) => normalized,
            Err(message) => {
                return Err(self.reject(ClientError::validation("phone_number", message)));
            }
        };

        let request = StkPushRequest {
            package_id: package.id.to_string(),
            phone_number,
        };

        match self.api.mpesa_stk_push(&request).await {
            Ok(response) => {
                self.feedback.info(
                    response
                        .message
                        .unwrap_or_else(|| "Check your phone and enter your M-Pesa PIN".to_string()),
                );
                Ok(CheckoutOutcome::PushSent {
                    checkout_request_id: response.checkout_request_id,
                })
            }
            Err(e) => {
                tracing::error!("M-Pesa STK push for {} failed: {}", package.id, e);
                Err(self.reject(e))
            }
        }
    }
}
