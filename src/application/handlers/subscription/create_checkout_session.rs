//! CreateCheckoutSessionHandler - Command handler that starts a hosted checkout.

use std::sync::Arc;

use crate::domain::subscription::SubscriptionError;
use crate::ports::{CheckoutSession, CreateCheckoutRequest, PaymentProvider};

/// Placeholder the provider substitutes with the real session id on redirect.
const SESSION_ID_PLACEHOLDER: &str = "{CHECKOUT_SESSION_ID}";

/// Where checkout sends the browser and what it sells.
#[derive(Debug, Clone)]
pub struct CheckoutSettings {
    /// Recurring price to subscribe to.
    pub price_id: String,
    /// Public base URL of the dashboard, without trailing slash.
    pub app_base_url: String,
}

impl CheckoutSettings {
    pub fn new(price_id: impl Into<String>, app_base_url: impl Into<String>) -> Self {
        Self {
            price_id: price_id.into(),
            app_base_url: app_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn success_url(&self) -> String {
        format!("{}/?session_id={}", self.app_base_url, SESSION_ID_PLACEHOLDER)
    }

    pub fn cancel_url(&self) -> String {
        format!("{}/", self.app_base_url)
    }
}

/// Handler for creating subscription checkout sessions.
pub struct CreateCheckoutSessionHandler {
    payment_provider: Arc<dyn PaymentProvider>,
    settings: CheckoutSettings,
}

impl CreateCheckoutSessionHandler {
    pub fn new(payment_provider: Arc<dyn PaymentProvider>, settings: CheckoutSettings) -> Self {
        Self {
            payment_provider,
            settings,
        }
    }

    pub async fn handle(&self) -> Result<CheckoutSession, SubscriptionError> {
        let request = CreateCheckoutRequest {
            price_id: self.settings.price_id.clone(),
            success_url: self.settings.success_url(),
            cancel_url: self.settings.cancel_url(),
        };

        let session = self
            .payment_provider
            .create_checkout_session(request)
            .await
            .map_err(|e| SubscriptionError::provider(e.message))?;

        tracing::info!(session_id = %session.id, "Checkout session created");
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::stripe::MockPaymentProvider;
    use crate::ports::PaymentError;

    #[test]
    fn settings_trim_trailing_slash_and_build_urls() {
        let settings = CheckoutSettings::new("price_surf", "https://surf.example/");

        assert_eq!(
            settings.success_url(),
            "https://surf.example/?session_id={CHECKOUT_SESSION_ID}"
        );
        assert_eq!(settings.cancel_url(), "https://surf.example/");
    }

    #[tokio::test]
    async fn creates_subscription_checkout_with_configured_price() {
        let provider = MockPaymentProvider::new();
        let handler = CreateCheckoutSessionHandler::new(
            Arc::new(provider.clone()),
            CheckoutSettings::new("price_surf", "https://surf.example"),
        );

        let session = handler.handle().await.unwrap();

        assert!(session.url.starts_with("https://checkout.stripe.com/"));
        let call = &provider.calls()[0];
        assert_eq!(call.method, "create_checkout_session");
        assert_eq!(
            call.args,
            vec![
                "price_surf".to_string(),
                "https://surf.example/?session_id={CHECKOUT_SESSION_ID}".to_string(),
                "https://surf.example/".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn provider_failure_is_reported() {
        let provider = MockPaymentProvider::new();
        provider.set_error(PaymentError::invalid_request("No such price: 'price_surf'"));
        let handler = CreateCheckoutSessionHandler::new(
            Arc::new(provider),
            CheckoutSettings::new("price_surf", "https://surf.example"),
        );

        let result = handler.handle().await;

        assert_eq!(
            result,
            Err(SubscriptionError::Provider("No such price: 'price_surf'".to_string()))
        );
    }
}
