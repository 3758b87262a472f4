//! VerifyCheckoutSessionHandler - Query handler for the post-checkout redirect.
//!
//! The browser returns from the hosted checkout page with a session id; the
//! session is resolved to an email and that email's stored status is
//! reported. Nothing is written here, so a webhook that has not landed yet
//! reads as inactive.

use std::sync::Arc;

use crate::domain::subscription::{SubscriberEmail, SubscriptionError};
use crate::ports::{PaymentProvider, SubscriptionStore};

/// Query by checkout session id.
#[derive(Debug, Clone, Default)]
pub struct VerifyCheckoutSessionQuery {
    pub session_id: Option<String>,
}

/// Status for the email behind a checkout session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyCheckoutSessionResult {
    pub active: bool,
    pub email: Option<SubscriberEmail>,
}

/// Handler for session-based status lookups.
pub struct VerifyCheckoutSessionHandler {
    store: Arc<dyn SubscriptionStore>,
    payment_provider: Arc<dyn PaymentProvider>,
}

impl VerifyCheckoutSessionHandler {
    pub fn new(
        store: Arc<dyn SubscriptionStore>,
        payment_provider: Arc<dyn PaymentProvider>,
    ) -> Self {
        Self {
            store,
            payment_provider,
        }
    }

    pub async fn handle(
        &self,
        query: VerifyCheckoutSessionQuery,
    ) -> Result<VerifyCheckoutSessionResult, SubscriptionError> {
        let session_id = query
            .session_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(SubscriptionError::MissingParameter("session_id"))?;

        let session = self
            .payment_provider
            .retrieve_checkout_session(session_id)
            .await
            .map_err(|e| SubscriptionError::provider(e.message))?;

        let Some(email) = session.resolved_email() else {
            return Ok(VerifyCheckoutSessionResult {
                active: false,
                email: None,
            });
        };

        let record = self
            .store
            .get(&email)
            .await
            .map_err(|e| SubscriptionError::storage(e.to_string()))?;

        Ok(VerifyCheckoutSessionResult {
            active: record.map(|r| r.active).unwrap_or(false),
            email: Some(email),
        })
    }
}
