//! HandlePaymentWebhookHandler - Command handler for provider webhook deliveries.
//!
//! Verification happens first and produces a `VerifiedEvent`; only
//! `dispatch` touches the store, and it only accepts verified events.

use std::sync::Arc;

use crate::domain::foundation::Timestamp;
use crate::domain::subscription::{SubscriberEmail, SubscriptionRecord};
use crate::domain::webhook::{
    CheckoutSessionObject, StripeEventType, StripeWebhookVerifier, SubscriptionObject,
    VerifiedEvent, WebhookError,
};
use crate::ports::{PaymentProvider, SubscriptionStore};

/// Command to handle a payment webhook.
#[derive(Debug, Clone)]
pub struct HandlePaymentWebhookCommand {
    /// Raw webhook payload, exactly as received.
    pub payload: Vec<u8>,
    /// `Stripe-Signature` header, if present.
    pub signature: Option<String>,
}

/// Result of webhook processing. Every variant is acknowledged with 200.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// A record was written.
    Recorded { email: SubscriberEmail, active: bool },
    /// Relevant event, but no email could be resolved; nothing written.
    NoEmail,
    /// Event type the gate does not act on.
    Ignored { event_type: String },
}

/// Handler for processing payment provider webhooks.
pub struct HandlePaymentWebhookHandler {
    verifier: Arc<StripeWebhookVerifier>,
    store: Arc<dyn SubscriptionStore>,
    payment_provider: Arc<dyn PaymentProvider>,
}

impl HandlePaymentWebhookHandler {
    pub fn new(
        verifier: Arc<StripeWebhookVerifier>,
        store: Arc<dyn SubscriptionStore>,
        payment_provider: Arc<dyn PaymentProvider>,
    ) -> Self {
        Self {
            verifier,
            store,
            payment_provider,
        }
    }

    pub async fn handle(
        &self,
        cmd: HandlePaymentWebhookCommand,
    ) -> Result<WebhookOutcome, WebhookError> {
        let signature = cmd.signature.ok_or(WebhookError::MissingSignature)?;
        let event = self.verifier.verify(&cmd.payload, &signature)?;
        self.dispatch(event).await
    }

    /// Applies an authenticated event to the store.
    pub async fn dispatch(&self, event: VerifiedEvent) -> Result<WebhookOutcome, WebhookError> {
        let event_type = event.event_type();
        tracing::debug!(
            event_id = %event.id(),
            event_type = %event.event().event_type,
            "Dispatching webhook event"
        );

        match event_type {
            StripeEventType::CheckoutSessionCompleted => {
                self.handle_checkout_completed(&event).await
            }
            StripeEventType::CustomerSubscriptionCreated
            | StripeEventType::CustomerSubscriptionUpdated => {
                self.handle_subscription_changed(&event).await
            }
            StripeEventType::CustomerSubscriptionDeleted => {
                self.handle_subscription_deleted(&event).await
            }
            StripeEventType::Unknown => Ok(WebhookOutcome::Ignored {
                event_type: event.event().event_type.clone(),
            }),
        }
    }

    async fn handle_checkout_completed(
        &self,
        event: &VerifiedEvent,
    ) -> Result<WebhookOutcome, WebhookError> {
        let session: CheckoutSessionObject = event
            .event()
            .deserialize_object()
            .map_err(|e| WebhookError::InvalidEventObject(e.to_string()))?;

        let Some(email) = session.email() else {
            tracing::info!(event_id = %event.id(), "Checkout completed without an email");
            return Ok(WebhookOutcome::NoEmail);
        };

        self.write(SubscriptionRecord::checkout_completed(email, Timestamp::now()))
            .await
    }

    async fn handle_subscription_changed(
        &self,
        event: &VerifiedEvent,
    ) -> Result<WebhookOutcome, WebhookError> {
        let subscription = Self::subscription_object(event)?;

        let Some(email) = self.customer_email(event, &subscription).await? else {
            return Ok(WebhookOutcome::NoEmail);
        };

        self.write(SubscriptionRecord::from_lifecycle(
            email,
            &subscription.lifecycle(),
            Timestamp::now(),
        ))
        .await
    }

    async fn handle_subscription_deleted(
        &self,
        event: &VerifiedEvent,
    ) -> Result<WebhookOutcome, WebhookError> {
        let subscription = Self::subscription_object(event)?;

        let Some(email) = self.customer_email(event, &subscription).await? else {
            return Ok(WebhookOutcome::NoEmail);
        };

        self.write(SubscriptionRecord::subscription_deleted(email, Timestamp::now()))
            .await
    }

    fn subscription_object(event: &VerifiedEvent) -> Result<SubscriptionObject, WebhookError> {
        event
            .event()
            .deserialize_object()
            .map_err(|e| WebhookError::InvalidEventObject(e.to_string()))
    }

    /// Resolves the subscription's customer to an email via the provider.
    ///
    /// A deleted customer, or one without an email, is `None`. An unknown
    /// customer id is a provider error so the delivery is retried.
    async fn customer_email(
        &self,
        event: &VerifiedEvent,
        subscription: &SubscriptionObject,
    ) -> Result<Option<SubscriberEmail>, WebhookError> {
        let customer_id = subscription.customer.id();

        let customer = self
            .payment_provider
            .retrieve_customer(customer_id)
            .await
            .map_err(|e| WebhookError::Provider(e.message))?;

        let email = customer.and_then(|c| SubscriberEmail::from_optional(c.email.as_deref()));
        if email.is_none() {
            tracing::info!(
                event_id = %event.id(),
                customer_id = %customer_id,
                "Subscription customer has no resolvable email"
            );
        }
        Ok(email)
    }

    async fn write(&self, record: SubscriptionRecord) -> Result<WebhookOutcome, WebhookError> {
        self.store
            .set(&record)
            .await
            .map_err(|e| WebhookError::Storage(e.to_string()))?;

        tracing::info!(
            email = %record.email,
            active = record.active,
            status = record.status.as_deref().unwrap_or(""),
            "Subscription status recorded"
        );

        Ok(WebhookOutcome::Recorded {
            email: record.email,
            active: record.active,
        })
    }
}
