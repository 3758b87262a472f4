//! Mock payment provider for testing.
//!
//! Provides a configurable mock implementation of `PaymentProvider` for unit
//! and integration tests. Supports:
//! - Pre-configured customers and checkout sessions
//! - Error injection
//! - Call tracking

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::ports::{
    CheckoutSession, CheckoutSessionDetails, CreateCheckoutRequest, Customer, PaymentError,
    PaymentProvider,
};

/// Mock payment provider for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentProvider::new();
/// mock.add_customer(Customer { id: "cus_123".into(), email: Some("a@b.com".into()) });
/// mock.set_method_error("retrieve_customer", PaymentError::network("down"));
/// ```
#[derive(Default, Clone)]
pub struct MockPaymentProvider {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Customers by ID.
    customers: HashMap<String, Customer>,

    /// Customer IDs that exist but have been deleted.
    deleted_customers: HashSet<String>,

    /// Retrievable checkout sessions by ID.
    sessions: HashMap<String, CheckoutSessionDetails>,

    /// Session returned by the next `create_checkout_session` call.
    next_checkout: Option<CheckoutSession>,

    /// Number of sessions created so far.
    created_sessions: usize,

    /// Error to return on next call.
    next_error: Option<PaymentError>,

    /// Specific errors by method name.
    method_errors: HashMap<String, PaymentError>,

    /// Track method calls for assertions.
    call_log: Vec<MethodCall>,
}

/// Recorded method call for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodCall {
    pub method: String,
    pub args: Vec<String>,
}

impl MockPaymentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Add a customer to the "database".
    pub fn add_customer(&self, customer: Customer) {
        let id = customer.id.clone();
        self.inner.lock().unwrap().customers.insert(id, customer);
    }

    /// Mark a customer ID as deleted; retrieval yields `None`.
    pub fn add_deleted_customer(&self, customer_id: &str) {
        self.inner
            .lock()
            .unwrap()
            .deleted_customers
            .insert(customer_id.to_string());
    }

    /// Add a checkout session that `retrieve_checkout_session` will return.
    pub fn add_checkout_session(&self, session: CheckoutSessionDetails) {
        let id = session.id.clone();
        self.inner.lock().unwrap().sessions.insert(id, session);
    }

    /// Set the checkout session to return on the next create call.
    pub fn set_checkout_session(&self, session: CheckoutSession) {
        self.inner.lock().unwrap().next_checkout = Some(session);
    }

    /// Set an error to return on the next call to any method.
    pub fn set_error(&self, error: PaymentError) {
        self.inner.lock().unwrap().next_error = Some(error);
    }

    /// Set an error for a specific method.
    pub fn set_method_error(&self, method: &str, error: PaymentError) {
        self.inner
            .lock()
            .unwrap()
            .method_errors
            .insert(method.to_string(), error);
    }

    /// Clear all configured errors.
    pub fn clear_errors(&self) {
        let mut state = self.inner.lock().unwrap();
        state.next_error = None;
        state.method_errors.clear();
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Call Tracking
    // ════════════════════════════════════════════════════════════════════════════

    /// Get all recorded method calls.
    pub fn calls(&self) -> Vec<MethodCall> {
        self.inner.lock().unwrap().call_log.clone()
    }

    /// Check if a method was called.
    pub fn was_called(&self, method: &str) -> bool {
        self.call_count(method) > 0
    }

    /// Get count of calls to a method.
    pub fn call_count(&self, method: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .call_log
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Internal Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn record_call(&self, method: &str, args: Vec<String>) {
        self.inner.lock().unwrap().call_log.push(MethodCall {
            method: method.to_string(),
            args,
        });
    }

    fn check_error(&self, method: &str) -> Result<(), PaymentError> {
        let mut state = self.inner.lock().unwrap();

        if let Some(error) = state.method_errors.get(method) {
            return Err(error.clone());
        }

        // Global error is consumed by the first call that sees it.
        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        Ok(())
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn retrieve_customer(
        &self,
        customer_id: &str,
    ) -> Result<Option<Customer>, PaymentError> {
        self.record_call("retrieve_customer", vec![customer_id.to_string()]);
        self.check_error("retrieve_customer")?;

        let state = self.inner.lock().unwrap();
        match state.customers.get(customer_id) {
            Some(customer) => Ok(Some(customer.clone())),
            None if state.deleted_customers.contains(customer_id) => Ok(None),
            None => Err(PaymentError::not_found("Customer")),
        }
    }

    async fn retrieve_checkout_session(
        &self,
        session_id: &str,
    ) -> Result<CheckoutSessionDetails, PaymentError> {
        self.record_call("retrieve_checkout_session", vec![session_id.to_string()]);
        self.check_error("retrieve_checkout_session")?;

        let state = self.inner.lock().unwrap();
        state
            .sessions
            .get(session_id)
            .cloned()
            .ok_or_else(|| PaymentError::not_found("Checkout session"))
    }

    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        self.record_call(
            "create_checkout_session",
            vec![request.price_id, request.success_url, request.cancel_url],
        );
        self.check_error("create_checkout_session")?;

        let mut state = self.inner.lock().unwrap();
        state.created_sessions += 1;
        let sequence = state.created_sessions;

        let session = state.next_checkout.take().unwrap_or_else(|| {
            let id = format!("cs_mock_{}", sequence);
            CheckoutSession {
                url: format!("https://checkout.stripe.com/c/pay/{}", id),
                id,
            }
        });

        Ok(session)
    }
}
