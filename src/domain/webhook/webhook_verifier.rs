//! Stripe webhook signature verification.
//!
//! Verifies `Stripe-Signature` headers with HMAC-SHA256 and a timestamp
//! tolerance window. A [`VerifiedEvent`] can only be obtained from
//! [`StripeWebhookVerifier::verify`], so code that accepts one never sees an
//! unauthenticated payload.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::stripe_event::{StripeEvent, StripeEventType};
use super::webhook_errors::WebhookError;

/// Maximum allowed age for webhook events (5 minutes).
const MAX_EVENT_AGE_SECS: i64 = 300;

/// Maximum allowed clock skew for future events (1 minute).
const MAX_CLOCK_SKEW_SECS: i64 = 60;

/// Parsed components from the Stripe-Signature header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    /// Unix timestamp when the signature was generated.
    pub timestamp: i64,
    /// All v1 signatures; more than one is sent while a secret is rolled.
    pub v1_signatures: Vec<Vec<u8>>,
    /// Optional v0 legacy signature. Parsed, never trusted.
    pub v0_signature: Option<Vec<u8>>,
}

impl SignatureHeader {
    /// Parses a Stripe-Signature header string.
    ///
    /// Format: `t=<timestamp>,v1=<signature>[,v1=<signature>...][,v0=<legacy>]`
    ///
    /// # Errors
    ///
    /// Returns `WebhookError::ParseError` if the header format is invalid.
    pub fn parse(header: &str) -> Result<Self, WebhookError> {
        let mut timestamp: Option<i64> = None;
        let mut v1_signatures = Vec::new();
        let mut v0_signature: Option<Vec<u8>> = None;

        for part in header.split(',') {
            let (key, value) = part
                .trim()
                .split_once('=')
                .ok_or_else(|| WebhookError::ParseError("invalid header format".to_string()))?;

            match key {
                "t" => {
                    timestamp = Some(value.parse().map_err(|_| {
                        WebhookError::ParseError("invalid timestamp".to_string())
                    })?);
                }
                "v1" => {
                    v1_signatures.push(hex::decode(value).map_err(|_| {
                        WebhookError::ParseError("invalid v1 signature hex".to_string())
                    })?);
                }
                "v0" => {
                    v0_signature = Some(hex::decode(value).map_err(|_| {
                        WebhookError::ParseError("invalid v0 signature hex".to_string())
                    })?);
                }
                _ => {}
            }
        }

        let timestamp =
            timestamp.ok_or_else(|| WebhookError::ParseError("missing timestamp".to_string()))?;
        if v1_signatures.is_empty() {
            return Err(WebhookError::ParseError("missing v1 signature".to_string()));
        }

        Ok(SignatureHeader {
            timestamp,
            v1_signatures,
            v0_signature,
        })
    }
}

/// An event whose signature, timestamp and envelope have been checked.
#[derive(Debug, Clone)]
pub struct VerifiedEvent {
    event: StripeEvent,
}

impl VerifiedEvent {
    // Only the verifier may construct this.
    fn new(event: StripeEvent) -> Self {
        Self { event }
    }

    pub fn event(&self) -> &StripeEvent {
        &self.event
    }

    pub fn event_type(&self) -> StripeEventType {
        self.event.parsed_type()
    }

    pub fn id(&self) -> &str {
        &self.event.id
    }
}

/// Verifier for Stripe webhook signatures.
pub struct StripeWebhookVerifier {
    /// The endpoint signing secret (`whsec_...`).
    secret: SecretString,
    /// Reject events with `livemode: false`.
    require_livemode: bool,
}

impl StripeWebhookVerifier {
    /// Creates a new verifier with the given webhook secret.
    pub fn new(secret: SecretString) -> Self {
        Self {
            secret,
            require_livemode: false,
        }
    }

    /// Rejects test mode events when set.
    pub fn with_require_livemode(mut self, require: bool) -> Self {
        self.require_livemode = require;
        self
    }

    /// Verifies the webhook signature and parses the event.
    ///
    /// # Verification Steps
    ///
    /// 1. Parse the signature header
    /// 2. Validate timestamp is within acceptable range
    /// 3. Compare every v1 signature against the expected HMAC (constant time)
    /// 4. Parse the JSON payload into a StripeEvent
    /// 5. Enforce livemode if configured
    ///
    /// # Errors
    ///
    /// - `ParseError` - Malformed header or JSON payload
    /// - `TimestampOutOfRange` - Event is older than 5 minutes
    /// - `InvalidTimestamp` - Event timestamp is in the future
    /// - `InvalidSignature` - No v1 signature matched
    /// - `LivemodeMismatch` - Test mode event while livemode is required
    pub fn verify(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> Result<VerifiedEvent, WebhookError> {
        self.verify_at(payload, signature_header, chrono::Utc::now().timestamp())
    }

    /// Same as [`verify`](Self::verify) with an explicit clock reading.
    pub fn verify_at(
        &self,
        payload: &[u8],
        signature_header: &str,
        now: i64,
    ) -> Result<VerifiedEvent, WebhookError> {
        let header = SignatureHeader::parse(signature_header)?;

        validate_timestamp(header.timestamp, now)?;

        let expected = compute_signature(self.secret.expose_secret(), header.timestamp, payload);
        let matched = header
            .v1_signatures
            .iter()
            .any(|candidate| constant_time_compare(&expected, candidate));
        if !matched {
            return Err(WebhookError::InvalidSignature);
        }

        let event: StripeEvent = serde_json::from_slice(payload)
            .map_err(|e| WebhookError::ParseError(e.to_string()))?;

        if self.require_livemode && !event.is_live() {
            return Err(WebhookError::LivemodeMismatch);
        }

        Ok(VerifiedEvent::new(event))
    }
}

/// Validates that the timestamp is within acceptable bounds.
fn validate_timestamp(timestamp: i64, now: i64) -> Result<(), WebhookError> {
    let age = now - timestamp;

    if age > MAX_EVENT_AGE_SECS {
        return Err(WebhookError::TimestampOutOfRange);
    }

    if age < -MAX_CLOCK_SKEW_SECS {
        return Err(WebhookError::InvalidTimestamp);
    }

    Ok(())
}

/// HMAC-SHA256 over `"{timestamp}.{payload}"`.
fn compute_signature(secret: &str, timestamp: i64, payload: &[u8]) -> Vec<u8> {
    // HMAC accepts keys of any length, so construction cannot fail.
    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    mac.finalize().into_bytes().to_vec()
}

/// Builds a `Stripe-Signature` header value for `payload`.
///
/// Useful for signing local deliveries when exercising the endpoint.
pub fn sign_payload(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    format!(
        "t={},v1={}",
        timestamp,
        hex::encode(compute_signature(secret, timestamp, payload))
    )
}

/// Performs constant-time comparison of two byte slices.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
