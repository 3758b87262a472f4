//! Timestamp value object for immutable points in time.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
///
/// Serialized as Unix epoch milliseconds so stored records stay readable by
/// anything that wrote `Date.now()`-style values into the same store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(#[serde(with = "chrono::serde::ts_milliseconds")] DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from Unix milliseconds.
    ///
    /// Returns `None` when the value is outside chrono's representable range.
    pub fn from_unix_millis(millis: i64) -> Option<Self> {
        Utc.timestamp_millis_opt(millis).single().map(Self)
    }
}
