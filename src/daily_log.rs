//! Append-only daily logs of option-chain observations.
//!
//! Each calendar day (in the configured timezone) has one object keyed
//! `YYYY-MM-DD.json` holding a pretty-printed JSON array of records in append
//! order. An append is a plain read-modify-write of the whole array:
//!
//! ```text
//! exists(key)? ── no ──► put(key, "[]")
//!      │                     │
//!      └──────── yes ────────┤
//!                            ▼
//!                  get(key) → decode → parse array
//!                            ▼
//!             id = last.id + 1, timestamp = now (UTC)
//!                            ▼
//!                  put(key, array + record)
//! ```
//!
//! Nothing is locked and no write is conditional. Two appenders working on
//! the same key at the same time can both read N entries and the later write
//! drops the earlier record. The same applies to two first appends of a day.

use crate::error::AppendError;
use crate::models::{EventFields, EventRecord};
use crate::store::{JSON_CONTENT_TYPE, ObjectStore};
use bytes::Bytes;
use chrono::{DateTime, SecondsFormat, Utc};
use chrono_tz::Tz;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Returns the log object key for the day containing `now` in `tz`.
#[must_use]
pub fn day_key(now: DateTime<Utc>, tz: Tz) -> String {
    format!("{}.json", now.with_timezone(&tz).format("%Y-%m-%d"))
}

/// Formats `now` as an RFC 3339 UTC instant with millisecond precision.
#[must_use]
pub fn format_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Decodes a stored object body to text.
///
/// # Errors
/// Returns [`AppendError::DataFormat`] if the body is not valid UTF-8.
pub fn decode_body(key: &str, body: &[u8]) -> Result<String, AppendError> {
    String::from_utf8(body.to_vec()).map_err(|e| AppendError::data_format(key, e))
}

/// Returns the id for a record appended after `entries`.
///
/// Only the last entry is consulted. Its `id` may be any integral JSON
/// number, including negative values and whole floats such as `5.0`. A
/// missing, non-numeric or fractional `id` counts as `0`.
#[must_use]
pub fn next_id(entries: &[Value]) -> i64 {
    entries
        .last()
        .and_then(|entry| entry.get("id"))
        .and_then(integral_id)
        .unwrap_or(0)
        .saturating_add(1)
}

fn integral_id(id: &Value) -> Option<i64> {
    id.as_i64().or_else(|| {
        id.as_f64()
            .filter(|f| f.is_finite() && f.fract() == 0.0)
            .map(|f| f as i64)
    })
}

/// Appends observation records to the daily logs in an object store.
#[derive(Clone)]
pub struct DailyLogAppender {
    store: Arc<dyn ObjectStore>,
    timezone: Tz,
}

impl std::fmt::Debug for DailyLogAppender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DailyLogAppender")
            .field("store", &self.store.backend_tag())
            .field("timezone", &self.timezone)
            .finish()
    }
}

impl DailyLogAppender {
    /// Creates an appender writing to `store`, splitting days in `timezone`.
    #[must_use]
    pub fn new(store: Arc<dyn ObjectStore>, timezone: Tz) -> Self {
        Self { store, timezone }
    }

    /// Returns the store handle.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn ObjectStore> {
        &self.store
    }

    /// Returns the timezone deciding day boundaries.
    #[must_use]
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Appends a record to today's log.
    ///
    /// # Errors
    /// See [`DailyLogAppender::append_at`].
    pub async fn append(&self, fields: EventFields) -> Result<EventRecord, AppendError> {
        self.append_at(fields, Utc::now()).await
    }

    /// Appends a record to the log of the day containing `now`.
    ///
    /// # Errors
    /// Returns [`AppendError::Storage`] if any store call fails and
    /// [`AppendError::DataFormat`] if the stored log is not a JSON array.
    /// Nothing is written after a failed read.
    pub async fn append_at(
        &self,
        fields: EventFields,
        now: DateTime<Utc>,
    ) -> Result<EventRecord, AppendError> {
        let key = day_key(now, self.timezone);

        if !self.store.exists(&key).await? {
            self.store
                .put(&key, Bytes::from_static(b"[]"), JSON_CONTENT_TYPE)
                .await?;
            info!("Created daily log {}", key);
        }

        let body = self.store.get(&key).await?;
        let text = decode_body(&key, &body)?;
        let mut entries = match serde_json::from_str::<Value>(&text) {
            Ok(Value::Array(entries)) => entries,
            Ok(_) => {
                warn!("Daily log {} is not a JSON array", key);
                return Err(AppendError::data_format(&key, "expected a JSON array"));
            }
            Err(e) => {
                warn!("Daily log {} is not valid JSON: {}", key, e);
                return Err(AppendError::data_format(&key, e));
            }
        };

        let record = EventRecord {
            id: next_id(&entries),
            timestamp: format_timestamp(now),
            fields,
        };
        debug!(
            key = %key,
            id = record.id,
            ticker = %record.fields.selected_ticker,
            "appending record"
        );

        let value = serde_json::to_value(&record).map_err(|e| AppendError::data_format(&key, e))?;
        entries.push(value);
        let body =
            serde_json::to_vec_pretty(&entries).map_err(|e| AppendError::data_format(&key, e))?;
        self.store
            .put(&key, Bytes::from(body), JSON_CONTENT_TYPE)
            .await?;

        info!(
            "Appended record {} to {} ({} entries)",
            record.id,
            key,
            entries.len()
        );
        Ok(record)
    }
}
