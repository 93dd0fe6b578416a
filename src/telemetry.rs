//! Best-effort reporting of detected attacks.
//!
//! Detections can be mirrored to a [`TelemetrySink`] owned by the
//! surrounding application. Delivery is fire-and-forget: the
//! validation outcome is decided before the sink runs, and sink
//! failures are logged and swallowed, never surfaced to the caller.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Category of a detected attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttackCategory {
    /// Markup was altered by sanitization.
    Markup,
    /// A statement-shaped substring classified as SQL.
    Sql,
    /// A password policy violation.
    Password,
    /// A text format rule violation.
    Text,
}

impl std::fmt::Display for AttackCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Markup => "markup",
            Self::Sql => "sql",
            Self::Password => "password",
            Self::Text => "text",
        };
        f.write_str(name)
    }
}

/// A detection mirrored to the telemetry sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityEvent {
    /// Unique event ID.
    pub id: String,

    /// Attack category tag.
    pub category: AttackCategory,

    /// Timestamp when the detection occurred.
    pub timestamp: DateTime<Utc>,

    /// Free-form key/value details (original value, message, client
    /// metadata).
    pub details: HashMap<String, String>,
}

impl SecurityEvent {
    /// Create a new event for a category.
    pub fn new(category: AttackCategory) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            category,
            timestamp: Utc::now(),
            details: HashMap::new(),
        }
    }

    /// Attach a detail field.
    pub fn detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String, SinkError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Telemetry sink errors.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Sink error: {0}")]
    Other(String),
}

/// Destination for security events.
///
/// Implementations are constructed explicitly by the application with
/// their own configuration; the validation core never reads ambient
/// environment state.
#[async_trait]
pub trait TelemetrySink: Send + Sync {
    /// Record an event.
    async fn record(&self, event: &SecurityEvent) -> Result<(), SinkError>;

    /// Flush any pending writes.
    async fn flush(&self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Memory sink for testing.
#[derive(Clone, Default)]
pub struct MemorySink {
    events: Arc<tokio::sync::Mutex<Vec<SecurityEvent>>>,
}

impl MemorySink {
    /// Create a new memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded events.
    pub async fn events(&self) -> Vec<SecurityEvent> {
        self.events.lock().await.clone()
    }

    /// Clear all recorded events.
    pub async fn clear(&self) {
        self.events.lock().await.clear();
    }
}

#[async_trait]
impl TelemetrySink for MemorySink {
    async fn record(&self, event: &SecurityEvent) -> Result<(), SinkError> {
        self.events.lock().await.push(event.clone());
        Ok(())
    }
}

/// File sink writing one JSON object per line.
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Create a new file sink.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TelemetrySink for FileSink {
    async fn record(&self, event: &SecurityEvent) -> Result<(), SinkError> {
        let json = event.to_json()?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;

        file.write_all(json.as_bytes()).await?;
        file.write_all(b"\n").await?;
        file.flush().await?;

        Ok(())
    }
}

/// Sink that emits events through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TelemetrySink for TracingSink {
    async fn record(&self, event: &SecurityEvent) -> Result<(), SinkError> {
        tracing::warn!(
            id = %event.id,
            category = %event.category,
            details = ?event.details,
            "malicious input detected"
        );
        Ok(())
    }
}

/// Fire-and-forget dispatcher in front of a sink.
///
/// Reporting spawns onto the current runtime and returns immediately;
/// the already-decided validation outcome is never delayed or altered
/// by sink completion or failure.
#[derive(Clone)]
pub struct TelemetryReporter {
    sink: Arc<dyn TelemetrySink>,
}

impl TelemetryReporter {
    /// Create a reporter around a sink.
    pub fn new(sink: Arc<dyn TelemetrySink>) -> Self {
        Self { sink }
    }

    /// Report an event, best effort.
    pub fn report(&self, event: SecurityEvent) {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let sink = Arc::clone(&self.sink);
                handle.spawn(async move {
                    if let Err(e) = sink.record(&event).await {
                        tracing::warn!("telemetry sink write failed: {e}");
                    }
                });
            }
            Err(_) => {
                tracing::warn!(
                    category = %event.category,
                    "no async runtime available; telemetry event dropped"
                );
            }
        }
    }
}
