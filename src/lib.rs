//! # Textguard
//!
//! Policy-driven sanitization and validation for user-supplied text.
//!
//! Sits between a raw input string and the application that uses it:
//! markup is sanitized against an allow-list policy, and structured
//! content (embedded SQL statements, passwords, text formats) is
//! validated against explicit policies. Detections can be mirrored to
//! a pluggable telemetry sink, best effort.
//!
//! ## Features
//!
//! - ✅ **HTML Sanitization** - Allow-list tag/attribute policy over a
//!   real HTML sanitizer, safe by default
//! - ✅ **SQL Detection** - Keyword-bounded statement extraction plus
//!   lenient statement classification
//! - ✅ **Password Policies** - Composable thresholds merged over a
//!   secure baseline, deterministic fail-fast ordering
//! - ✅ **Text Rules** - Email, URL (scheme allow list), length, and
//!   pattern checks as a closed enum
//! - ✅ **Telemetry** - Fire-and-forget security events to a sink you
//!   own
//!
//! ## Quick Start
//!
//! ```rust
//! use textguard::{sanitize, validate, SanitizePolicy, ValidationPolicy};
//!
//! // Sanitize markup (an empty policy still applies safe defaults)
//! let clean = sanitize("<script>alert(1)</script><p>hi</p>", &SanitizePolicy::default());
//! assert_eq!(clean, "<p>hi</p>");
//!
//! // Detect embedded SQL
//! let policy = ValidationPolicy::new().with_sql(true);
//! assert!(validate("SELECT * FROM users;", &policy).is_err());
//! assert!(validate("hello world", &policy).is_ok());
//! ```
//!
//! ## Password Validation
//!
//! ```rust
//! use textguard::{validate, PasswordPolicy, ValidationPolicy};
//!
//! let policy = ValidationPolicy::new().with_password(PasswordPolicy::secure_default());
//! assert!(validate("Ab1!cdef", &policy).is_ok());
//! assert!(validate("abcd1234", &policy).is_err());
//!
//! // Caller thresholds take precedence over the baseline
//! let strict = ValidationPolicy::new().with_password(PasswordPolicy {
//!     min_length: Some(12),
//!     use_defaults: true,
//!     ..PasswordPolicy::default()
//! });
//! assert!(validate("Ab1!cdef", &strict).is_err());
//! ```
//!
//! ## Telemetry
//!
//! ```rust
//! use std::sync::Arc;
//! use textguard::{MemorySink, ValidationPolicy, Validator};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let sink = MemorySink::new();
//! let validator = Validator::with_sink(Arc::new(sink.clone()));
//!
//! let policy = ValidationPolicy::new().with_sql(true);
//! let _ = validator.validate("DROP TABLE users;", &policy);
//! # tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
//! # assert_eq!(sink.events().await.len(), 1);
//! # }
//! ```

pub mod classifier;
pub mod error;
pub mod password;
pub mod rules;
pub mod sanitizer;
pub mod sql;
pub mod telemetry;
pub mod validator;

pub use classifier::{classify, SchemaObject, StatementKind};
pub use error::{Result, ValidationError};
pub use password::PasswordPolicy;
pub use rules::TextRule;
pub use sanitizer::{sanitize, SanitizePolicy, Sanitizer};
pub use sql::{ExtractedStatement, SqlStatements};
pub use telemetry::{
    AttackCategory, FileSink, MemorySink, SecurityEvent, SinkError, TelemetryReporter,
    TelemetrySink, TracingSink,
};
pub use validator::{validate, ValidationPolicy, Validator};
