//! Unified validation entry point.
//!
//! A [`ValidationPolicy`] selects any combination of text, password,
//! and SQL checks. Categories are evaluated in a fixed order (text,
//! password, sql) and the first failing category short-circuits the
//! rest. When a sink is attached, failures are mirrored to telemetry
//! before being returned; telemetry never masks the failure itself.

use crate::classifier::classify;
use crate::error::{Result, ValidationError};
use crate::password::PasswordPolicy;
use crate::rules::TextRule;
use crate::sanitizer::{self, SanitizePolicy};
use crate::sql::SqlStatements;
use crate::telemetry::{AttackCategory, SecurityEvent, TelemetryReporter, TelemetrySink};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Selection of checks to run against an input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationPolicy {
    /// Detect embedded SQL statements.
    pub sql: bool,

    /// Format rule for the field.
    pub text: Option<TextRule>,

    /// Password thresholds for the field.
    pub password: Option<PasswordPolicy>,
}

impl ValidationPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable SQL detection.
    pub fn with_sql(mut self, enable: bool) -> Self {
        self.sql = enable;
        self
    }

    /// Set the text format rule.
    pub fn with_text(mut self, rule: TextRule) -> Self {
        self.text = Some(rule);
        self
    }

    /// Set the password policy.
    pub fn with_password(mut self, policy: PasswordPolicy) -> Self {
        self.password = Some(policy);
        self
    }
}

/// Validation façade, optionally wired to a telemetry sink.
#[derive(Clone, Default)]
pub struct Validator {
    reporter: Option<TelemetryReporter>,
}

impl Validator {
    /// Validator without telemetry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validator that mirrors detections to `sink`.
    pub fn with_sink(sink: Arc<dyn TelemetrySink>) -> Self {
        Self {
            reporter: Some(TelemetryReporter::new(sink)),
        }
    }

    /// Run the checks selected by `policy` against `input`.
    ///
    /// Categories run in the order text, password, sql; the first
    /// failure is returned and later categories are skipped.
    pub fn validate(&self, input: &str, policy: &ValidationPolicy) -> Result<()> {
        if let Some(rule) = &policy.text {
            self.checked(rule.validate(input), input)?;
        }
        if let Some(password) = &policy.password {
            self.checked(password.evaluate(input), input)?;
        }
        if policy.sql {
            self.checked(self.check_sql(input), input)?;
        }
        Ok(())
    }

    /// Sanitize markup and report when the input was altered.
    ///
    /// Sanitization itself never fails; an input that changed under
    /// sanitization counts as a markup detection.
    pub fn sanitize(&self, input: &str, policy: &SanitizePolicy) -> String {
        let sanitized = sanitizer::sanitize(input, policy);
        if sanitized != input {
            if let Some(reporter) = &self.reporter {
                reporter.report(
                    SecurityEvent::new(AttackCategory::Markup)
                        .detail("input", input)
                        .detail("sanitized", sanitized.clone()),
                );
            }
        }
        sanitized
    }

    fn check_sql(&self, input: &str) -> Result<()> {
        for statement in SqlStatements::new(input) {
            let kind = classify(&statement.text);
            if kind.is_recognized() {
                return Err(ValidationError::Sql {
                    kind,
                    statement: statement.text,
                });
            }
        }
        Ok(())
    }

    fn checked(&self, result: Result<()>, input: &str) -> Result<()> {
        if let Err(error) = &result {
            self.report_failure(error, input);
        }
        result
    }

    fn report_failure(&self, error: &ValidationError, input: &str) {
        // Configuration errors carry no category and are not attacks.
        let Some(category) = error.category() else {
            return;
        };
        if let Some(reporter) = &self.reporter {
            reporter.report(
                SecurityEvent::new(category)
                    .detail("input", input)
                    .detail("message", error.to_string()),
            );
        }
    }
}

/// Validate `input` under `policy` without telemetry.
pub fn validate(input: &str, policy: &ValidationPolicy) -> Result<()> {
    Validator::new().validate(input, policy)
}
