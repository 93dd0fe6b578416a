use crate::classifier::StatementKind;
use crate::telemetry::AttackCategory;
use thiserror::Error;

/// Validation failure raised by the policy checks.
///
/// Each variant is owned by exactly one check. Content failures
/// (`Sql`, `Password`, `Text`) describe bad input; `Configuration`
/// describes a bad policy and is kept distinct so callers can tell
/// the two apart.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("SQL query of type {kind} detected: {statement}")]
    Sql {
        kind: StatementKind,
        statement: String,
    },

    #[error("{message}")]
    Password {
        rule: &'static str,
        message: String,
    },

    #[error("{message}")]
    Text {
        rule: &'static str,
        message: String,
    },

    #[error("Invalid validation configuration: {0}")]
    Configuration(String),
}

impl ValidationError {
    /// Attack category reported to the telemetry sink for this failure.
    ///
    /// `Configuration` errors are policy bugs, not attacks, and carry
    /// no category.
    pub fn category(&self) -> Option<AttackCategory> {
        match self {
            ValidationError::Sql { .. } => Some(AttackCategory::Sql),
            ValidationError::Password { .. } => Some(AttackCategory::Password),
            ValidationError::Text { .. } => Some(AttackCategory::Text),
            ValidationError::Configuration(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ValidationError>;
