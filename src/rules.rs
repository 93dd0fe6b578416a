//! Format rules for free-text fields.
//!
//! [`TextRule`] is a closed enumeration: each supported format check
//! is a variant carrying its own arguments, resolved at compile time
//! rather than looked up by name. Rules are pure predicates; a
//! malformed rule (bad pattern, empty scheme list) is a configuration
//! error, distinct from a content failure.

use crate::error::{Result, ValidationError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$").expect("email pattern must compile")
});

static URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*://[^\s/$.?#].[^\s]*$").expect("url pattern must compile")
});

/// A format check applied to a text field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum TextRule {
    /// Email address format.
    Email,

    /// URL format with a scheme allow list.
    Url { allowed_schemes: Vec<String> },

    /// Length bounds in characters. At least one bound must be set.
    Length {
        min: Option<usize>,
        max: Option<usize>,
    },

    /// Custom regex the whole input must match.
    Pattern { pattern: String },
}

impl TextRule {
    /// URL rule with the standard web schemes.
    pub fn web_url() -> Self {
        TextRule::Url {
            allowed_schemes: vec!["http".to_string(), "https".to_string()],
        }
    }

    /// Short rule name carried in failure values.
    pub fn name(&self) -> &'static str {
        match self {
            TextRule::Email => "email",
            TextRule::Url { .. } => "url",
            TextRule::Length { .. } => "length",
            TextRule::Pattern { .. } => "pattern",
        }
    }

    /// Validate a candidate against this rule.
    pub fn validate(&self, candidate: &str) -> Result<()> {
        match self {
            TextRule::Email => {
                if EMAIL_REGEX.is_match(candidate) {
                    Ok(())
                } else {
                    Err(self.failure("Input must be a valid email address".to_string()))
                }
            }
            TextRule::Url { allowed_schemes } => {
                if allowed_schemes.is_empty() {
                    return Err(ValidationError::Configuration(
                        "URL rule requires at least one allowed scheme".to_string(),
                    ));
                }
                if !URL_REGEX.is_match(candidate) {
                    return Err(self.failure("Input must be a valid URL".to_string()));
                }
                let scheme = candidate
                    .split_once("://")
                    .map(|(scheme, _)| scheme.to_ascii_lowercase())
                    .unwrap_or_default();
                if allowed_schemes
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(&scheme))
                {
                    Ok(())
                } else {
                    Err(self.failure(format!("URL scheme '{scheme}' is not allowed")))
                }
            }
            TextRule::Length { min, max } => {
                if min.is_none() && max.is_none() {
                    return Err(ValidationError::Configuration(
                        "Length rule requires a minimum or maximum bound".to_string(),
                    ));
                }
                let length = candidate.chars().count();
                match (min, max) {
                    (Some(min), _) if length < *min => Err(self.failure(format!(
                        "Input must be at least {min} characters"
                    ))),
                    (_, Some(max)) if length > *max => Err(self.failure(format!(
                        "Input must be at most {max} characters"
                    ))),
                    _ => Ok(()),
                }
            }
            TextRule::Pattern { pattern } => {
                let regex = Regex::new(pattern).map_err(|e| {
                    ValidationError::Configuration(format!("Invalid pattern: {e}"))
                })?;
                if regex.is_match(candidate) {
                    Ok(())
                } else {
                    Err(self.failure("Input does not match the required pattern".to_string()))
                }
            }
        }
    }

    fn failure(&self, message: String) -> ValidationError {
        ValidationError::Text {
            rule: self.name(),
            message,
        }
    }
}
