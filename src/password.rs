//! Password policy evaluation.
//!
//! A policy is a set of optional thresholds. With `use_defaults` set,
//! thresholds the caller left unset are filled from the secure
//! baseline; caller-supplied values always take precedence. Checks run
//! in a fixed order and fail fast on the first violation.

use crate::error::{Result, ValidationError};
use serde::{Deserialize, Serialize};

// Secure baseline applied when `use_defaults` is set.
const DEFAULT_MIN_LENGTH: usize = 8;
const DEFAULT_MIN_CLASS_COUNT: usize = 1;
const DEFAULT_MAX_SPACES: usize = 0;

/// Thresholds for password validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordPolicy {
    /// Minimum total length in characters.
    pub min_length: Option<usize>,

    /// Minimum count of uppercase letters.
    pub min_uppercase: Option<usize>,

    /// Minimum count of lowercase letters.
    pub min_lowercase: Option<usize>,

    /// Minimum count of digit characters.
    pub min_digits: Option<usize>,

    /// Minimum count of symbol characters (non-alphanumeric,
    /// non-space).
    pub min_symbols: Option<usize>,

    /// Maximum permitted count of space characters. `0` forbids
    /// spaces entirely.
    pub max_spaces: Option<usize>,

    /// Fill thresholds left unset from the secure baseline
    /// (length >= 8, >= 1 of each character class, no spaces).
    pub use_defaults: bool,
}

impl PasswordPolicy {
    /// Policy consisting solely of the secure baseline.
    pub fn secure_default() -> Self {
        Self {
            use_defaults: true,
            ..Self::default()
        }
    }

    fn resolve(&self) -> ResolvedPolicy {
        if self.use_defaults {
            ResolvedPolicy {
                min_length: self.min_length.unwrap_or(DEFAULT_MIN_LENGTH),
                min_uppercase: self.min_uppercase.unwrap_or(DEFAULT_MIN_CLASS_COUNT),
                min_lowercase: self.min_lowercase.unwrap_or(DEFAULT_MIN_CLASS_COUNT),
                min_digits: self.min_digits.unwrap_or(DEFAULT_MIN_CLASS_COUNT),
                min_symbols: self.min_symbols.unwrap_or(DEFAULT_MIN_CLASS_COUNT),
                max_spaces: Some(self.max_spaces.unwrap_or(DEFAULT_MAX_SPACES)),
            }
        } else {
            ResolvedPolicy {
                min_length: self.min_length.unwrap_or(0),
                min_uppercase: self.min_uppercase.unwrap_or(0),
                min_lowercase: self.min_lowercase.unwrap_or(0),
                min_digits: self.min_digits.unwrap_or(0),
                min_symbols: self.min_symbols.unwrap_or(0),
                max_spaces: self.max_spaces,
            }
        }
    }

    /// Evaluate a candidate against this policy.
    ///
    /// Checks run in the fixed order length, uppercase, lowercase,
    /// digits, symbols, spaces; the first violation is returned and no
    /// further checks run.
    pub fn evaluate(&self, candidate: &str) -> Result<()> {
        self.resolve().check(candidate)
    }
}

// Policy after the one-time merge with defaults. `max_spaces: None`
// means spaces are unrestricted.
struct ResolvedPolicy {
    min_length: usize,
    min_uppercase: usize,
    min_lowercase: usize,
    min_digits: usize,
    min_symbols: usize,
    max_spaces: Option<usize>,
}

impl ResolvedPolicy {
    fn check(&self, candidate: &str) -> Result<()> {
        let mut length = 0usize;
        let mut uppercase = 0usize;
        let mut lowercase = 0usize;
        let mut digits = 0usize;
        let mut symbols = 0usize;
        let mut spaces = 0usize;

        for c in candidate.chars() {
            length += 1;
            if c == ' ' {
                spaces += 1;
            } else if c.is_uppercase() {
                uppercase += 1;
            } else if c.is_lowercase() {
                lowercase += 1;
            } else if c.is_ascii_digit() {
                digits += 1;
            } else if !c.is_alphanumeric() {
                symbols += 1;
            }
        }

        if length < self.min_length {
            return Err(violation(
                "length",
                format!(
                    "Password must be at least {} characters long",
                    self.min_length
                ),
            ));
        }
        if uppercase < self.min_uppercase {
            return Err(violation(
                "uppercase",
                format!(
                    "Password must contain at least {} uppercase letter(s)",
                    self.min_uppercase
                ),
            ));
        }
        if lowercase < self.min_lowercase {
            return Err(violation(
                "lowercase",
                format!(
                    "Password must contain at least {} lowercase letter(s)",
                    self.min_lowercase
                ),
            ));
        }
        if digits < self.min_digits {
            return Err(violation(
                "digits",
                format!("Password must contain at least {} digit(s)", self.min_digits),
            ));
        }
        if symbols < self.min_symbols {
            return Err(violation(
                "symbols",
                format!(
                    "Password must contain at least {} symbol(s)",
                    self.min_symbols
                ),
            ));
        }
        if let Some(max_spaces) = self.max_spaces {
            if spaces > max_spaces {
                let message = if max_spaces == 0 {
                    "Password must not contain spaces".to_string()
                } else {
                    format!("Password must contain at most {max_spaces} space(s)")
                };
                return Err(violation("spaces", message));
            }
        }

        Ok(())
    }
}

fn violation(rule: &'static str, message: String) -> ValidationError {
    ValidationError::Password { rule, message }
}
