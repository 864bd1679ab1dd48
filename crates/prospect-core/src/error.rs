//! Core domain errors (parsing and validation).
//!
//! These are bounded and stable: core errors represent domain/refusal states,
//! not library implementation details. Authorization outcomes are not errors
//! at this layer - the scoping rule returns filtered sets, never failures.

use thiserror::Error;

/// Invalid record identifier.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidId {
    #[error("organisation id `{raw}` is invalid: {reason}")]
    Organisation { raw: String, reason: String },
    #[error("user id `{raw}` is invalid: {reason}")]
    User { raw: String, reason: String },
    #[error("agent id `{raw}` is invalid: {reason}")]
    Agent { raw: String, reason: String },
    #[error("lead id `{raw}` is invalid: {reason}")]
    Lead { raw: String, reason: String },
    #[error("category id `{raw}` is invalid: {reason}")]
    Category { raw: String, reason: String },
}

/// Invalid delivery address.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("email address `{raw}` is invalid: {reason}")]
pub struct InvalidEmail {
    pub raw: String,
    pub reason: String,
}

/// Generic range violation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{field} value {value} out of range {min}..={max}")]
pub struct RangeError {
    pub field: &'static str,
    pub value: i64,
    pub min: i64,
    pub max: i64,
}

/// Field-level input rejection. Surfaced to the caller with the offending
/// field so form-style consumers can attach it to the right input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Canonical error enum for the core capability.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CoreError {
    #[error(transparent)]
    InvalidId(#[from] InvalidId),
    #[error(transparent)]
    InvalidEmail(#[from] InvalidEmail),
    #[error(transparent)]
    Range(#[from] RangeError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// The input field this error is attributable to, when there is one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            CoreError::Range(err) => Some(err.field),
            CoreError::Validation(err) => Some(err.field),
            CoreError::InvalidId(_) | CoreError::InvalidEmail(_) => None,
        }
    }
}
