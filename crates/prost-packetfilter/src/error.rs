use std::fmt;

use crate::filter::FilterStatus;
use crate::violation::Violation;

/// Top-level error type for decode-then-validate filtering.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// One or more validation rules were violated.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The payload could not be decoded as the registered message type.
    #[error("decode error: {0}")]
    Decode(#[from] prost::DecodeError),

    /// No filter spec has been registered.
    #[error("no packet filter registered")]
    NotRegistered,

    /// A filter spec is registered but carries no validator.
    #[error("registered filter spec has no validator")]
    NoValidator,

    /// The input buffer was empty.
    #[error("input buffer is empty")]
    EmptyInput,
}

impl Error {
    /// The dispatcher status code this error maps to.
    ///
    /// Decode and validation failures deliberately collapse into the same
    /// [`FilterStatus::Rejected`] code; callers that need to tell them apart
    /// must inspect the error itself.
    #[must_use]
    pub fn status(&self) -> FilterStatus {
        match self {
            Self::Validation(_) | Self::Decode(_) => FilterStatus::Rejected,
            Self::NotRegistered => FilterStatus::NotRegistered,
            Self::NoValidator => FilterStatus::NoValidator,
            Self::EmptyInput => FilterStatus::InvalidInput,
        }
    }
}

/// Returned when one or more validation rules are violated.
#[derive(Debug)]
pub struct ValidationError {
    /// The constraint violations found during validation, in recording order.
    pub violations: Vec<Violation>,

    /// Whether further violations were dropped because the sink was full.
    pub truncated: bool,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.violations.len() {
            // Structural aborts (path overflow) fail without recording.
            0 => write!(f, "validation aborted without violations"),
            1 if !self.truncated => write!(f, "validation error: {}", self.violations[0]),
            _ => {
                write!(f, "validation errors:")?;
                for v in &self.violations {
                    write!(f, "\n - {v}")?;
                }
                if self.truncated {
                    write!(f, "\n - (further violations truncated)")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ValidationError {}
