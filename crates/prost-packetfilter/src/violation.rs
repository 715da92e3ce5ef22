use std::fmt;

use crate::error::ValidationError;

/// Default number of violations a [`ViolationSink`] retains before it starts
/// dropping records and reports truncation.
pub const DEFAULT_SINK_CAPACITY: usize = 16;

/// A single instance where a validation rule was not met.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Dot/bracket path of the field that failed, e.g. `peers[2].host`.
    ///
    /// Owned by the violation: the path text is copied out of the context's
    /// scratch buffer at record time, so later push/pop activity on the
    /// context cannot corrupt it.
    pub field_path: String,

    /// Machine-readable identifier of the violated rule, e.g. `string.min_len`.
    pub constraint_id: &'static str,

    /// Human-readable description of the failure.
    pub message: String,
}

impl Violation {
    pub(crate) fn new(
        field_path: impl Into<String>,
        constraint_id: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field_path: field_path.into(),
            constraint_id,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.field_path.is_empty() {
            write!(f, "{}: ", self.field_path)?;
        }
        if !self.message.is_empty() {
            write!(f, "{}", self.message)
        } else if !self.constraint_id.is_empty() {
            write!(f, "[{}]", self.constraint_id)
        } else {
            write!(f, "[unknown]")
        }
    }
}

/// Bounded, ordered accumulator of [`Violation`] records.
///
/// The sink never grows past its capacity: once full, further records are
/// dropped and the sticky [`truncated`](Self::truncated) flag is set. This
/// keeps worst-case memory behaviour fixed regardless of how pathological the
/// validated message is.
#[derive(Debug)]
pub struct ViolationSink {
    violations: Vec<Violation>,
    capacity: usize,
    truncated: bool,
}

impl ViolationSink {
    /// Create a sink with [`DEFAULT_SINK_CAPACITY`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_SINK_CAPACITY)
    }

    /// Create a sink that retains at most `capacity` violations.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            violations: Vec::with_capacity(capacity),
            capacity,
            truncated: false,
        }
    }

    /// Record a violation.
    ///
    /// The path is copied into the record. Returns false and sets the sticky
    /// truncation flag when the sink is already at capacity; the record is
    /// dropped in that case.
    pub fn add(
        &mut self,
        field_path: &str,
        constraint_id: &'static str,
        message: impl Into<String>,
    ) -> bool {
        if self.violations.len() >= self.capacity {
            self.truncated = true;
            return false;
        }
        self.violations
            .push(Violation::new(field_path, constraint_id, message));
        true
    }

    /// Whether any violation has been recorded.
    #[must_use]
    pub fn has_any(&self) -> bool {
        !self.violations.is_empty()
    }

    /// Number of retained violations. Never exceeds the capacity.
    #[must_use]
    pub fn count(&self) -> usize {
        self.violations.len()
    }

    /// Whether at least one violation was dropped because the sink was full.
    /// Once set, the flag never resets for the lifetime of the sink.
    #[must_use]
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// The retained violations, in recording order.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consume the sink, yielding `Err` when any violation was recorded.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] carrying the retained violations and the
    /// truncation flag.
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                violations: self.violations,
                truncated: self.truncated,
            })
        }
    }
}

impl Default for ViolationSink {
    fn default() -> Self {
        Self::new()
    }
}
