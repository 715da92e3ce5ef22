//! The calling convention between generated per-message validators and the
//! engine.
//!
//! The code generator emits one [`ValidatedMessage`] impl per message type.
//! Its `validate_with` body follows a fixed shape, in schema field order:
//!
//! ```text
//! fn validate_with(&self, ctx: &mut ValidationContext<'_>) -> bool {
//!     if !ctx.check_field("host", self.host.as_str(), HOST_RULES) { return false; }
//!     if !ctx.check_field("port", &self.port, PORT_RULES) { return false; }
//!     if !ctx.check_message("peer", self.peer.as_ref()) { return false; }
//!     true
//! }
//! ```
//!
//! Every `check_*` helper pushes the field segment, applies the configured
//! rules, records violations, and pops the segment again before any early
//! return, so the path buffer stays balanced on all exit paths. Nested and
//! repeated submessages recurse through `check_message`/`check_messages`
//! under the parent path; recursive schemas are supported up to
//! [`MAX_NESTING_DEPTH`](crate::context::MAX_NESTING_DEPTH).

use crate::context::ValidationContext;
use crate::violation::ViolationSink;

/// A message type with a generated (or hand-written, contract-conforming)
/// validator.
pub trait ValidatedMessage {
    /// Validate this message under an existing context, recording violations
    /// at the context's current path.
    ///
    /// Returns false when the pass was cut short: a rule failed under the
    /// early-exit policy, the path buffer overflowed, or the nesting guard
    /// tripped. Under the accumulating policy, rule failures alone never
    /// return false here; the verdict comes from the sink.
    fn validate_with(&self, ctx: &mut ValidationContext<'_>) -> bool;

    /// Validate this message against its configured rules with the default
    /// early-exit policy: at most one violation is recorded.
    ///
    /// Returns true iff validation ran to completion with no violations and
    /// no branch was skipped. A path-buffer overflow anywhere in the pass
    /// records nothing but still forces a false verdict: a partially-checked
    /// message is never reported valid.
    fn validate(&self, sink: &mut ViolationSink) -> bool {
        let (completed, aborted) = {
            let mut ctx = ValidationContext::new(sink);
            let completed = self.validate_with(&mut ctx);
            (completed, ctx.aborted())
        };
        completed && !aborted && !sink.has_any()
    }

    /// Validate this message, accumulating every violation up to the sink's
    /// capacity instead of stopping at the first. Verdict semantics match
    /// [`validate`](Self::validate): a skipped branch means a false verdict
    /// even when the sink stays empty.
    fn validate_all(&self, sink: &mut ViolationSink) -> bool {
        let (completed, aborted) = {
            let mut ctx = ValidationContext::accumulating(sink);
            let completed = self.validate_with(&mut ctx);
            (completed, ctx.aborted())
        };
        completed && !aborted && !sink.has_any()
    }
}

/// Validate a possibly-absent message.
///
/// An absent message fails immediately without recording a violation: the
/// caller handed the engine nothing to inspect, which is not the same as a
/// constraint violation on a present value.
pub fn validate_message<M: ValidatedMessage>(msg: Option<&M>, sink: &mut ViolationSink) -> bool {
    match msg {
        Some(msg) => msg.validate(sink),
        None => false,
    }
}
