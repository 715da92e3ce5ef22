use crate::rules::FieldRule;
use crate::validate::ValidatedMessage;
use crate::violation::ViolationSink;

/// Maximum length in bytes of the field-path scratch buffer.
pub const MAX_PATH_LEN: usize = 128;

/// Maximum submessage nesting depth a validation pass will follow.
///
/// Recursive schemas are legal, so the call graph of validators can mirror
/// arbitrarily deep message nesting; this bound keeps stack use fixed.
pub const MAX_NESTING_DEPTH: usize = 32;

/// Per-pass validation state: the current field path, the early-exit policy,
/// and an exclusive borrow of the active [`ViolationSink`].
///
/// A context lives for exactly one validation call tree. Path segments are
/// pushed and popped in strict nesting; a generated validator that records a
/// violation and stops early must pop the current segment *before* returning
/// so every exit path leaves the buffer balanced. The [`check_field`],
/// [`check_items`], [`check_message`] and [`check_messages`] helpers
/// guarantee that ordering internally.
///
/// [`check_field`]: Self::check_field
/// [`check_items`]: Self::check_items
/// [`check_message`]: Self::check_message
/// [`check_messages`]: Self::check_messages
#[derive(Debug)]
pub struct ValidationContext<'a> {
    path: String,
    sink: &'a mut ViolationSink,
    fail_fast: bool,
    depth: usize,
    aborted: bool,
}

impl<'a> ValidationContext<'a> {
    /// Create a context with early-exit enabled (the default policy): the
    /// first failing rule records one violation and stops the pass.
    pub fn new(sink: &'a mut ViolationSink) -> Self {
        Self {
            path: String::with_capacity(MAX_PATH_LEN),
            sink,
            fail_fast: true,
            depth: 0,
            aborted: false,
        }
    }

    /// Create a context that accumulates all violations up to the sink's
    /// capacity instead of stopping at the first.
    pub fn accumulating(sink: &'a mut ViolationSink) -> Self {
        Self {
            fail_fast: false,
            ..Self::new(sink)
        }
    }

    /// Whether the early-exit policy is active.
    #[must_use]
    pub fn fail_fast(&self) -> bool {
        self.fail_fast
    }

    /// The current dot/bracket field path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Read access to the active sink.
    #[must_use]
    pub fn sink(&self) -> &ViolationSink {
        self.sink
    }

    /// Whether any path push failed during this pass. Sticky.
    ///
    /// A failed push skips the rules under that path without recording a
    /// violation, so a pass with this flag set covered only part of the
    /// message and must not report it valid, even with an empty sink.
    #[must_use]
    pub fn aborted(&self) -> bool {
        self.aborted
    }

    /// Append `.name` (bare `name` at the root) to the path.
    ///
    /// Returns false without mutating the path when the result would exceed
    /// [`MAX_PATH_LEN`], setting the sticky [`aborted`](Self::aborted) flag;
    /// the caller must abort the current validation branch, not continue
    /// with a stale path.
    #[must_use]
    pub fn push_field(&mut self, name: &str) -> bool {
        let extra = if self.path.is_empty() {
            name.len()
        } else {
            1 + name.len()
        };
        if self.path.len() + extra > MAX_PATH_LEN {
            self.aborted = true;
            return false;
        }
        if !self.path.is_empty() {
            self.path.push('.');
        }
        self.path.push_str(name);
        true
    }

    /// Truncate the path back to the last `.` separator, or empty it when
    /// there is none. Unbalanced pops are a caller bug: the path degrades to
    /// the nearest separator rather than panicking.
    pub fn pop_field(&mut self) {
        match self.path.rfind('.') {
            Some(pos) => self.path.truncate(pos),
            None => self.path.clear(),
        }
    }

    /// Append `[index]` to the path, with the same overflow contract as
    /// [`push_field`](Self::push_field).
    #[must_use]
    pub fn push_index(&mut self, index: usize) -> bool {
        let segment = format!("[{index}]");
        if self.path.len() + segment.len() > MAX_PATH_LEN {
            self.aborted = true;
            return false;
        }
        self.path.push_str(&segment);
        true
    }

    /// Truncate the path back to the last `[`, or empty it when there is
    /// none.
    pub fn pop_index(&mut self) {
        match self.path.rfind('[') {
            Some(pos) => self.path.truncate(pos),
            None => self.path.clear(),
        }
    }

    /// Record a violation of `constraint_id` at the current path.
    ///
    /// The path text is copied into the record, so later mutation of the
    /// context cannot corrupt it.
    pub fn violate(&mut self, constraint_id: &'static str, message: impl Into<String>) {
        self.sink.add(&self.path, constraint_id, message);
    }

    /// Enter one level of submessage nesting.
    ///
    /// At [`MAX_NESTING_DEPTH`] a `message.max_depth` violation is recorded
    /// and false is returned; the caller must skip the nested validator.
    #[must_use]
    pub fn enter_nested(&mut self) -> bool {
        if self.depth >= MAX_NESTING_DEPTH {
            self.violate(
                "message.max_depth",
                format!("message nesting exceeds {MAX_NESTING_DEPTH} levels"),
            );
            return false;
        }
        self.depth += 1;
        true
    }

    /// Leave one level of submessage nesting.
    pub fn leave_nested(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Apply every rule to one field value, in declaration order.
    ///
    /// Pushes `name`, evaluates the rules, records a violation per failed
    /// rule, and pops the segment again. Returns false when the enclosing
    /// validator must stop: either the path overflowed or a rule failed under
    /// the early-exit policy. The segment is always popped before a false
    /// return.
    pub fn check_field<T: ?Sized, R: FieldRule<T>>(
        &mut self,
        name: &str,
        value: &T,
        rules: &[R],
    ) -> bool {
        if !self.push_field(name) {
            return false;
        }
        for rule in rules {
            if !rule.check(value) {
                self.violate(rule.constraint_id(), rule.message());
                if self.fail_fast {
                    self.pop_field();
                    return false;
                }
            }
        }
        self.pop_field();
        true
    }

    /// Apply per-item rules to every element of a repeated field, recording
    /// violations under `name[index]` paths.
    pub fn check_items<T, R: FieldRule<T>>(
        &mut self,
        name: &str,
        items: &[T],
        rules: &[R],
    ) -> bool {
        if !self.push_field(name) {
            return false;
        }
        for (index, item) in items.iter().enumerate() {
            if !self.push_index(index) {
                self.pop_field();
                return false;
            }
            for rule in rules {
                if !rule.check(item) {
                    self.violate(rule.constraint_id(), rule.message());
                    if self.fail_fast {
                        self.pop_index();
                        self.pop_field();
                        return false;
                    }
                }
            }
            self.pop_index();
        }
        self.pop_field();
        true
    }

    /// Recurse into an optional nested submessage under `name`.
    ///
    /// An absent submessage passes. Depth is bounded by
    /// [`MAX_NESTING_DEPTH`].
    pub fn check_message<M: ValidatedMessage>(&mut self, name: &str, msg: Option<&M>) -> bool {
        if !self.push_field(name) {
            return false;
        }
        let mut proceed = true;
        if let Some(msg) = msg {
            if self.enter_nested() {
                let ok = msg.validate_with(self);
                self.leave_nested();
                proceed = ok || !self.fail_fast;
            } else {
                proceed = false;
            }
        }
        self.pop_field();
        proceed
    }

    /// Recurse into every element of a repeated submessage field, validating
    /// each under `name[index]`.
    pub fn check_messages<M: ValidatedMessage>(&mut self, name: &str, items: &[M]) -> bool {
        if !self.push_field(name) {
            return false;
        }
        for (index, item) in items.iter().enumerate() {
            if !self.push_index(index) {
                self.pop_field();
                return false;
            }
            let proceed = if self.enter_nested() {
                let ok = item.validate_with(self);
                self.leave_nested();
                ok || !self.fail_fast
            } else {
                false
            };
            self.pop_index();
            if !proceed {
                self.pop_field();
                return false;
            }
        }
        self.pop_field();
        true
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::{MAX_NESTING_DEPTH, MAX_PATH_LEN, ValidationContext};
    use crate::violation::ViolationSink;

    #[test]
    fn push_and_pop_build_dot_bracket_paths() {
        let mut sink = ViolationSink::new();
        let mut ctx = ValidationContext::new(&mut sink);

        assert!(ctx.push_field("peers"));
        assert!(ctx.push_index(2));
        assert!(ctx.push_field("host"));
        assert_eq!(ctx.path(), "peers[2].host");

        ctx.pop_field();
        assert_eq!(ctx.path(), "peers[2]");
        ctx.pop_index();
        assert_eq!(ctx.path(), "peers");
        ctx.pop_field();
        assert_eq!(ctx.path(), "");
    }

    #[test]
    fn interleaved_pushes_and_pops_balance_to_the_starting_path() {
        let mut sink = ViolationSink::new();
        let mut ctx = ValidationContext::new(&mut sink);

        assert!(ctx.push_field("a"));
        assert!(ctx.push_field("b"));
        ctx.pop_field();
        assert!(ctx.push_field("c"));
        ctx.pop_field();
        ctx.pop_field();
        assert_eq!(ctx.path(), "");
    }

    #[test]
    fn overflowing_push_leaves_the_path_untouched() {
        let mut sink = ViolationSink::new();
        let mut ctx = ValidationContext::new(&mut sink);

        let long = "x".repeat(MAX_PATH_LEN);
        assert!(ctx.push_field(&long));
        assert_eq!(ctx.path().len(), MAX_PATH_LEN);
        assert!(!ctx.aborted());

        assert!(!ctx.push_field("more"));
        assert!(!ctx.push_index(0));
        assert_eq!(ctx.path(), long);

        // A failed push marks the whole pass, and the mark outlives the pop.
        assert!(ctx.aborted());
        ctx.pop_field();
        assert!(ctx.aborted());
    }

    #[test]
    fn unbalanced_pop_truncates_to_the_last_separator() {
        let mut sink = ViolationSink::new();
        let mut ctx = ValidationContext::new(&mut sink);

        assert!(ctx.push_field("a"));
        assert!(ctx.push_field("b"));
        ctx.pop_field();
        ctx.pop_field();
        // Documented hazard: a third pop just empties the buffer.
        ctx.pop_field();
        assert_eq!(ctx.path(), "");
    }

    #[test]
    fn violate_copies_the_path_at_record_time() {
        let mut sink = ViolationSink::new();
        let mut ctx = ValidationContext::new(&mut sink);

        assert!(ctx.push_field("outer"));
        assert!(ctx.push_field("inner"));
        ctx.violate("string.min_len", "too short");
        ctx.pop_field();
        ctx.pop_field();
        assert!(ctx.push_field("sibling"));

        // The recorded path must not have followed the buffer's mutations.
        assert_eq!(sink.violations()[0].field_path, "outer.inner");
    }

    #[test]
    fn nesting_guard_trips_at_the_depth_limit() {
        let mut sink = ViolationSink::new();
        let mut ctx = ValidationContext::new(&mut sink);

        for _ in 0..MAX_NESTING_DEPTH {
            assert!(ctx.enter_nested());
        }
        assert!(!ctx.enter_nested());
        assert_eq!(sink.count(), 1);
        assert_eq!(sink.violations()[0].constraint_id, "message.max_depth");
    }

    proptest! {
        // For any well-nested push/pop sequence the path after all pops
        // equals the path before the first push.
        #[test]
        fn nested_fields_always_unwind_to_the_original_path(
            names in proptest::collection::vec("[a-z][a-z0-9_]{0,7}", 1..8)
        ) {
            let mut sink = ViolationSink::new();
            let mut ctx = ValidationContext::new(&mut sink);
            prop_assert!(ctx.push_field("root"));
            let before = ctx.path().to_string();

            for name in &names {
                prop_assert!(ctx.push_field(name));
            }
            for _ in &names {
                ctx.pop_field();
            }
            prop_assert_eq!(ctx.path(), before);
        }

        #[test]
        fn indexed_segments_always_unwind_to_the_original_path(
            indexes in proptest::collection::vec(0usize..1000, 1..6)
        ) {
            let mut sink = ViolationSink::new();
            let mut ctx = ValidationContext::new(&mut sink);
            prop_assert!(ctx.push_field("items"));
            let before = ctx.path().to_string();

            for index in &indexes {
                prop_assert!(ctx.push_index(*index));
            }
            for _ in &indexes {
                ctx.pop_index();
            }
            prop_assert_eq!(ctx.path(), before);
        }
    }
}
