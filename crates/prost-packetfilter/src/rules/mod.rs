//! Per-type-family rule kinds and their dispatch seam.
//!
//! Each protobuf scalar family gets its own closed rule enum, evaluated by
//! pattern matching behind the [`FieldRule`] trait. Because rule kinds are
//! typed per family, applying a rule to a value of the wrong type is a
//! compile error rather than the silently-ignored runtime case the wire
//! format would otherwise force.

pub(crate) mod bool;
pub(crate) mod bytes;
pub(crate) mod enum_rules;
pub(crate) mod number;
pub(crate) mod repeated;
pub(crate) mod string;

pub use self::bool::BoolRule;
pub use self::bytes::BytesRule;
pub use self::enum_rules::EnumRule;
pub use self::number::NumericRule;
pub use self::repeated::RepeatedRule;
pub use self::string::StringRule;

/// One declarative check on a field value of type `T`.
///
/// This is the entire dispatch surface generated validators rely on: a pure
/// predicate plus the constraint identifier and message to record when it
/// fails. Implementations never allocate on the passing path.
pub trait FieldRule<T: ?Sized> {
    /// Evaluate the rule against a field value. True means the value passes.
    fn check(&self, value: &T) -> bool;

    /// Machine-readable identifier recorded on violation, e.g.
    /// `string.min_len`.
    fn constraint_id(&self) -> &'static str;

    /// Human-readable description recorded on violation.
    fn message(&self) -> String;
}
