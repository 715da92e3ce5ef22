use std::fmt::Display;

use super::FieldRule;

/// Rule kinds for numeric scalar families: signed/unsigned 32- and 64-bit
/// integers, float, and double. Monomorphised per family at the call site.
///
/// Comparisons follow `PartialOrd` semantics, so for floats every comparison
/// with NaN fails and a NaN value therefore violates any range or equality
/// rule; NaN cannot sneak past a bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericRule<'a, T> {
    /// Value must be strictly less than the bound.
    Lt(T),
    /// Value must be less than or equal to the bound.
    Lte(T),
    /// Value must be strictly greater than the bound.
    Gt(T),
    /// Value must be greater than or equal to the bound.
    Gte(T),
    /// Value must equal the constant.
    Eq(T),
    /// Value must be one of the listed constants (linear scan, small lists).
    In(&'a [T]),
    /// Value must not be any of the listed constants.
    NotIn(&'a [T]),
}

impl<T> FieldRule<T> for NumericRule<'_, T>
where
    T: PartialOrd + PartialEq + Copy + Display,
{
    fn check(&self, value: &T) -> bool {
        match self {
            Self::Lt(bound) => *value < *bound,
            Self::Lte(bound) => *value <= *bound,
            Self::Gt(bound) => *value > *bound,
            Self::Gte(bound) => *value >= *bound,
            Self::Eq(constant) => *value == *constant,
            Self::In(set) => set.contains(value),
            Self::NotIn(set) => !set.contains(value),
        }
    }

    fn constraint_id(&self) -> &'static str {
        match self {
            Self::Lt(_) => "number.lt",
            Self::Lte(_) => "number.lte",
            Self::Gt(_) => "number.gt",
            Self::Gte(_) => "number.gte",
            Self::Eq(_) => "number.eq",
            Self::In(_) => "number.in",
            Self::NotIn(_) => "number.not_in",
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Lt(bound) => format!("value must be less than {bound}"),
            Self::Lte(bound) => format!("value must be less than or equal to {bound}"),
            Self::Gt(bound) => format!("value must be greater than {bound}"),
            Self::Gte(bound) => format!("value must be greater than or equal to {bound}"),
            Self::Eq(constant) => format!("value must equal {constant}"),
            Self::In(_) => "value must be in list".to_string(),
            Self::NotIn(_) => "value must not be in list".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldRule, NumericRule};

    #[test]
    fn comparisons_are_inclusive_exactly_where_specified() {
        assert!(NumericRule::Lt(10_i32).check(&9));
        assert!(!NumericRule::Lt(10_i32).check(&10));
        assert!(NumericRule::Lte(10_i32).check(&10));
        assert!(!NumericRule::Lte(10_i32).check(&11));
        assert!(NumericRule::Gt(10_u64).check(&11));
        assert!(!NumericRule::Gt(10_u64).check(&10));
        assert!(NumericRule::Gte(10_u64).check(&10));
        assert!(!NumericRule::Gte(10_u64).check(&9));
        assert!(NumericRule::Eq(7_i64).check(&7));
        assert!(!NumericRule::Eq(7_i64).check(&8));
    }

    #[test]
    fn set_membership_scans_the_whole_list() {
        let allowed = [1_u32, 5, 9];
        assert!(NumericRule::In(&allowed).check(&9));
        assert!(!NumericRule::In(&allowed).check(&2));
        assert!(NumericRule::NotIn(&allowed).check(&2));
        assert!(!NumericRule::NotIn(&allowed).check(&5));
    }

    #[test]
    fn nan_fails_every_rule_kind_it_can_reach() {
        let nan = f64::NAN;
        assert!(!NumericRule::Lt(1.0).check(&nan));
        assert!(!NumericRule::Lte(1.0).check(&nan));
        assert!(!NumericRule::Gt(1.0).check(&nan));
        assert!(!NumericRule::Gte(1.0).check(&nan));
        assert!(!NumericRule::Eq(f64::NAN).check(&nan));
        assert!(!NumericRule::In(&[1.0, 2.0]).check(&nan));
        // NotIn is the one rule NaN passes: it is never equal to a member.
        assert!(NumericRule::NotIn(&[1.0, 2.0]).check(&nan));
    }

    #[test]
    fn float_bounds_behave_like_integer_bounds_for_finite_values() {
        assert!(NumericRule::Gte(0.5_f32).check(&0.5));
        assert!(!NumericRule::Gt(0.5_f32).check(&0.5));
    }
}
