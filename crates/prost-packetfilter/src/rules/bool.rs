use super::FieldRule;

/// Rule kinds for bool fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolRule {
    /// Value must equal the constant.
    Eq(bool),
}

impl FieldRule<bool> for BoolRule {
    fn check(&self, value: &bool) -> bool {
        match self {
            Self::Eq(constant) => value == constant,
        }
    }

    fn constraint_id(&self) -> &'static str {
        match self {
            Self::Eq(_) => "bool.eq",
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Eq(constant) => format!("value must be {constant}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BoolRule, FieldRule};

    #[test]
    fn eq_matches_the_constant_only() {
        assert!(BoolRule::Eq(true).check(&true));
        assert!(!BoolRule::Eq(true).check(&false));
        assert!(BoolRule::Eq(false).check(&false));
    }
}
