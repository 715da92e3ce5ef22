use super::FieldRule;

/// Rule kinds for enum fields, evaluated over the i32 wire value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumRule<'a> {
    /// Value must equal the constant.
    Eq(i32),
    /// Value must be one of the enum's declared values. The slice is the
    /// schema's full value list, supplied by the generated validator.
    DefinedIn(&'a [i32]),
    /// Value must be one of the listed values.
    In(&'a [i32]),
    /// Value must not be any of the listed values.
    NotIn(&'a [i32]),
}

impl FieldRule<i32> for EnumRule<'_> {
    fn check(&self, value: &i32) -> bool {
        match self {
            Self::Eq(constant) => value == constant,
            Self::DefinedIn(declared) => declared.contains(value),
            Self::In(set) => set.contains(value),
            Self::NotIn(set) => !set.contains(value),
        }
    }

    fn constraint_id(&self) -> &'static str {
        match self {
            Self::Eq(_) => "enum.eq",
            Self::DefinedIn(_) => "enum.defined_only",
            Self::In(_) => "enum.in",
            Self::NotIn(_) => "enum.not_in",
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Eq(constant) => format!("value must equal {constant}"),
            Self::DefinedIn(_) => "value must be a defined enum value".to_string(),
            Self::In(_) => "value must be in list".to_string(),
            Self::NotIn(_) => "value must not be in list".to_string(),
        }
    }
}
