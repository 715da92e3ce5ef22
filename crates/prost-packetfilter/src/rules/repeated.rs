use super::FieldRule;

/// Rule kinds for repeated fields, evaluated over the whole element slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatedRule {
    /// The field must have at least this many items (inclusive).
    MinItems(usize),
    /// The field must have at most this many items (inclusive).
    MaxItems(usize),
    /// All items must be pairwise distinct. O(n²) over `PartialEq`, which is
    /// fine for the small, capacity-bounded repeated fields this engine
    /// validates.
    Unique,
}

impl<T: PartialEq> FieldRule<[T]> for RepeatedRule {
    fn check(&self, items: &[T]) -> bool {
        match self {
            Self::MinItems(min) => items.len() >= *min,
            Self::MaxItems(max) => items.len() <= *max,
            Self::Unique => is_unique(items),
        }
    }

    fn constraint_id(&self) -> &'static str {
        match self {
            Self::MinItems(_) => "repeated.min_items",
            Self::MaxItems(_) => "repeated.max_items",
            Self::Unique => "repeated.unique",
        }
    }

    fn message(&self) -> String {
        match self {
            Self::MinItems(min) => format!("must have at least {min} items"),
            Self::MaxItems(max) => format!("must have at most {max} items"),
            Self::Unique => "items must be unique".to_string(),
        }
    }
}

fn is_unique<T: PartialEq>(items: &[T]) -> bool {
    for (i, item) in items.iter().enumerate() {
        for prev in items.iter().take(i) {
            if item == prev {
                return false;
            }
        }
    }
    true
}
