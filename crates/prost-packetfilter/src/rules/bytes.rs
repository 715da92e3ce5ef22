use super::FieldRule;

/// Rule kinds for length-prefixed bytes fields. Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BytesRule<'a> {
    /// Length must be at least the bound (inclusive).
    MinLen(usize),
    /// Length must be at most the bound (inclusive).
    MaxLen(usize),
    /// Value must start with the literal prefix.
    Prefix(&'a [u8]),
    /// Value must end with the literal suffix.
    Suffix(&'a [u8]),
    /// Value must contain the literal byte sequence.
    Contains(&'a [u8]),
    /// Every byte must be <= 127.
    Ascii,
    /// Value must be one of the listed byte strings.
    In(&'a [&'a [u8]]),
    /// Value must not be any of the listed byte strings.
    NotIn(&'a [&'a [u8]]),
}

impl FieldRule<[u8]> for BytesRule<'_> {
    fn check(&self, value: &[u8]) -> bool {
        match self {
            Self::MinLen(min) => value.len() >= *min,
            Self::MaxLen(max) => value.len() <= *max,
            Self::Prefix(prefix) => value.starts_with(prefix),
            Self::Suffix(suffix) => value.ends_with(suffix),
            Self::Contains(needle) => {
                // An empty needle is trivially contained.
                needle.is_empty() || value.windows(needle.len()).any(|w| w == *needle)
            }
            Self::Ascii => value.is_ascii(),
            Self::In(set) => set.iter().any(|s| *s == value),
            Self::NotIn(set) => !set.iter().any(|s| *s == value),
        }
    }

    fn constraint_id(&self) -> &'static str {
        match self {
            Self::MinLen(_) => "bytes.min_len",
            Self::MaxLen(_) => "bytes.max_len",
            Self::Prefix(_) => "bytes.prefix",
            Self::Suffix(_) => "bytes.suffix",
            Self::Contains(_) => "bytes.contains",
            Self::Ascii => "bytes.ascii",
            Self::In(_) => "bytes.in",
            Self::NotIn(_) => "bytes.not_in",
        }
    }

    fn message(&self) -> String {
        match self {
            Self::MinLen(min) => format!("value length must be at least {min} bytes"),
            Self::MaxLen(max) => format!("value length must be at most {max} bytes"),
            Self::Prefix(prefix) => format!("value does not have prefix {prefix:?}"),
            Self::Suffix(suffix) => format!("value does not have suffix {suffix:?}"),
            Self::Contains(needle) => format!("value does not contain {needle:?}"),
            Self::Ascii => "value must contain only ASCII bytes".to_string(),
            Self::In(_) => "value must be in list".to_string(),
            Self::NotIn(_) => "value must not be in list".to_string(),
        }
    }
}

impl FieldRule<Vec<u8>> for BytesRule<'_> {
    fn check(&self, value: &Vec<u8>) -> bool {
        FieldRule::<[u8]>::check(self, value)
    }

    fn constraint_id(&self) -> &'static str {
        FieldRule::<[u8]>::constraint_id(self)
    }

    fn message(&self) -> String {
        FieldRule::<[u8]>::message(self)
    }
}

#[cfg(test)]
mod tests {
    use super::{BytesRule, FieldRule};

    fn check(rule: BytesRule<'_>, value: &[u8]) -> bool {
        FieldRule::<[u8]>::check(&rule, value)
    }

    #[test]
    fn length_bounds_are_inclusive() {
        assert!(check(BytesRule::MinLen(2), b"ab"));
        assert!(!check(BytesRule::MinLen(2), b"a"));
        assert!(check(BytesRule::MaxLen(2), b"ab"));
        assert!(!check(BytesRule::MaxLen(2), b"abc"));
    }

    #[test]
    fn contains_handles_empty_and_missing_needles() {
        assert!(check(BytesRule::Contains(b""), b"abc"));
        assert!(check(BytesRule::Contains(b"bc"), b"abcd"));
        assert!(!check(BytesRule::Contains(b"xy"), b"abcd"));
        assert!(!check(BytesRule::Contains(b"abcd"), b"abc"));
    }

    #[test]
    fn ascii_rejects_any_high_byte() {
        assert!(check(BytesRule::Ascii, b"plain bytes 123"));
        assert!(check(BytesRule::Ascii, b""));
        assert!(check(BytesRule::Ascii, b"\x00\x7f"));
        assert!(!check(BytesRule::Ascii, b"\x80"));
        assert!(!check(BytesRule::Ascii, b"caf\xc3\xa9"));
    }

    #[test]
    fn prefix_suffix_and_membership() {
        assert!(check(BytesRule::Prefix(b"\x00\x01"), b"\x00\x01rest"));
        assert!(!check(BytesRule::Prefix(b"\x00\x01"), b"\x01rest"));
        assert!(check(BytesRule::Suffix(b"end"), b"the end"));

        let set: [&[u8]; 2] = [b"aa", b"bb"];
        assert!(check(BytesRule::In(&set), b"bb"));
        assert!(!check(BytesRule::In(&set), b"cc"));
        assert!(check(BytesRule::NotIn(&set), b"cc"));
    }
}
