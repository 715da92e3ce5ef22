use super::FieldRule;
use crate::formats;

/// Rule kinds for length-prefixed string fields.
///
/// Lengths are measured in bytes, matching the wire format's length prefix,
/// and the `MinLen`/`MaxLen` bounds are inclusive. Semantic format kinds
/// delegate to the scanners in [`crate::formats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringRule<'a> {
    /// Byte length must be at least the bound (inclusive).
    MinLen(usize),
    /// Byte length must be at most the bound (inclusive).
    MaxLen(usize),
    /// Value must start with the literal prefix.
    Prefix(&'a str),
    /// Value must end with the literal suffix.
    Suffix(&'a str),
    /// Value must contain the literal substring.
    Contains(&'a str),
    /// Every byte must be ≤ 127.
    Ascii,
    /// Value must be a valid email address.
    Email,
    /// Value must be a valid hostname.
    Hostname,
    /// Value must be a valid IPv4 or IPv6 literal.
    Ip,
    /// Value must be a valid IPv4 literal.
    Ipv4,
    /// Value must be a valid IPv6 literal.
    Ipv6,
    /// Value must be one of the listed strings.
    In(&'a [&'a str]),
    /// Value must not be any of the listed strings.
    NotIn(&'a [&'a str]),
}

impl FieldRule<str> for StringRule<'_> {
    fn check(&self, value: &str) -> bool {
        match self {
            Self::MinLen(min) => value.len() >= *min,
            Self::MaxLen(max) => value.len() <= *max,
            Self::Prefix(prefix) => value.starts_with(prefix),
            Self::Suffix(suffix) => value.ends_with(suffix),
            Self::Contains(needle) => value.contains(needle),
            Self::Ascii => value.is_ascii(),
            Self::Email => formats::is_email(value),
            Self::Hostname => formats::is_hostname(value),
            Self::Ip => formats::is_ip(value),
            Self::Ipv4 => formats::is_ipv4(value),
            Self::Ipv6 => formats::is_ipv6(value),
            Self::In(set) => set.iter().any(|s| *s == value),
            Self::NotIn(set) => !set.iter().any(|s| *s == value),
        }
    }

    fn constraint_id(&self) -> &'static str {
        match self {
            Self::MinLen(_) => "string.min_len",
            Self::MaxLen(_) => "string.max_len",
            Self::Prefix(_) => "string.prefix",
            Self::Suffix(_) => "string.suffix",
            Self::Contains(_) => "string.contains",
            Self::Ascii => "string.ascii",
            Self::Email => "string.email",
            Self::Hostname => "string.hostname",
            Self::Ip => "string.ip",
            Self::Ipv4 => "string.ipv4",
            Self::Ipv6 => "string.ipv6",
            Self::In(_) => "string.in",
            Self::NotIn(_) => "string.not_in",
        }
    }

    fn message(&self) -> String {
        match self {
            Self::MinLen(min) => format!("value must be at least {min} bytes"),
            Self::MaxLen(max) => format!("value must be at most {max} bytes"),
            Self::Prefix(prefix) => format!("value does not have prefix `{prefix}`"),
            Self::Suffix(suffix) => format!("value does not have suffix `{suffix}`"),
            Self::Contains(needle) => format!("value does not contain substring `{needle}`"),
            Self::Ascii => "value must contain only ASCII bytes".to_string(),
            Self::Email => "value must be a valid email address".to_string(),
            Self::Hostname => "value must be a valid hostname".to_string(),
            Self::Ip => "value must be a valid IP address".to_string(),
            Self::Ipv4 => "value must be a valid IPv4 address".to_string(),
            Self::Ipv6 => "value must be a valid IPv6 address".to_string(),
            Self::In(_) => "value must be in list".to_string(),
            Self::NotIn(_) => "value must not be in list".to_string(),
        }
    }
}

impl FieldRule<String> for StringRule<'_> {
    fn check(&self, value: &String) -> bool {
        FieldRule::<str>::check(self, value)
    }

    fn constraint_id(&self) -> &'static str {
        FieldRule::<str>::constraint_id(self)
    }

    fn message(&self) -> String {
        FieldRule::<str>::message(self)
    }
}
