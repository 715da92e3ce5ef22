//! Hand-written string-format scanners used by the `string.*` rule kinds.
//!
//! These are purpose-built, single-pass checks over ASCII bytes, not a
//! general grammar engine. Each runs in O(length) without allocating and
//! never panics on arbitrary input.

/// Longest hostname accepted, per RFC 1035 practical limits.
const MAX_HOSTNAME_LEN: usize = 253;

/// Longest DNS label accepted.
const MAX_LABEL_LEN: usize = 63;

fn has_control_or_space(s: &str) -> bool {
    s.bytes().any(|b| b <= b' ' || b == 0x7f)
}

/// Validate a hostname: 1–253 bytes, dot-separated labels of 1–63
/// alphanumeric-or-hyphen characters that never start or end with a hyphen.
///
/// Empty labels are rejected, which also excludes leading and trailing dots.
#[must_use]
pub fn is_hostname(s: &str) -> bool {
    if s.is_empty() || s.len() > MAX_HOSTNAME_LEN {
        return false;
    }
    if has_control_or_space(s) {
        return false;
    }
    for label in s.split('.') {
        if label.is_empty() || label.len() > MAX_LABEL_LEN {
            return false;
        }
        if label.starts_with('-') || label.ends_with('-') {
            return false;
        }
        if !label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-') {
            return false;
        }
    }
    true
}

/// Validate an email address of the form `local@domain`.
///
/// Requires exactly one `@` that is neither the first nor the last character,
/// a local part without leading/trailing/consecutive dots, and a domain part
/// that independently passes [`is_hostname`].
#[must_use]
pub fn is_email(s: &str) -> bool {
    if s.len() < 3 || has_control_or_space(s) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }
    is_hostname(domain)
}

/// Validate a dotted-quad IPv4 literal: four non-empty decimal segments,
/// each in 0–255, total length 7–15 bytes.
///
/// Leading zeros (`010.0.0.1`) are accepted, matching the permissive
/// behaviour this scanner has always had; rejecting them would silently
/// change which packets cross the trust boundary.
#[must_use]
pub fn is_ipv4(s: &str) -> bool {
    if s.len() < 7 || s.len() > 15 {
        return false;
    }
    let mut segments = 0usize;
    for segment in s.split('.') {
        segments += 1;
        if segments > 4 || segment.is_empty() {
            return false;
        }
        if !segment.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        // Total length is capped at 15, so u32 cannot overflow.
        let Ok(value) = segment.parse::<u32>() else {
            return false;
        };
        if value > 255 {
            return false;
        }
    }
    segments == 4
}

/// Validate an IPv6 literal: 1–4 hex digit groups, an optional single `::`
/// compression marker, and an optional trailing embedded IPv4 literal that
/// counts as two groups. Exactly 8 groups are required without compression,
/// fewer than 8 with it.
#[must_use]
pub fn is_ipv6(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    match s.find("::") {
        Some(pos) => {
            // A second marker (including overlapping ones like ":::")
            // invalidates the literal.
            if s[pos + 1..].contains("::") {
                return false;
            }
            let head = hex_groups(&s[..pos], false);
            let tail = hex_groups(&s[pos + 2..], true);
            match (head, tail) {
                (Some(h), Some(t)) => h + t < 8,
                _ => false,
            }
        }
        None => hex_groups(s, true) == Some(8),
    }
}

/// Count the colon-separated groups in one side of an IPv6 literal,
/// returning `None` on any malformed group. An embedded IPv4 literal is only
/// accepted as the final group and contributes 2 to the count.
fn hex_groups(part: &str, ipv4_tail_allowed: bool) -> Option<usize> {
    if part.is_empty() {
        return Some(0);
    }
    let mut count = 0usize;
    let mut rest = part;
    loop {
        let (group, remainder) = match rest.split_once(':') {
            Some((g, r)) => (g, Some(r)),
            None => (rest, None),
        };
        if remainder.is_none() && ipv4_tail_allowed && group.contains('.') {
            if !is_ipv4(group) {
                return None;
            }
            return Some(count + 2);
        }
        if group.is_empty() || group.len() > 4 {
            return None;
        }
        if !group.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        count += 1;
        match remainder {
            Some(r) => rest = r,
            None => return Some(count),
        }
    }
}

/// Validate a generic IP literal: passes when either [`is_ipv4`] or
/// [`is_ipv6`] does.
#[must_use]
pub fn is_ip(s: &str) -> bool {
    is_ipv4(s) || is_ipv6(s)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{is_email, is_hostname, is_ip, is_ipv4, is_ipv6};

    #[test]
    fn hostname_accepts_ordinary_names() {
        assert!(is_hostname("example.com"));
        assert!(is_hostname("a"));
        assert!(is_hostname("xn--bcher-kva.example"));
        assert!(is_hostname("a-b.c-d.e0"));
    }

    #[test]
    fn hostname_rejects_bad_labels_and_lengths() {
        assert!(!is_hostname(""));
        assert!(!is_hostname("-bad.example"));
        assert!(!is_hostname("bad-.example"));
        assert!(!is_hostname(".example.com"));
        assert!(!is_hostname("example.com."));
        assert!(!is_hostname("exa mple.com"));
        assert!(!is_hostname("exa\u{1}mple.com"));
        assert!(!is_hostname("under_score.example"));

        let long_label = "a".repeat(64);
        assert!(!is_hostname(&format!("{long_label}.example")));
        assert!(is_hostname(&format!("{}.example", "a".repeat(63))));

        let too_long = ["a"; 127].join(".");
        assert!(is_hostname(&too_long));
        assert!(!is_hostname(&format!("{too_long}.ab")));
    }

    #[test]
    fn email_requires_single_at_and_clean_local_part() {
        assert!(is_email("user@example.com"));
        assert!(is_email("first.last@example.com"));
        assert!(!is_email("user@@example.com"));
        assert!(!is_email("user.@example.com"));
        assert!(!is_email(".user@example.com"));
        assert!(!is_email("us..er@example.com"));
        assert!(!is_email("@example.com"));
        assert!(!is_email("user@"));
        assert!(!is_email("us er@example.com"));
        assert!(!is_email("user@-bad.example"));
        assert!(!is_email("ab"));
    }

    #[test]
    fn email_minimum_length_boundary() {
        // Three characters is the shortest possible shape.
        assert!(is_email("a@b"));
    }

    #[test]
    fn ipv4_checks_segment_count_and_range() {
        assert!(is_ipv4("192.168.1.1"));
        assert!(is_ipv4("0.0.0.0"));
        assert!(is_ipv4("255.255.255.255"));
        assert!(!is_ipv4("300.0.0.1"));
        assert!(!is_ipv4("1.2.3"));
        assert!(!is_ipv4("1.2.3.4.5"));
        assert!(!is_ipv4("1..2.3"));
        assert!(!is_ipv4("1.2.3.x"));
        assert!(!is_ipv4("1.2.3.4 "));
        assert!(!is_ipv4(""));
    }

    #[test]
    fn ipv4_keeps_accepting_leading_zeros() {
        // Deliberately permissive; see the scanner doc comment.
        assert!(is_ipv4("010.0.0.1"));
        assert!(is_ipv4("192.168.001.001"));
    }

    #[test]
    fn ipv6_compression_and_group_counts() {
        assert!(is_ipv6("::1"));
        assert!(is_ipv6("::"));
        assert!(is_ipv6("2001:db8::1"));
        assert!(is_ipv6("1:2:3:4:5:6:7:8"));
        assert!(is_ipv6("fe80::"));
        assert!(is_ipv6("::ffff:192.168.0.1"));
        assert!(is_ipv6("1:2:3:4:5:6:192.168.0.1"));

        assert!(!is_ipv6("2001:::1"));
        assert!(!is_ipv6(":::"));
        assert!(!is_ipv6("1:2:3:4:5:6:7:8:9"));
        assert!(!is_ipv6("1:2:3:4:5:6:7"));
        assert!(!is_ipv6("1:2:3:4:5:6:7::8")); // 8 groups plus compression
        assert!(!is_ipv6("12345::1"));
        assert!(!is_ipv6("g::1"));
        assert!(!is_ipv6("1:2:3:4:5:6:7:192.168.0.1"));
        assert!(!is_ipv6(""));
        assert!(!is_ipv6(":1::2"));
    }

    #[test]
    fn generic_ip_accepts_either_family() {
        assert!(is_ip("10.0.0.1"));
        assert!(is_ip("2001:db8::1"));
        assert!(!is_ip("example.com"));
        assert!(!is_ip(""));
    }

    proptest! {
        #[test]
        fn dotted_quads_in_range_always_pass(a in 0u32..=255, b in 0u32..=255, c in 0u32..=255, d in 0u32..=255) {
            let quad = format!("{a}.{b}.{c}.{d}");
            prop_assert!(is_ipv4(&quad));
        }

        #[test]
        fn out_of_range_segment_always_fails(a in 256u32..=9999, b in 0u32..=255) {
            let quad = format!("{a}.{b}.{b}.{b}");
            prop_assert!(!is_ipv4(&quad));
        }

        #[test]
        fn full_eight_group_literals_always_pass(groups in proptest::collection::vec(0u16..=0xffff, 8)) {
            let literal = groups
                .iter()
                .map(|g| format!("{g:x}"))
                .collect::<Vec<_>>()
                .join(":");
            prop_assert!(is_ipv6(&literal));
        }
    }
}
