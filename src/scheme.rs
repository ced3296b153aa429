use std::collections::HashSet;

/// Returns true if `value` may be used as the value of a URL-bearing attribute.
///
/// Relative references (empty, `#fragment`, `/path`, `//host/path`, or anything without a
/// scheme) are always safe. Absolute URLs are safe only when their scheme is in
/// `allowed_schemes`, compared ASCII case-insensitively.
pub fn is_safe_url(value: &str, allowed_schemes: &HashSet<String>) -> bool {
    if value.is_empty() || value.starts_with('#') || value.starts_with('/') {
        return true;
    }

    let colon = match value.find(':') {
        Some(colon) => colon,
        None => return true,
    };

    let scheme = &value[..colon];
    // `a?b:c` and `a#b:c` are relative: the colon is in the query or fragment.
    if scheme.contains('?') || scheme.contains('#') {
        return true;
    }

    allowed_schemes
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(scheme))
}
