//! Naming rules for project identifiers and domains
//!
//! Project names and namespaces follow RFC 1123 label syntax (what the
//! Kubernetes API accepts for namespace and resource names). Domains follow
//! RFC 1123 subdomain syntax. Violations are collected, not short-circuited,
//! so the caller can report everything that is wrong at once.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Violation;

/// Maximum length of a name label (RFC 1123)
pub const MAX_IDENTIFIER_LEN: usize = 63;

/// Maximum length of a full domain (RFC 1123)
pub const MAX_DOMAIN_LEN: usize = 253;

/// Inclusive replica range documented for the deployment
pub const REPLICAS_MIN: u32 = 1;
pub const REPLICAS_MAX: u32 = 10;

static IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]([a-z0-9-]*[a-z0-9])?$").expect("valid regex"));

static DOMAIN_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]([a-zA-Z0-9-]*[a-zA-Z0-9])?$").expect("valid regex"));

/// Check a project name or namespace identifier
pub fn is_valid_identifier(s: &str) -> bool {
    !s.is_empty() && s.len() <= MAX_IDENTIFIER_LEN && IDENTIFIER_RE.is_match(s)
}

/// Check a fully qualified domain name
pub fn is_valid_domain(s: &str) -> bool {
    if s.is_empty() || s.len() > MAX_DOMAIN_LEN {
        return false;
    }
    s.split('.').all(|label| {
        !label.is_empty() && label.len() <= MAX_IDENTIFIER_LEN && DOMAIN_LABEL_RE.is_match(label)
    })
}

/// Validate an identifier field, pushing a violation if it is malformed
pub fn check_identifier(field: &str, value: &str, violations: &mut Vec<Violation>) {
    if value.is_empty() {
        violations.push(Violation::new(field, "must not be empty"));
    } else if !is_valid_identifier(value) {
        violations.push(Violation::new(
            field,
            format!(
                "'{}' must be lowercase alphanumeric with internal hyphens, \
                 starting and ending with an alphanumeric character (max {} chars)",
                value, MAX_IDENTIFIER_LEN
            ),
        ));
    }
}

/// Validate a domain field, pushing a violation if it is malformed
pub fn check_domain(field: &str, value: &str, violations: &mut Vec<Violation>) {
    if value.is_empty() {
        violations.push(Violation::new(field, "must not be empty"));
    } else if !is_valid_domain(value) {
        violations.push(Violation::new(
            field,
            format!(
                "'{}' must be a valid domain name (alphanumeric labels separated \
                 by dots, hyphens allowed inside labels)",
                value
            ),
        ));
    }
}

/// Validate the replica count against the documented inclusive range.
/// Out-of-range values fail; they are never silently clamped.
pub fn check_replicas(field: &str, value: u32, violations: &mut Vec<Violation>) {
    if !(REPLICAS_MIN..=REPLICAS_MAX).contains(&value) {
        violations.push(Violation::new(
            field,
            format!(
                "{} is out of range (must be between {} and {})",
                value, REPLICAS_MIN, REPLICAS_MAX
            ),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_identifiers() {
        assert!(is_valid_identifier("my-blog"));
        assert!(is_valid_identifier("blog"));
        assert!(is_valid_identifier("a"));
        assert!(is_valid_identifier("a1-b2-c3"));
    }

    #[test]
    fn test_invalid_identifiers() {
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("-blog"));
        assert!(!is_valid_identifier("blog-"));
        assert!(!is_valid_identifier("My-Blog"));
        assert!(!is_valid_identifier("my_blog"));
        assert!(!is_valid_identifier("my.blog"));
        assert!(!is_valid_identifier(&"a".repeat(64)));
    }

    #[test]
    fn test_valid_domains() {
        assert!(is_valid_domain("blog.example.com"));
        assert!(is_valid_domain("example.com"));
        assert!(is_valid_domain("a-b.example.co.uk"));
        assert!(is_valid_domain("localhost"));
    }

    #[test]
    fn test_invalid_domains() {
        assert!(!is_valid_domain(""));
        assert!(!is_valid_domain(".example.com"));
        assert!(!is_valid_domain("example.com."));
        assert!(!is_valid_domain("exa mple.com"));
        assert!(!is_valid_domain("-example.com"));
        assert!(!is_valid_domain(&format!("{}.com", "a".repeat(64))));
    }

    #[test]
    fn test_replica_range() {
        let mut v = Vec::new();
        check_replicas("replicas", 1, &mut v);
        check_replicas("replicas", 2, &mut v);
        check_replicas("replicas", 10, &mut v);
        assert!(v.is_empty());

        check_replicas("replicas", 0, &mut v);
        check_replicas("replicas", 11, &mut v);
        assert_eq!(v.len(), 2);
        assert!(v[1].message.contains("11"));
    }
}
