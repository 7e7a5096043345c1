//! Fuzzy matching for undefined placeholder names
//!
//! When a template references a placeholder that has no value, a likely
//! typo is worth pointing out. Uses Levenshtein distance over the set of
//! defined variable names.

/// Maximum Levenshtein distance to consider for suggestions
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Find the closest defined name to an unknown one, if any is close enough
pub fn suggest<'a>(unknown: &str, known: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    known
        .into_iter()
        .map(|candidate| (strsim::levenshtein(unknown, candidate), candidate))
        .filter(|(distance, _)| *distance <= MAX_SUGGESTION_DISTANCE)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, candidate)| candidate)
}

/// Build a help message for a list of undefined placeholders
pub fn suggestion_help<'a>(
    missing: &[String],
    known: impl IntoIterator<Item = &'a str> + Clone,
) -> Option<String> {
    let hints: Vec<String> = missing
        .iter()
        .filter_map(|name| {
            suggest(name, known.clone()).map(|candidate| format!("'{}' -> '{}'", name, candidate))
        })
        .collect();

    if hints.is_empty() {
        None
    } else {
        Some(format!("did you mean: {}", hints.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN: [&str; 4] = ["project_name", "namespace", "domain", "replicas"];

    #[test]
    fn test_close_match() {
        assert_eq!(suggest("project_nam", KNOWN), Some("project_name"));
        assert_eq!(suggest("replica", KNOWN), Some("replicas"));
    }

    #[test]
    fn test_no_match_when_too_far() {
        assert_eq!(suggest("completely_different", KNOWN), None);
    }

    #[test]
    fn test_help_text() {
        let missing = vec!["namespce".to_string(), "zzzzzz".to_string()];
        let help = suggestion_help(&missing, KNOWN).unwrap();
        assert!(help.contains("'namespce' -> 'namespace'"));
        assert!(!help.contains("zzzzzz ->"));
    }

    #[test]
    fn test_help_none_without_candidates() {
        let missing = vec!["qqqqqqqqqq".to_string()];
        assert!(suggestion_help(&missing, KNOWN).is_none());
    }
}
