//! Navigation container locator table
//!
//! Different site families render their navigation under different
//! containers, so the extractor looks the container selector up in a
//! declarative host-pattern table instead of branching on hostnames.
//! Config entries are checked first, then a built-in catch-all.

use crate::config::NavLocatorEntry;

/// Built-in catch-all container selector
const DEFAULT_SELECTOR: &str = "#navigation";

/// Ordered host-pattern -> CSS-selector table; first match wins
#[derive(Debug, Clone)]
pub struct NavLocators {
    entries: Vec<(String, String)>,
}

impl NavLocators {
    /// Builds the table from config entries, with the built-in catch-all
    /// appended last
    pub fn from_config(entries: &[NavLocatorEntry]) -> Self {
        let mut table: Vec<(String, String)> = entries
            .iter()
            .map(|e| (e.host_pattern.clone(), e.selector.clone()))
            .collect();
        table.push(("*".to_string(), DEFAULT_SELECTOR.to_string()));
        Self { entries: table }
    }

    /// Selector for the first entry whose pattern matches the host
    pub fn resolve(&self, host: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(pattern, _)| matches_host_pattern(pattern, host))
            .map(|(_, selector)| selector.as_str())
    }
}

impl Default for NavLocators {
    fn default() -> Self {
        Self::from_config(&[])
    }
}

/// Checks whether a host matches a locator pattern
///
/// Three pattern shapes:
/// 1. `"*"` matches every host
/// 2. `"*.example.com"` matches "example.com" and any subdomain of it
/// 3. Anything else is an exact match
fn matches_host_pattern(pattern: &str, candidate: &str) -> bool {
    if pattern == "*" {
        return true;
    }

    if let Some(base) = pattern.strip_prefix("*.") {
        candidate == base || candidate.ends_with(&format!(".{}", base))
    } else {
        candidate == pattern
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(pattern: &str, selector: &str) -> NavLocatorEntry {
        NavLocatorEntry {
            host_pattern: pattern.to_string(),
            selector: selector.to_string(),
        }
    }

    #[test]
    fn test_default_table_resolves_any_host() {
        let locators = NavLocators::default();
        assert_eq!(locators.resolve("example.com"), Some("#navigation"));
        assert_eq!(locators.resolve("shop.example.org"), Some("#navigation"));
    }

    #[test]
    fn test_config_entry_wins_over_default() {
        let locators = NavLocators::from_config(&[entry("*.example.com", ".site-nav")]);
        assert_eq!(locators.resolve("example.com"), Some(".site-nav"));
        assert_eq!(locators.resolve("www.example.com"), Some(".site-nav"));
        assert_eq!(locators.resolve("other.org"), Some("#navigation"));
    }

    #[test]
    fn test_first_matching_entry_wins() {
        let locators = NavLocators::from_config(&[
            entry("shop.example.com", ".shop-nav"),
            entry("*.example.com", ".site-nav"),
        ]);
        assert_eq!(locators.resolve("shop.example.com"), Some(".shop-nav"));
        assert_eq!(locators.resolve("blog.example.com"), Some(".site-nav"));
    }

    #[test]
    fn test_exact_pattern() {
        assert!(matches_host_pattern("example.com", "example.com"));
        assert!(!matches_host_pattern("example.com", "www.example.com"));
        assert!(!matches_host_pattern("example.com", "other.com"));
    }

    #[test]
    fn test_wildcard_pattern() {
        assert!(matches_host_pattern("*.example.com", "example.com"));
        assert!(matches_host_pattern("*.example.com", "blog.example.com"));
        assert!(matches_host_pattern("*.example.com", "a.b.example.com"));
        assert!(!matches_host_pattern("*.example.com", "example.org"));
        assert!(!matches_host_pattern("*.example.com", "notexample.com"));
    }

    #[test]
    fn test_catch_all_pattern() {
        assert!(matches_host_pattern("*", "anything.at.all"));
        assert!(matches_host_pattern("*", ""));
    }
}
