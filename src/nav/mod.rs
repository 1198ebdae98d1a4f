//! Navigation link extraction and diffing
//!
//! Homepages carry a navigation menu whose link set is a strong SEO signal.
//! This module extracts that menu as a list of same-origin links (container
//! found through a host-pattern locator table) and diffs two such lists
//! into added/removed/text-changed records.

mod differ;
mod extractor;
mod locators;

pub use differ::diff_nav;
pub use extractor::extract_nav;
pub use locators::NavLocators;

/// One navigation link: absolute same-origin URL plus normalized text
///
/// Derived on demand from a snapshot's raw HTML; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub url: String,
    pub text: String,
}

/// A navigation link whose visible text changed between two versions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavTextChange {
    pub url: String,
    pub old_text: String,
    pub new_text: String,
}
