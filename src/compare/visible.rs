//! Visible-text derivation
//!
//! The content-change threshold compares what a reader would actually see,
//! so script/style/noscript/iframe/svg subtrees are dropped before reading
//! the body text.

use ego_tree::NodeRef;
use scraper::{node::Node, Html, Selector};

/// Subtrees that never contribute visible text
const EXCLUDED_TAGS: [&str; 5] = ["script", "style", "noscript", "iframe", "svg"];

/// Extracts the page's visible body text with whitespace collapsed
///
/// Pages without a `<body>` yield an empty string.
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let Ok(body_selector) = Selector::parse("body") else {
        return String::new();
    };

    let Some(body) = document.select(&body_selector).next() else {
        return String::new();
    };

    let mut raw = String::new();
    collect_visible(*body, &mut raw);

    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_visible(node: NodeRef<'_, Node>, out: &mut String) {
    for child in node.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => {
                if !EXCLUDED_TAGS.contains(&element.name()) {
                    collect_visible(child, out);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_body_text() {
        let html = "<html><head><title>Hidden</title></head><body><p>Hello world</p></body></html>";
        assert_eq!(visible_text(html), "Hello world");
    }

    #[test]
    fn test_collapses_whitespace() {
        let html = "<html><body><p>  Hello \n\n  world\t again </p></body></html>";
        assert_eq!(visible_text(html), "Hello world again");
    }

    #[test]
    fn test_excludes_script_and_style() {
        let html = r#"<html><body>
            <p>Visible</p>
            <script>var hidden = "nope";</script>
            <style>.hidden { display: none; }</style>
        </body></html>"#;
        assert_eq!(visible_text(html), "Visible");
    }

    #[test]
    fn test_excludes_noscript_iframe_svg() {
        let html = r#"<html><body>
            <noscript>enable javascript</noscript>
            <svg><text>vector</text></svg>
            <p>Shown</p>
        </body></html>"#;
        assert_eq!(visible_text(html), "Shown");
    }

    #[test]
    fn test_nested_content_under_excluded_subtree_dropped() {
        let html = "<html><body><svg><g><text>deep</text></g></svg><span>kept</span></body></html>";
        assert_eq!(visible_text(html), "kept");
    }

    #[test]
    fn test_no_body_yields_empty() {
        assert_eq!(visible_text(""), "");
    }
}
