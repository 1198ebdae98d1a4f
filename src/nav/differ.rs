//! Navigation link set diffing

use crate::compare::Change;
use crate::nav::{NavLink, NavTextChange};
use std::collections::HashMap;

/// Diffs two navigation link lists into change records
///
/// Each side is reduced to a url -> text mapping (last write wins on
/// duplicate urls, first-seen order preserved). Changes are emitted only
/// for non-empty groups, in the order removed, added, text-changed, each
/// carrying the full affected-link list.
pub fn diff_nav(old_links: &[NavLink], new_links: &[NavLink]) -> Vec<Change> {
    let (old_order, old_map) = index_links(old_links);
    let (new_order, new_map) = index_links(new_links);

    let removed: Vec<NavLink> = old_order
        .iter()
        .filter(|url| !new_map.contains_key(*url))
        .map(|url| NavLink {
            url: (*url).to_string(),
            text: old_map[*url].to_string(),
        })
        .collect();

    let added: Vec<NavLink> = new_order
        .iter()
        .filter(|url| !old_map.contains_key(*url))
        .map(|url| NavLink {
            url: (*url).to_string(),
            text: new_map[*url].to_string(),
        })
        .collect();

    let text_changed: Vec<NavTextChange> = new_order
        .iter()
        .filter_map(|url| {
            let old_text = old_map.get(*url)?;
            let new_text = new_map[*url];
            if old_text == &new_text {
                None
            } else {
                Some(NavTextChange {
                    url: (*url).to_string(),
                    old_text: old_text.to_string(),
                    new_text: new_text.to_string(),
                })
            }
        })
        .collect();

    let mut changes = Vec::new();
    if !removed.is_empty() {
        changes.push(Change::NavRemoved { links: removed });
    }
    if !added.is_empty() {
        changes.push(Change::NavAdded { links: added });
    }
    if !text_changed.is_empty() {
        changes.push(Change::NavTextChanged {
            links: text_changed,
        });
    }

    changes
}

/// Reduces a link list to first-seen url order plus a url -> text map where
/// the last text for a duplicate url wins
fn index_links(links: &[NavLink]) -> (Vec<&str>, HashMap<&str, &str>) {
    let mut order: Vec<&str> = Vec::new();
    let mut map: HashMap<&str, &str> = HashMap::new();

    for link in links {
        if !map.contains_key(link.url.as_str()) {
            order.push(link.url.as_str());
        }
        map.insert(link.url.as_str(), link.text.as_str());
    }

    (order, map)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(url: &str, text: &str) -> NavLink {
        NavLink {
            url: url.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_identical_sets_no_changes() {
        let links = vec![link("/a", "A"), link("/b", "B")];
        assert!(diff_nav(&links, &links).is_empty());
    }

    #[test]
    fn test_disjoint_sets_are_removed_and_added_not_text_changed() {
        let old = vec![link("/a", "A")];
        let new = vec![link("/b", "B")];

        let changes = diff_nav(&old, &new);

        assert_eq!(
            changes,
            vec![
                Change::NavRemoved {
                    links: vec![link("/a", "A")],
                },
                Change::NavAdded {
                    links: vec![link("/b", "B")],
                },
            ]
        );
    }

    #[test]
    fn test_text_change_detected() {
        let old = vec![link("/a", "Shoes")];
        let new = vec![link("/a", "All Shoes")];

        let changes = diff_nav(&old, &new);

        assert_eq!(
            changes,
            vec![Change::NavTextChanged {
                links: vec![NavTextChange {
                    url: "/a".to_string(),
                    old_text: "Shoes".to_string(),
                    new_text: "All Shoes".to_string(),
                }],
            }]
        );
    }

    #[test]
    fn test_emission_order_removed_added_text_changed() {
        let old = vec![link("/gone", "Gone"), link("/kept", "Kept")];
        let new = vec![link("/kept", "Kept But Renamed"), link("/fresh", "Fresh")];

        let changes = diff_nav(&old, &new);

        assert_eq!(changes.len(), 3);
        assert!(matches!(changes[0], Change::NavRemoved { .. }));
        assert!(matches!(changes[1], Change::NavAdded { .. }));
        assert!(matches!(changes[2], Change::NavTextChanged { .. }));
    }

    #[test]
    fn test_duplicate_url_last_text_wins() {
        let old = vec![link("/a", "First"), link("/a", "Second")];
        let new = vec![link("/a", "Second")];

        // The old side reduces to /a -> "Second", so nothing changed
        assert!(diff_nav(&old, &new).is_empty());
    }

    #[test]
    fn test_empty_sides() {
        assert!(diff_nav(&[], &[]).is_empty());

        let links = vec![link("/a", "A")];
        let changes = diff_nav(&links, &[]);
        assert_eq!(changes.len(), 1);
        assert!(matches!(changes[0], Change::NavRemoved { .. }));

        let changes = diff_nav(&[], &links);
        assert_eq!(changes.len(), 1);
        assert!(matches!(changes[0], Change::NavAdded { .. }));
    }
}
