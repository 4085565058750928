//! Attribute (tag) helpers.
//!
//! Attributes are free text compared without regard to case. A player's
//! attribute list is kept free of case-insensitive duplicates, and the first
//! spelling seen is the one stored.

fn eq_fold(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Returns true if `attributes` holds `tag`, ignoring case.
pub fn contains_attribute(attributes: &[String], tag: &str) -> bool {
    attributes.iter().any(|a| eq_fold(a, tag))
}

/// Returns true if any entry of `filter` is present in `attributes`.
pub fn has_any_attribute(attributes: &[String], filter: &[String]) -> bool {
    filter.iter().any(|tag| contains_attribute(attributes, tag))
}

/// Removes case-insensitive duplicates, keeping the first spelling and the
/// original order.
pub fn dedup_attributes(attributes: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(attributes.len());
    for attr in attributes {
        if !contains_attribute(&out, &attr) {
            out.push(attr);
        }
    }
    out
}

/// Appends every entry of `incoming` not already present and returns how
/// many were added.
pub fn merge_attributes(existing: &mut Vec<String>, incoming: &[String]) -> usize {
    let before = existing.len();
    for attr in incoming {
        if !contains_attribute(existing, attr) {
            existing.push(attr.clone());
        }
    }
    existing.len() - before
}
