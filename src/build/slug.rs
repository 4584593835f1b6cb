//! Filename derivation from record titles.
//!
//! A slug is the lowercased title with everything but letters, digits,
//! underscores and hyphens dropped, and whitespace runs collapsed into a
//! single separator. The separator depends on the layout (`-` for card
//! pages, `_` for table pages). Slugging is deterministic and idempotent:
//! slugifying an already-slugified string returns it unchanged.

use std::collections::HashSet;

/// Convert a title to a filename-safe slug using the given separator.
///
/// ```ignore
/// slugify("1. Test Academy", '-') => "1-test-academy"
/// slugify("Test  Academy", '_') => "test_academy"
/// ```
pub fn slugify(text: &str, sep: char) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_sep = false;

    for c in text.to_lowercase().chars() {
        if c.is_whitespace() || c == sep {
            pending_sep = true;
        } else if c.is_alphanumeric() || c == '_' || c == '-' {
            if pending_sep && !slug.is_empty() {
                slug.push(sep);
            }
            pending_sep = false;
            slug.push(c);
        }
        // Other punctuation is dropped without forcing a separator.
    }

    slug
}

/// Strip a leading `N. ` numbering prefix from a title.
///
/// Used for index display only; slugs are derived from the full title so
/// that numbered and unnumbered variants of the same name cannot collide.
pub fn strip_numbering(title: &str) -> &str {
    let digits = title.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return title;
    }
    match title[digits..].strip_prefix('.') {
        Some(rest) => rest.trim_start(),
        None => title,
    }
}

/// Reserve a unique slug, suffixing `2`, `3`, ... on collision.
///
/// Distinct titles can slugify identically (punctuation-only differences).
/// Rather than silently overwrite one page with another, later records get
/// a numbered suffix; the caller is expected to warn.
pub fn unique_slug(base: &str, sep: char, used: &mut HashSet<String>) -> String {
    if used.insert(base.to_string()) {
        return base.to_string();
    }

    let mut n = 2;
    loop {
        let candidate = format!("{base}{sep}{n}");
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}
