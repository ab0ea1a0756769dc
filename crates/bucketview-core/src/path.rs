//! Prefix normalization and first-level entry derivation.

/// Separator used to simulate directories in a flat key space.
pub const SEPARATOR: char = '/';

/// Strip every leading and trailing separator from a caller-supplied path.
///
/// Interior separators are left alone; the empty string denotes the
/// bucket root.
///
/// ```
/// use bucketview_core::path::normalize_prefix;
///
/// assert_eq!(normalize_prefix("/a/b/"), "a/b");
/// assert_eq!(normalize_prefix("//"), "");
/// ```
#[must_use]
pub fn normalize_prefix(path: &str) -> &str {
    path.trim_matches(SEPARATOR)
}

/// Derive the first-level entry of `key` relative to `prefix`.
///
/// The prefix is removed, one separator directly following a non-empty
/// prefix is skipped, and the segment up to the next separator is returned.
/// Keys that do not start with `prefix`, and keys that name the prefix
/// itself (including `prefix/` directory markers), yield `None`.
///
/// The prefix is a plain string filter: `"do"` matches `"docs/a.md"` and
/// yields `"cs"`.
#[must_use]
pub fn first_level_entry<'a>(key: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = key.strip_prefix(prefix)?;
    let rest = if prefix.is_empty() {
        rest
    } else {
        rest.strip_prefix(SEPARATOR).unwrap_or(rest)
    };

    let entry = rest.split(SEPARATOR).next().unwrap_or_default();
    (!entry.is_empty()).then_some(entry)
}
