//! Composite-key encoding for secondary indexes.
//!
//! Natural-key lookups are served by index rows of the form
//! `(index-name, field values…, record-id) → sentinel`. Encoding the
//! index name and every field with a `\u{0}` separator makes a prefix
//! built from the leading fields match exactly the rows that share them.

/// Value stored under every index row. The row's existence is the datum.
pub const SENTINEL: &[u8] = &[0x00];

const SEP: char = '\u{0}';

/// Build a composite key from an index name and its field values.
///
/// A trailing separator is always appended so that a prefix over complete
/// fields never matches rows where a field merely starts with the prefix
/// text (`["ab"]` must not match `["abc", …]`).
#[must_use]
pub fn composite_key(index: &str, parts: &[&str]) -> String {
    let mut key = String::with_capacity(
        1 + index.len() + parts.iter().map(|p| p.len() + 1).sum::<usize>(),
    );
    key.push(SEP);
    key.push_str(index);
    for part in parts {
        key.push(SEP);
        key.push_str(part);
    }
    key.push(SEP);
    key
}

/// Prefix matching every row of `index` whose leading fields equal `parts`.
/// The trailing separator of [`composite_key`] makes the encoded key
/// itself the correct prefix, including the zero-field case.
#[must_use]
pub fn composite_prefix(index: &str, parts: &[&str]) -> String {
    composite_key(index, parts)
}

/// Split a composite key back into its field values (index name excluded).
#[must_use]
pub fn split_composite_key(key: &str) -> Vec<String> {
    key.split(SEP)
        .filter(|s| !s.is_empty())
        .skip(1) // index name
        .map(str::to_string)
        .collect()
}

/// The final field of a composite key, by convention the record id.
#[must_use]
pub fn last_part(key: &str) -> Option<String> {
    split_composite_key(key).pop()
}
