//! Comma-joined id list codec.
//!
//! # Design
//! - Ids are opaque tokens; segments are never trimmed or parsed as numbers.
//! - Empty segments are dropped so `""` and `"a,,b"` decode cleanly.
//! - `split` keeps order and duplicates for wire bodies, `decode` yields a set.

use std::collections::BTreeSet;

/// Separator between ids in attribute and flag values.
pub const DELIMITER: char = ',';

/// Join ids with [`DELIMITER`].
#[must_use]
pub fn encode<I, S>(ids: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for (index, id) in ids.into_iter().enumerate() {
        if index > 0 {
            out.push(DELIMITER);
        }
        out.push_str(id.as_ref());
    }
    out
}

/// Split a raw list into its ordered, non-empty segments.
#[must_use]
pub fn split(raw: &str) -> Vec<String> {
    raw.split(DELIMITER)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Decode a raw list into a set of ids.
#[must_use]
pub fn decode(raw: &str) -> BTreeSet<String> {
    raw.split(DELIMITER)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}
