//! Object key parsing.
//!
//! Keys are split on `/` into path segments. The final segment is split on
//! `.` into a name and an extension, keeping only the first two parts:
//! `2024.01.report.csv` parses as name `2024`, extension `01`.

/// Separator between path segments of an object key.
pub const PATH_SEPARATOR: char = '/';

/// Separator between a segment name and its extension.
pub const EXTENSION_SEPARATOR: char = '.';

/// A key segment split into name and extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentName<'a> {
    /// Text before the first `.`
    pub name: &'a str,

    /// Text between the first and second `.`, if non-empty
    pub extension: Option<&'a str>,
}

/// A parsed object key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedKey<'a> {
    /// All path segments, the final one included
    pub segments: Vec<&'a str>,

    /// Name and extension of the final segment
    pub file: SegmentName<'a>,
}

/// Returns true if the key is a folder marker (ends in `/`).
pub fn is_folder_marker(key: &str) -> bool {
    key.ends_with(PATH_SEPARATOR)
}

/// Split a single segment into name and extension.
///
/// Parts after the second `.` are dropped. An empty extension
/// (`"file."`) is reported as absent.
pub fn split_name(segment: &str) -> SegmentName<'_> {
    let mut parts = segment.split(EXTENSION_SEPARATOR);
    let name = parts.next().unwrap_or_default();
    let extension = parts.next().filter(|ext| !ext.is_empty());

    SegmentName { name, extension }
}

/// Parse an object key into its segments and final name.
///
/// Returns `None` for folder markers and empty keys; those never
/// become nodes.
pub fn parse_key(key: &str) -> Option<ParsedKey<'_>> {
    if key.is_empty() || is_folder_marker(key) {
        return None;
    }

    let segments: Vec<&str> = key.split(PATH_SEPARATOR).collect();
    // split always yields at least one segment
    let last = segments.last().copied().unwrap_or(key);

    Some(ParsedKey {
        file: split_name(last),
        segments,
    })
}
