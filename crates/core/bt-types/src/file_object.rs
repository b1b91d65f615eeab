//! Tree node type for reconstructed bucket listings.

use serde::{Deserialize, Serialize};

use crate::key::SegmentName;

/// A node in a reconstructed bucket tree.
///
/// A node is either a folder (it has children and no extension) or a
/// file leaf. The root of a tree has no name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileObject {
    /// Name of the node, without its extension. `None` only on the root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Extension of a file leaf (`"txt"` for `notes.txt`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,

    /// Full object key, set on entries of a flat listing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Child nodes in first-insertion order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileObject>,
}

impl FileObject {
    /// Creates an empty, unnamed root node.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a named node with an optional extension.
    pub fn new(name: impl Into<String>, extension: Option<String>) -> Self {
        Self {
            name: Some(name.into()),
            extension,
            ..Default::default()
        }
    }

    /// Creates a node from a parsed key segment.
    pub fn from_segment(segment: SegmentName<'_>) -> Self {
        Self::new(segment.name, segment.extension.map(str::to_string))
    }

    /// Set the object key this node was listed from.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Returns true if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.files.is_empty()
    }

    /// Returns true if this node is the unnamed root.
    pub fn is_root(&self) -> bool {
        self.name.is_none()
    }

    /// Returns true if this node stands for `segment`.
    ///
    /// Only the name is compared, ignoring ASCII case. Siblings are unique
    /// by name, so `c.txt`, `c.csv` and `C` all resolve to one node.
    pub fn matches(&self, segment: &SegmentName<'_>) -> bool {
        self.name
            .as_deref()
            .is_some_and(|name| name.eq_ignore_ascii_case(segment.name))
    }

    /// Find a direct child by name, ignoring case and extension.
    pub fn child_named(&self, name: &str) -> Option<&FileObject> {
        self.files.iter().find(|child| {
            child
                .name
                .as_deref()
                .is_some_and(|n| n.eq_ignore_ascii_case(name))
        })
    }

    /// Count the leaf nodes below this node.
    pub fn leaf_count(&self) -> usize {
        self.files
            .iter()
            .map(|child| {
                if child.is_leaf() {
                    1
                } else {
                    child.leaf_count()
                }
            })
            .sum()
    }

    /// Display form of the node name, re-attaching the extension.
    pub fn display_name(&self) -> String {
        match (&self.name, &self.extension) {
            (Some(name), Some(ext)) => format!("{name}.{ext}"),
            (Some(name), None) => name.clone(),
            (None, _) => String::new(),
        }
    }
}
