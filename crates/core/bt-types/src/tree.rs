//! Folding object keys into a [`FileObject`] tree.
//!
//! Two shapes are supported:
//! - [`TreeBuilder`] nests nodes by path segment, creating intermediate
//!   folder nodes on demand.
//! - [`FlatListBuilder`] appends one node per key directly under the root,
//!   recording the full key in `url`.

use crate::file_object::FileObject;
use crate::key::{parse_key, split_name};

/// Insert a path of segments below `root`, creating missing nodes.
///
/// Each segment is matched against existing children ignoring case; a
/// missing child is appended, so child order is first-insertion order.
pub fn insert<'a, I>(root: &mut FileObject, segments: I)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut node = root;

    for segment in segments {
        let parsed = split_name(segment);

        let index = match node.files.iter().position(|child| child.matches(&parsed)) {
            Some(index) => index,
            None => {
                node.files.push(FileObject::from_segment(parsed));
                node.files.len() - 1
            }
        };

        node = &mut node.files[index];
    }
}

/// Builds a nested tree from a sequence of object keys.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    root: FileObject,
    inserted: usize,
    skipped: usize,
}

impl TreeBuilder {
    /// Create a builder with an empty root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an object key. Returns false if the key was skipped.
    pub fn insert_key(&mut self, key: &str) -> bool {
        match parse_key(key) {
            Some(parsed) => {
                insert(&mut self.root, parsed.segments);
                self.inserted += 1;
                true
            }
            None => {
                self.skipped += 1;
                false
            }
        }
    }

    /// Number of keys inserted so far.
    pub fn inserted(&self) -> usize {
        self.inserted
    }

    /// Number of keys skipped (folder markers, empty keys).
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Consume the builder and return the tree.
    pub fn finish(self) -> FileObject {
        self.root
    }
}

/// Builds a flat listing: one child of the root per object key.
///
/// Only the final segment is parsed for name and extension; keys are
/// not merged, even when their names collide.
#[derive(Debug, Default)]
pub struct FlatListBuilder {
    root: FileObject,
    skipped: usize,
}

impl FlatListBuilder {
    /// Create a builder with an empty root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an object key. Returns false if the key was skipped.
    pub fn insert_key(&mut self, key: &str) -> bool {
        match parse_key(key) {
            Some(parsed) => {
                self.root
                    .files
                    .push(FileObject::from_segment(parsed.file).with_url(key));
                true
            }
            None => {
                self.skipped += 1;
                false
            }
        }
    }

    /// Number of keys appended so far.
    pub fn inserted(&self) -> usize {
        self.root.files.len()
    }

    /// Number of keys skipped (folder markers, empty keys).
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Consume the builder and return the listing.
    pub fn finish(self) -> FileObject {
        self.root
    }
}
