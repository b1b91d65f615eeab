//! Core types for bucket-tree.
//!
//! This crate provides the in-memory model and the pure algorithms over it:
//! - [`FileObject`] - A folder or file node in a reconstructed bucket tree
//! - [`parse_key`] / [`split_name`] - Object key parsing
//! - [`TreeBuilder`] / [`FlatListBuilder`] - Folding object keys into a tree

pub mod file_object;
pub mod key;
pub mod tree;

pub use file_object::*;
pub use key::*;
pub use tree::*;
