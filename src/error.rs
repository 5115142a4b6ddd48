//! Errors returned by mutating [`crate::trie::Trie`] operations.
//!
//! A missing key is not an error: lookups and removals report it as
//! `None`. The only hard failure is an attempt to modify a trie after
//! [`crate::trie::Trie::freeze`] has been called.

use thiserror::Error;

#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrieError {
    #[error("can't modify frozen trie")]
    Frozen,
}

pub type Result<T> = std::result::Result<T, TrieError>;

/// Reasons a serialized trie is refused on deserialization. The key
/// names the path to the offending node.
#[cfg(feature = "serde")]
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum InvalidTrie {
    #[error("children of node {0:?} are not sorted and unique")]
    UnsortedChildren(String),
    #[error("node {0:?} has neither value nor children")]
    EmptyNode(String),
}
