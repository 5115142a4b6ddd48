//! Provides a simple Trie implementation for storing `String` keys, each
//! with an associated value.
//!
//! A key is stored as a path of `char` nodes hanging from a single root, so
//! keys which share a prefix share nodes. Compared to a hash map this costs
//! memory per character but answers prefix questions cheaply:
//! [`crate::trie::Trie::common_prefix_iter`] visits only the subtree below
//! the prefix.
//!
//! Iteration is always in lexicographic key order. A trie can be frozen
//! with [`crate::trie::Trie::freeze`], after which every modification
//! fails with [`crate::error::TrieError::Frozen`].
//!
//! Examples:
//! * trie : [`crate::trie`]
//! * iterator : [`crate::iterator`]
//!
//! Typical usages for this data structure:
//!  - Autocomplete
//!  - Routing tables
//!  - Symbol tables
//!  - ...

#[cfg(feature = "serde")]
extern crate serde_crate;

pub mod error;

pub mod iterator;

pub mod trie;

#[cfg(test)]
mod proptests;
