//! Provides a Trie keyed by strings. Each `char` of a key is stored as an
//! individual node and a key may have an associated value.
//!
//! Keys which share a prefix share the nodes for that prefix. That makes
//! questions like "which keys start with `ab`?" cost time proportional to
//! the prefix plus the matching subtree, rather than a scan over every
//! stored key.
//!
//! Children of a node are kept sorted by `char`, so every traversal
//! returns keys in lexicographic (code point) order. The price is a
//! binary search per character on lookup instead of a hash probe.
//!
//! The empty string is a valid key. Its value lives on the root node.
//!
//! Example 1
//! ```
//! use strtrie::trie::Trie;
//!
//! let mut trie = Trie::new();
//! trie.insert("abc", 100).unwrap();
//! trie.insert("adc", 200).unwrap();
//! trie.insert("abcd", 500).unwrap();
//!
//! assert_eq!(trie.len(), 3);
//! assert_eq!(trie.get("abc"), Some(&100));
//! // "ab" is a path through the trie but nothing is stored there
//! assert_eq!(trie.get("ab"), None);
//! assert!(trie.contains_prefix("ab"));
//!
//! assert_eq!(trie.remove("abc").unwrap(), Some(100));
//! assert_eq!(trie.get("abcd"), Some(&500));
//! assert_eq!(trie.len(), 2);
//! ```
//!
//! Example 2
//! ```
//! use strtrie::trie::Trie;
//!
//! let trie: Trie<usize> = ["romane", "romanus", "romulus", "rubens"]
//!     .iter()
//!     .map(|w| (w, w.len()))
//!     .collect();
//!
//! let matches: Vec<(String, &usize)> = trie.common_prefix_iter("rom").collect();
//! assert_eq!(
//!     matches,
//!     vec![
//!         ("romane".to_string(), &6),
//!         ("romanus".to_string(), &7),
//!         ("romulus".to_string(), &7),
//!     ]
//! );
//! ```
//!
//! Example 3
//! ```
//! use strtrie::error::TrieError;
//! use strtrie::trie::Trie;
//!
//! let mut trie = Trie::new();
//! *trie.store("hits", 1).unwrap() += 1;
//! trie.freeze();
//!
//! assert_eq!(trie.insert("misses", 0), Err(TrieError::Frozen));
//! assert_eq!(trie.remove("hits"), Err(TrieError::Frozen));
//! assert_eq!(trie.get("hits"), Some(&2));
//! ```

use std::iter::Enumerate;

use tracing::{debug, trace};

use crate::error::{Result, TrieError};
use crate::iterator::{Iter, Keys, PrefixIter, Values, Walker};

#[cfg(feature = "serde")]
use crate::error::InvalidTrie;
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub(crate) struct Node<V> {
    pub(crate) atom: char,
    pub(crate) value: Option<V>,
    // Sorted by atom.
    pub(crate) children: Vec<Node<V>>,
}

/// Stores string keys as paths of `char` nodes.
///
/// With the `serde` feature, deserialization checks the node structure
/// and recounts the stored keys rather than trusting the serialized `len`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", try_from = "RawTrie<V>")
)]
pub struct Trie<V> {
    pub(crate) root: Node<V>,
    len: usize,
    frozen: bool,
}

// Unchecked shape of a serialized Trie. Any `len` field is ignored.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
#[serde(crate = "serde_crate")]
struct RawTrie<V> {
    root: Node<V>,
    frozen: bool,
}

#[cfg(feature = "serde")]
impl<V> TryFrom<RawTrie<V>> for Trie<V> {
    type Error = InvalidTrie;

    fn try_from(raw: RawTrie<V>) -> std::result::Result<Self, Self::Error> {
        let len = raw.root.count_terminals()?;
        Ok(Self {
            root: raw.root,
            len,
            frozen: raw.frozen,
        })
    }
}

impl<V> Node<V> {
    fn new(atom: char) -> Self {
        Self {
            atom,
            value: None,
            children: Vec::new(),
        }
    }

    fn root() -> Self {
        Self::new('\0')
    }

    fn search(&self, atom: char) -> std::result::Result<usize, usize> {
        self.children.binary_search_by(|n| n.atom.cmp(&atom))
    }

    pub(crate) fn child(&self, atom: char) -> Option<&Node<V>> {
        self.search(atom).ok().map(|idx| &self.children[idx])
    }

    fn child_or_insert(&mut self, atom: char) -> &mut Node<V> {
        let idx = match self.search(atom) {
            Ok(idx) => idx,
            Err(idx) => {
                self.children.insert(idx, Node::new(atom));
                idx
            }
        };
        &mut self.children[idx]
    }

    // Count the values at or below this node, treated as the root, and
    // reject shapes the trie never builds itself.
    #[cfg(feature = "serde")]
    fn count_terminals(&self) -> std::result::Result<usize, InvalidTrie> {
        let mut stack = vec![(self, String::new())];
        let mut count = 0;
        while let Some((node, key)) = stack.pop() {
            if node.value.is_some() {
                count += 1;
            } else if node.children.is_empty() && !std::ptr::eq(node, self) {
                return Err(InvalidTrie::EmptyNode(key));
            }
            if node.children.windows(2).any(|w| w[0].atom >= w[1].atom) {
                return Err(InvalidTrie::UnsortedChildren(key));
            }
            for child in &node.children {
                let mut child_key = key.clone();
                child_key.push(child.atom);
                stack.push((child, child_key));
            }
        }
        Ok(count)
    }
}

impl<V> Default for Trie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Trie<V> {
    /// Create a new, empty and unfrozen Trie.
    pub fn new() -> Self {
        Self {
            root: Node::root(),
            len: 0,
            frozen: false,
        }
    }

    /// Clear the Trie.
    pub fn clear(&mut self) -> Result<()> {
        self.check_mutable("clear")?;
        self.root = Node::root();
        self.len = 0;
        Ok(())
    }

    /// Does the Trie contain the supplied key?
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Does any stored key start with the supplied prefix?
    pub fn contains_prefix(&self, prefix: &str) -> bool {
        self.find(prefix).is_some()
    }

    /// How many keys does the Trie contain?
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Is the Trie empty?
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get a reference to a key's associated value.
    ///
    /// A key which is only a prefix of stored keys has no value and
    /// returns `None`.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.find(key).and_then(|n| n.value.as_ref())
    }

    /// Insert the key and value, returning a reference to the stored
    /// value. An existing value for the key is overwritten.
    pub fn store(&mut self, key: &str, value: V) -> Result<&mut V> {
        self.check_mutable("store")?;
        Ok(self.put(key, value).1)
    }

    /// Insert the key and value into the Trie. If the key is already present
    /// the value is updated to the new value. Returns the previously
    /// associated value.
    pub fn insert(&mut self, key: &str, value: V) -> Result<Option<V>> {
        self.check_mutable("insert")?;
        Ok(self.put(key, value).0)
    }

    /// Remove the key from the Trie, returning its value if it was stored.
    ///
    /// Nodes left with neither a value nor children are dropped, up to the
    /// nearest ancestor which still holds a value or another branch.
    pub fn remove(&mut self, key: &str) -> Result<Option<V>> {
        self.check_mutable("remove")?;

        // Child index taken at each depth, and the depth of the deepest
        // node which must survive if the terminal node becomes empty.
        let mut path = Vec::new();
        let mut keep = 0;
        let mut node = &self.root;
        for (depth, atom) in key.chars().enumerate() {
            if node.value.is_some() || node.children.len() > 1 {
                keep = depth;
            }
            match node.search(atom) {
                Ok(idx) => {
                    path.push(idx);
                    node = &node.children[idx];
                }
                Err(_) => return Ok(None),
            }
        }
        if node.value.is_none() {
            return Ok(None);
        }
        let prune = node.children.is_empty() && !path.is_empty();

        let mut node = &mut self.root;
        for &idx in &path {
            node = &mut node.children[idx];
        }
        let value = node.value.take();
        self.len -= 1;

        if prune {
            let mut node = &mut self.root;
            for &idx in &path[..keep] {
                node = &mut node.children[idx];
            }
            node.children.remove(path[keep]);
            trace!(key, nodes = path.len() - keep, "pruned branch");
        }
        Ok(value)
    }

    /// Forbid any further modification. There is no way back.
    pub fn freeze(&mut self) {
        if !self.frozen {
            debug!(len = self.len, "freezing trie");
        }
        self.frozen = true;
    }

    /// Has [`Trie::freeze`] been called?
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Create an iterator over the Trie. Keys are returned in
    /// lexicographic order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(&self.root, self.len)
    }

    /// Create an iterator over the keys of the Trie.
    pub fn keys(&self) -> Keys<'_, V> {
        Keys::new(self.iter())
    }

    /// Create an iterator over the values of the Trie.
    pub fn values(&self) -> Values<'_, V> {
        Values::new(&self.root, self.len)
    }

    /// Create an iterator which pairs each entry with its position in
    /// the traversal.
    pub fn indexed(&self) -> Enumerate<Iter<'_, V>> {
        self.iter().enumerate()
    }

    /// Create an iterator over every entry whose key starts with `prefix`.
    /// The entry for `prefix` itself is included when present.
    pub fn common_prefix_iter(&self, prefix: &str) -> PrefixIter<'_, V> {
        PrefixIter::new(self.find(prefix), prefix)
    }

    /// Visit every entry in order.
    pub fn each<F: FnMut(&str, &V)>(&self, mut visit: F) {
        let mut walker = Walker::new(Some(&self.root), "");
        while let Some(value) = walker.advance() {
            visit(walker.key(), value);
        }
    }

    /// Visit every key in order.
    pub fn each_key<F: FnMut(&str)>(&self, mut visit: F) {
        self.each(|key, _| visit(key));
    }

    /// Visit every value in key order.
    pub fn each_value<F: FnMut(&V)>(&self, mut visit: F) {
        self.each(|_, value| visit(value));
    }

    /// Visit every entry in order along with its zero based position.
    pub fn each_with_index<F: FnMut(usize, &str, &V)>(&self, mut visit: F) {
        let mut idx = 0;
        self.each(|key, value| {
            visit(idx, key, value);
            idx += 1;
        });
    }

    /// Visit every entry whose key starts with `prefix`.
    pub fn common_prefix_each<F: FnMut(&str, &V)>(&self, prefix: &str, mut visit: F) {
        let mut walker = Walker::new(self.find(prefix), prefix);
        while let Some(value) = walker.advance() {
            visit(walker.key(), value);
        }
    }

    pub(crate) fn find(&self, key: &str) -> Option<&Node<V>> {
        key.chars().try_fold(&self.root, |node, atom| node.child(atom))
    }

    fn check_mutable(&self, op: &'static str) -> Result<()> {
        if self.frozen {
            debug!(op, "rejected modification of frozen trie");
            return Err(TrieError::Frozen);
        }
        Ok(())
    }

    // Returns the previous value and a reference to the new one.
    fn put(&mut self, key: &str, value: V) -> (Option<V>, &mut V) {
        let mut node = &mut self.root;
        for atom in key.chars() {
            node = node.child_or_insert(atom);
        }
        let previous = node.value.take();
        if previous.is_none() {
            self.len += 1;
        }
        (previous, node.value.insert(value))
    }
}

impl<K: AsRef<str>, V> FromIterator<(K, V)> for Trie<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut trie = Trie::new();
        for (key, value) in iter {
            trie.put(key.as_ref(), value);
        }
        trie
    }
}
