//! Provides Trie iterators.
//!
//! Every iterator walks the trie depth first, visiting a node before its
//! children and children in `char` order, so keys come out sorted.
//! Keys are rebuilt from the path as the walk descends.
//!
use std::iter::FusedIterator;

use crate::trie::{Node, Trie};

#[derive(Debug)]
struct NodeRef<'a, V>(&'a Node<V>, usize);

/// Depth first walk over the terminal nodes below (and including) a
/// starting node. The key of the last value returned is kept in `key`.
#[derive(Debug)]
pub(crate) struct Walker<'a, V> {
    nodes: Vec<NodeRef<'a, V>>,
    key: String,
    pending: Option<&'a V>,
}

impl<'a, V> Walker<'a, V> {
    pub(crate) fn new(start: Option<&'a Node<V>>, prefix: &str) -> Self {
        match start {
            Some(node) => Self {
                nodes: vec![NodeRef(node, 0)],
                key: prefix.to_string(),
                pending: node.value.as_ref(),
            },
            None => Self {
                nodes: vec![],
                key: String::new(),
                pending: None,
            },
        }
    }

    pub(crate) fn key(&self) -> &str {
        &self.key
    }

    pub(crate) fn advance(&mut self) -> Option<&'a V> {
        if let Some(value) = self.pending.take() {
            return Some(value);
        }
        loop {
            let top = self.nodes.last_mut()?;
            let node = top.0;
            match node.children.get(top.1) {
                Some(child) => {
                    top.1 += 1;
                    self.key.push(child.atom);
                    self.nodes.push(NodeRef(child, 0));
                    if let Some(value) = child.value.as_ref() {
                        return Some(value);
                    }
                }
                None => {
                    self.nodes.pop();
                    // The starting node contributes no atom to the key.
                    if !self.nodes.is_empty() {
                        self.key.pop();
                    }
                }
            }
        }
    }
}

/// Iterator over the entries of a Trie.
#[derive(Debug)]
pub struct Iter<'a, V> {
    walker: Walker<'a, V>,
    remaining: usize,
}

impl<'a, V> Iter<'a, V> {
    pub(crate) fn new(root: &'a Node<V>, len: usize) -> Self {
        Self {
            walker: Walker::new(Some(root), ""),
            remaining: len,
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (String, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.walker.advance()?;
        self.remaining = self.remaining.saturating_sub(1);
        Some((self.walker.key().to_string(), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}

/// Iterator over the keys of a Trie.
#[derive(Debug)]
pub struct Keys<'a, V>(Iter<'a, V>);

impl<'a, V> Keys<'a, V> {
    pub(crate) fn new(iter: Iter<'a, V>) -> Self {
        Self(iter)
    }
}

impl<V> Iterator for Keys<'_, V> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<V> ExactSizeIterator for Keys<'_, V> {}

impl<V> FusedIterator for Keys<'_, V> {}

/// Iterator over the values of a Trie, in key order.
#[derive(Debug)]
pub struct Values<'a, V> {
    walker: Walker<'a, V>,
    remaining: usize,
}

impl<'a, V> Values<'a, V> {
    pub(crate) fn new(root: &'a Node<V>, len: usize) -> Self {
        Self {
            walker: Walker::new(Some(root), ""),
            remaining: len,
        }
    }
}

impl<'a, V> Iterator for Values<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.walker.advance()?;
        self.remaining = self.remaining.saturating_sub(1);
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Values<'_, V> {}

impl<V> FusedIterator for Values<'_, V> {}

/// Iterator over the entries of a Trie whose keys share a prefix.
#[derive(Debug)]
pub struct PrefixIter<'a, V> {
    walker: Walker<'a, V>,
}

impl<'a, V> PrefixIter<'a, V> {
    pub(crate) fn new(start: Option<&'a Node<V>>, prefix: &str) -> Self {
        Self {
            walker: Walker::new(start, prefix),
        }
    }
}

impl<'a, V> Iterator for PrefixIter<'a, V> {
    type Item = (String, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.walker.advance()?;
        Some((self.walker.key().to_string(), value))
    }
}

impl<V> FusedIterator for PrefixIter<'_, V> {}

/// Consuming iterator over a Trie.
#[derive(Debug)]
pub struct TrieIntoIterator<V> {
    nodes: Vec<std::vec::IntoIter<Node<V>>>,
    key: String,
    pending: Option<V>,
    remaining: usize,
}

impl<V> IntoIterator for Trie<V> {
    type Item = (String, V);
    type IntoIter = TrieIntoIterator<V>;

    fn into_iter(self) -> Self::IntoIter {
        let remaining = self.len();
        let Node {
            value, children, ..
        } = self.root;
        TrieIntoIterator {
            nodes: vec![children.into_iter()],
            key: String::new(),
            pending: value,
            remaining,
        }
    }
}

impl<V> Iterator for TrieIntoIterator<V> {
    type Item = (String, V);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(value) = self.pending.take() {
            self.remaining = self.remaining.saturating_sub(1);
            return Some((String::new(), value));
        }
        loop {
            let top = self.nodes.last_mut()?;
            match top.next() {
                Some(Node {
                    atom,
                    value,
                    children,
                }) => {
                    self.key.push(atom);
                    self.nodes.push(children.into_iter());
                    if let Some(value) = value {
                        self.remaining = self.remaining.saturating_sub(1);
                        return Some((self.key.clone(), value));
                    }
                }
                None => {
                    self.nodes.pop();
                    if !self.nodes.is_empty() {
                        self.key.pop();
                    }
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for TrieIntoIterator<V> {}

impl<V> FusedIterator for TrieIntoIterator<V> {}

impl<'a, V> IntoIterator for &'a Trie<V> {
    type Item = (String, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
