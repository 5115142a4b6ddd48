use crate::error::TrieError;
use crate::trie::{Node, Trie};

use proptest::prelude::*;
use std::collections::BTreeMap;

fn validate_trie<V>(t: &Trie<V>) {
    let mut stack: Vec<&Node<V>> = vec![&t.root];
    let mut terminal_count = 0usize;

    while let Some(node) = stack.pop() {
        if node.value.is_some() {
            terminal_count += 1;
        }
        if !std::ptr::eq(node, &t.root) {
            assert!(
                node.value.is_some() || !node.children.is_empty(),
                "node '{}' has neither value nor children",
                node.atom
            );
        }
        assert!(
            node.children.windows(2).all(|w| w[0].atom < w[1].atom),
            "children must be sorted and unique"
        );
        stack.extend(node.children.iter());
    }

    assert_eq!(
        terminal_count,
        t.len(),
        "terminal node count must match Trie::len"
    );
}

#[derive(Clone, Debug)]
enum Op {
    Insert(String, u64),
    Remove(String),
    Get(String),
    Prefix(String),
}

fn key_strategy() -> impl Strategy<Value = String> + Clone {
    // A small alphabet keeps keys colliding and sharing prefixes.
    "[a-d]{0,6}"
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let key = key_strategy();
    let op = prop_oneof![
        50 => (key.clone(), any::<u64>()).prop_map(|(k, v)| Op::Insert(k, v)),
        25 => key.clone().prop_map(Op::Remove),
        15 => key.clone().prop_map(Op::Get),
        10 => key.prop_map(Op::Prefix),
    ];
    prop::collection::vec(op, 0..=400)
}

fn model_prefix(model: &BTreeMap<String, u64>, prefix: &str) -> Vec<(String, u64)> {
    model
        .range(prefix.to_string()..)
        .take_while(|(k, _)| k.starts_with(prefix))
        .map(|(k, v)| (k.clone(), *v))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_matches_btreemap(ops in ops_strategy()) {
        let mut trie = Trie::new();
        let mut model = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    let got = trie.insert(&k, v);
                    prop_assert_eq!(got, Ok(model.insert(k, v)));
                }
                Op::Remove(k) => {
                    let got = trie.remove(&k);
                    prop_assert_eq!(got, Ok(model.remove(&k)));
                }
                Op::Get(k) => {
                    prop_assert_eq!(trie.get(&k), model.get(&k));
                }
                Op::Prefix(p) => {
                    let got: Vec<(String, u64)> =
                        trie.common_prefix_iter(&p).map(|(k, v)| (k, *v)).collect();
                    prop_assert_eq!(got, model_prefix(&model, &p));
                }
            }
            validate_trie(&trie);
        }

        prop_assert_eq!(trie.len(), model.len());
        let entries: Vec<(String, u64)> = trie.iter().map(|(k, v)| (k, *v)).collect();
        prop_assert_eq!(entries, model.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn prop_remove_undoes_insert(
        keys in prop::collection::vec(key_strategy(), 0..=50),
        extra in key_strategy(),
    ) {
        let mut trie: Trie<usize> = keys.iter().map(|k| (k, k.len())).collect();
        prop_assume!(!trie.contains_key(&extra));
        let before = trie.clone();

        trie.insert(&extra, 0).unwrap();
        prop_assert_eq!(trie.len(), before.len() + 1);
        prop_assert_eq!(trie.remove(&extra), Ok(Some(0)));
        prop_assert_eq!(trie.get(&extra), None);
        // Pruning leaves exactly the structure we started with.
        prop_assert_eq!(&trie, &before);
    }

    #[test]
    fn prop_frozen_trie_is_unchanged(
        keys in prop::collection::vec(key_strategy(), 0..=50),
        ops in ops_strategy(),
    ) {
        let mut trie: Trie<u64> = keys.iter().map(|k| (k, 1)).collect();
        trie.freeze();
        let before = trie.clone();

        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    prop_assert_eq!(trie.insert(&k, v), Err(TrieError::Frozen));
                }
                Op::Remove(k) => {
                    prop_assert_eq!(trie.remove(&k), Err(TrieError::Frozen));
                }
                Op::Get(k) => {
                    prop_assert_eq!(trie.get(&k), before.get(&k));
                }
                Op::Prefix(p) => {
                    prop_assert_eq!(
                        trie.common_prefix_iter(&p).count(),
                        before.common_prefix_iter(&p).count()
                    );
                }
            }
        }
        prop_assert_eq!(&trie, &before);
        prop_assert_eq!(trie.len(), before.len());
    }
}
