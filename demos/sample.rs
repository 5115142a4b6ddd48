use rand::{distributions::Alphanumeric, thread_rng, Rng};
use strtrie::error::TrieError;
use strtrie::trie::Trie;

fn main() -> Result<(), TrieError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let mut trie = Trie::new();
    trie.store("adc", 100)?;
    trie.store("abc", 200)?;
    trie.store("xyz", 300)?;
    trie.store("def", 400)?;
    trie.store("abcd", 500)?;
    trie.store("abcee", 600)?;

    println!("--- each");
    trie.each(|k, v| println!("{}: {}", k, v));
    println!("--- each_key");
    trie.each_key(|k| println!("{}", k));
    println!("--- each_value");
    trie.each_value(|v| println!("{}", v));
    println!("--- each_with_index");
    trie.each_with_index(|i, k, v| println!("{}. {}: {}", i, k, v));
    println!("--- common_prefix_each");
    trie.common_prefix_each("abc", |k, v| println!("{}: {}", k, v));

    println!("--- remove");
    println!("abc: {:?}", trie.remove("abc")?);
    println!("abcd: {:?}", trie.get("abcd"));

    println!("--- freeze");
    trie.freeze();
    if let Err(e) = trie.insert("ghi", 700) {
        println!("insert failed: {}", e);
    }

    static POPULATION_SIZE: usize = 10;
    static SIZE: usize = 10;

    // Store 10 random strings composed of between 1 and 10
    // characters, then walk them back out in order.
    let mut random = Trie::new();
    let mut searches = vec![];
    for _i in 0..POPULATION_SIZE {
        let entry: String = thread_rng()
            .sample_iter(&Alphanumeric)
            .take(thread_rng().gen_range(1..=SIZE))
            .map(char::from)
            .collect();
        random.insert(&entry, entry.len())?;
        searches.push(entry);
    }
    println!("--- sorted");
    for (key, value) in random.iter() {
        assert!(searches.contains(&key));
        println!("key: {}, value: {}", key, value);
    }
    Ok(())
}
