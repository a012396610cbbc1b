//! Persistence tests for the wordlist store.
//!
//! These tests verify that saved wordlists and share tokens survive a
//! store reopen cycle, and that the save-time invariants hold across the
//! full combine → save → load path.

use wordloom::store::{MAX_SAVED_WORDS, StoreError, WordlistStore};
use wordloom::wordlist::{ChunkResult, CombineOptions, WordPair, combine};

fn combined_pets() -> (Vec<WordPair>, wordloom::wordlist::CombineMetadata) {
    let chunks = vec![
        ChunkResult::new(
            "c0",
            0,
            vec![WordPair::new("cat", "猫"), WordPair::new("dog", "狗")],
        ),
        ChunkResult::new(
            "c1",
            1,
            vec![WordPair::new("CAT", "kitty"), WordPair::new("bird", "鸟")],
        ),
    ];
    let result = combine(&chunks, &CombineOptions::default()).unwrap();
    (result.words, result.metadata)
}

#[test]
fn wordlists_survive_restart() {
    let dir = tempfile::TempDir::new().unwrap();
    let (words, metadata) = combined_pets();

    // First session: combine and save.
    {
        let store = WordlistStore::open(dir.path()).unwrap();
        store.save("pets", &words, &metadata).unwrap();
    }

    // Second session: reopen and verify content and metadata.
    {
        let store = WordlistStore::open(dir.path()).unwrap();
        let saved = store.load("pets").unwrap();
        assert_eq!(saved.words, words);
        assert_eq!(saved.metadata.duplicates_removed, 1);
        assert_eq!(
            saved.metadata.words_before_limit,
            saved.metadata.words_after_limit + saved.metadata.duplicates_removed
        );
    }
}

#[test]
fn share_tokens_survive_restart() {
    let dir = tempfile::TempDir::new().unwrap();
    let (words, metadata) = combined_pets();

    let token = {
        let store = WordlistStore::open(dir.path()).unwrap();
        store.save("pets", &words, &metadata).unwrap();
        store.share("pets").unwrap()
    };

    let store = WordlistStore::open(dir.path()).unwrap();
    let resolved = store.resolve(&token).unwrap();
    assert_eq!(resolved.name, "pets");
    assert_eq!(resolved.words, words);
}

#[test]
fn distinct_tokens_for_repeated_shares() {
    let dir = tempfile::TempDir::new().unwrap();
    let (words, metadata) = combined_pets();
    let store = WordlistStore::open(dir.path()).unwrap();
    store.save("pets", &words, &metadata).unwrap();

    let a = store.share("pets").unwrap();
    let b = store.share("pets").unwrap();
    assert_ne!(a, b);
    assert_eq!(store.resolve(&a).unwrap().name, "pets");
    assert_eq!(store.resolve(&b).unwrap().name, "pets");
}

#[test]
fn removal_cascades_to_tokens_across_restart() {
    let dir = tempfile::TempDir::new().unwrap();
    let (words, metadata) = combined_pets();

    let token = {
        let store = WordlistStore::open(dir.path()).unwrap();
        store.save("pets", &words, &metadata).unwrap();
        let token = store.share("pets").unwrap();
        assert!(store.remove("pets").unwrap());
        token
    };

    let store = WordlistStore::open(dir.path()).unwrap();
    assert!(store.list().unwrap().is_empty());
    assert!(matches!(
        store.resolve(&token).unwrap_err(),
        StoreError::UnknownToken { .. }
    ));
}

#[test]
fn save_cap_is_independent_of_combine_cap() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = WordlistStore::open(dir.path()).unwrap();

    // A combine at max_words = 50 is valid, but exceeds the save cap.
    let chunks = vec![ChunkResult::new(
        "c0",
        0,
        (0..45)
            .map(|i| WordPair::new(format!("word-{i}"), format!("t-{i}")))
            .collect(),
    )];
    let options = CombineOptions {
        max_words: 50,
        ..Default::default()
    };
    let result = combine(&chunks, &options).unwrap();
    assert_eq!(result.words.len(), 45);

    let err = store
        .save("too-big", &result.words, &result.metadata)
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::SaveCap {
            got: 45,
            max: MAX_SAVED_WORDS,
            ..
        }
    ));
}

#[test]
fn list_is_sorted_across_sessions() {
    let dir = tempfile::TempDir::new().unwrap();
    let (words, metadata) = combined_pets();

    {
        let store = WordlistStore::open(dir.path()).unwrap();
        store.save("zoo", &words, &metadata).unwrap();
        store.save("aquarium", &words, &metadata).unwrap();
    }

    let store = WordlistStore::open(dir.path()).unwrap();
    store.save("meadow", &words, &metadata).unwrap();
    assert_eq!(
        store.list().unwrap(),
        vec!["aquarium".to_string(), "meadow".to_string(), "zoo".to_string()]
    );
}
