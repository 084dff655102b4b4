use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::domain::{CardFace, Collection, Entry, FlashError, ReviewSession};

fn collection(n: usize) -> Collection {
    Collection::new(
        (0..n)
            .map(|i| Entry::new(format!("w{}", i), format!("r{}", i), format!("t{}", i)))
            .collect(),
    )
}

fn sorted_words(entries: &[Entry]) -> Vec<String> {
    let mut words: Vec<String> = entries.iter().map(|e| e.word.clone()).collect();
    words.sort();
    words
}

#[test]
fn test_start_is_a_permutation() {
    let c = collection(10);
    for seed in 0..20 {
        let s = ReviewSession::start_with_rng(&c, &mut StdRng::seed_from_u64(seed)).unwrap();
        assert_eq!(s.len(), 10);
        assert_eq!(sorted_words(s.order()), sorted_words(c.entries()));
        assert_eq!(s.position(), 0);
        assert_eq!(s.face(), CardFace::Hidden);
    }
}

#[test]
fn test_start_with_thread_rng_is_a_permutation() {
    let c = collection(5);
    let s = ReviewSession::start(&c).unwrap();
    assert_eq!(sorted_words(s.order()), sorted_words(c.entries()));
}

#[test]
fn test_same_seed_same_order_different_seed_usually_differs() {
    let c = collection(8);
    let a = ReviewSession::start_with_rng(&c, &mut StdRng::seed_from_u64(7)).unwrap();
    let b = ReviewSession::start_with_rng(&c, &mut StdRng::seed_from_u64(7)).unwrap();
    assert_eq!(a.order(), b.order());

    let distinct = (0..10u64)
        .map(|seed| {
            ReviewSession::start_with_rng(&c, &mut StdRng::seed_from_u64(seed))
                .unwrap()
                .order()
                .iter()
                .map(|e| e.word.clone())
                .collect::<Vec<_>>()
        })
        .collect::<std::collections::HashSet<_>>();
    assert!(distinct.len() > 1);
}

#[test]
fn test_advance_n_times_returns_to_start() {
    let c = collection(4);
    let mut s = ReviewSession::start_with_rng(&c, &mut StdRng::seed_from_u64(1)).unwrap();
    let first = s.current().clone();
    let mut seen = Vec::new();
    for _ in 0..4 {
        seen.push(s.current().clone());
        s = s.advance();
    }
    assert_eq!(s.position(), 0);
    assert_eq!(s.current(), &first);
    assert_eq!(sorted_words(&seen), sorted_words(c.entries()));
}

#[test]
fn test_reveal_then_advance_hides_next_card() {
    let c = collection(3);
    let s = ReviewSession::start_with_rng(&c, &mut StdRng::seed_from_u64(2)).unwrap();
    let s = s.reveal();
    assert!(s.is_revealed());
    let s = s.reveal();
    assert_eq!(s.face(), CardFace::Revealed);
    let s = s.advance();
    assert_eq!(s.position(), 1);
    assert!(!s.is_revealed());
}

#[test]
fn test_single_neko_card_scenario() {
    let neko = Entry::new("猫", "ねこ", "chat");
    let c = Collection::new(vec![neko.clone()]);
    let s = ReviewSession::start(&c).unwrap();
    assert_eq!(s.current(), &neko);
    let s = s.reveal();
    assert!(s.is_revealed());
    let s = s.advance();
    assert_eq!(s.position(), 0);
    assert!(!s.is_revealed());
    assert_eq!(s.current(), &neko);
}

#[test]
fn test_empty_collection_is_an_error_not_a_panic() {
    assert!(matches!(
        ReviewSession::start(&Collection::default()),
        Err(FlashError::EmptyCollection)
    ));
    assert!(matches!(
        ReviewSession::reset(&Collection::default()),
        Err(FlashError::EmptyCollection)
    ));
}

#[test]
fn test_session_is_a_snapshot() {
    let c = collection(2);
    let s = ReviewSession::start_with_rng(&c, &mut StdRng::seed_from_u64(3)).unwrap();
    let grown = c.appended(Entry::new("新", "しん", "nouveau"));
    assert_eq!(s.len(), 2);

    let s = ReviewSession::reset_with_rng(&grown, &mut StdRng::seed_from_u64(3)).unwrap();
    assert_eq!(s.len(), 3);
    assert_eq!(s.position(), 0);
    assert!(!s.is_revealed());
}
