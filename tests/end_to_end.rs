//! End-to-end behavior of the DAWG × Levenshtein automaton search.

use levendict::prelude::*;
use std::collections::HashSet;

fn matches(words: &[&str], query: &str, tolerance: usize) -> HashSet<String> {
    Dawg::from_terms(words)
        .query(query, tolerance)
        .unwrap()
        .collect()
}

fn set(words: &[&str]) -> HashSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}

#[test]
fn empty_word_and_single_letter() {
    assert_eq!(matches(&["", "a"], "b", 1), set(&["", "a"]));
}

#[test]
fn close_neighbor_found_far_one_not() {
    assert_eq!(matches(&["foo", "bar"], "baz", 1), set(&["bar"]));
    // "foo" stays at distance 3
    assert_eq!(matches(&["foo", "bar"], "baz", 2), set(&["bar"]));
}

#[test]
fn widening_tolerance_reaches_the_whole_dictionary() {
    let words = ["this", "that", "other"];
    assert_eq!(matches(&words, "the", 1), set(&[]));
    assert_eq!(matches(&words, "the", 2), set(&words));
}

#[test]
fn insertion_after_long_common_prefix() {
    assert_eq!(matches(&["abtrbtz"], "abtrtz", 1), set(&["abtrbtz"]));
}

#[test]
fn two_edit_neighbors() {
    let words = ["meter", "otter", "potter"];
    assert_eq!(matches(&words, "mutter", 1), set(&[]));
    assert_eq!(matches(&words, "mutter", 2), set(&words));
}

#[test]
fn alternating_letters() {
    let words = ["ababa", "babab"];
    assert_eq!(matches(&words, "abba", 3), set(&words));
}

#[test]
fn empty_query_reaches_words_up_to_tolerance_length() {
    let words = ["", "a", "ab", "abc", "abcd"];
    assert_eq!(matches(&words, "", 2), set(&["", "a", "ab"]));
    assert_eq!(matches(&words, "", 0), set(&[""]));
}

#[test]
fn empty_dictionary_accepts_only_empty_word() {
    let dawg = Dawg::from_terms(Vec::<String>::new());
    assert!(dawg.contains(""));

    let found: Vec<String> = dawg.query("", 0).unwrap().collect();
    assert_eq!(found, vec![""]);

    let none: Vec<String> = dawg.query("xyz", 1).unwrap().collect();
    assert!(none.is_empty());
}

#[test]
fn zero_tolerance_is_membership() {
    let words = ["alpha", "beta", "gamma"];
    assert_eq!(matches(&words, "beta", 0), set(&["beta"]));
    assert_eq!(matches(&words, "betb", 0), set(&[]));
}

#[test]
fn tolerance_limits() {
    let dawg = Dawg::from_terms(["word"]);
    assert!(dawg.query("word", 15).is_ok());
    assert!(matches!(
        dawg.query("word", 16),
        Err(Error::ToleranceOutOfRange { tolerance: 16 })
    ));
    assert_eq!(MAX_TOLERANCE, 15);
}

#[test]
fn yield_order_is_length_then_lexicographic() {
    let words = ["bb", "ba", "b", "a", "aaa", "ab"];
    let found: Vec<String> = Dawg::from_terms(words).query("a", 2).unwrap().collect();
    assert_eq!(found, vec!["a", "b", "ab", "ba", "bb", "aaa"]);
}

#[test]
fn yield_order_is_stable_across_runs() {
    let words = ["cart", "card", "care", "cars", "cat", "car"];
    let dawg = Dawg::from_terms(words);

    let first: Vec<String> = dawg.query("car", 1).unwrap().collect();
    let second: Vec<String> = dawg.query("car", 1).unwrap().collect();
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn unicode_queries_count_code_points() {
    let words = ["naïve", "naive", "nave"];
    assert_eq!(matches(&words, "naïve", 0), set(&["naïve"]));
    assert_eq!(matches(&words, "naïve", 1), set(&["naïve", "naive", "nave"]));
}

#[test]
fn membership_is_exact() {
    let words = ["sun", "sund", "sunday", "monday"];
    let dawg = Dawg::from_terms(words);

    for word in words {
        assert!(dawg.contains(word), "{word} should be accepted");
    }

    for non_word in ["s", "su", "sunda", "mond", "tuesday", ""] {
        assert!(!dawg.contains(non_word), "{non_word} should be rejected");
    }
}

#[test]
fn dawg_is_minimal() {
    let words = [
        "deciding", "deciding", "decide", "decided", "riding", "ride", "rode", "siding", "side",
    ];
    let dawg = Dawg::from_terms(words);

    for i in 0..dawg.node_count() {
        for j in (i + 1)..dawg.node_count() {
            assert_ne!(
                dawg.node(i),
                dawg.node(j),
                "nodes {i} and {j} are structurally equivalent"
            );
        }
    }
}

#[test]
fn match_results_survive_dropping_the_iterator() {
    let dawg = Dawg::from_terms(["one", "two", "three"]);
    let mut iter = dawg.query("two", 1).unwrap();
    let first = iter.next();
    drop(iter);
    assert_eq!(first, Some("two".to_string()));
}
