//! Grading of typed phonetic spellings.
//!
//! A submission is split on single spaces into tokens, one per expected
//! phonetic word. Each token must fuzzily match some phonetic word well
//! enough, or be the best fuzzy match for exactly the word expected at its
//! position. The two-sided rule tolerates minor typos ("Alfa" for "Alpha")
//! while still requiring the right word when similarity alone is ambiguous.

use std::sync::LazyLock;

use crate::NATO_ALPHABET;
use crate::fuzzy::FuzzySet;

/// A token whose best fuzzy match scores at least this is accepted no matter
/// which phonetic word it matched.
const MATCH_THRESHOLD: f64 = 0.85;

/// The candidate set is always exactly the 26 canonical phonetic words.
static PHONETIC_SET: LazyLock<FuzzySet> =
    LazyLock::new(|| FuzzySet::new(NATO_ALPHABET.iter().map(|(_, word)| *word)));

/// Judge a submitted token sequence against the expected phonetic words.
///
/// Fails on a token-count mismatch, and on any single-character token: a
/// one-character token can never legitimately equal a phonetic word, and
/// rejecting them keeps "c a t" from passing as a spelling of "cat".
pub fn judge_answer(submitted: &[&str], expected: &[&str]) -> bool {
    if submitted.len() != expected.len()
        || submitted.iter().all(|token| token.chars().count() == 1)
    {
        return false;
    }
    submitted.iter().zip(expected).all(|(token, expected_word)| {
        if token.chars().count() == 1 {
            return false;
        }
        match PHONETIC_SET.get(token).first() {
            Some((score, candidate)) => {
                *score >= MATCH_THRESHOLD || candidate == expected_word
            }
            None => false,
        }
    })
}

/// Split a typed answer into tokens the way [`judge_answer`] expects.
///
/// Splits on single spaces only, so doubled spaces produce empty tokens that
/// then fail judging; the input field is expected to carry clean spacing.
pub fn split_answer(text: &str) -> Vec<&str> {
    text.split(' ').collect()
}
