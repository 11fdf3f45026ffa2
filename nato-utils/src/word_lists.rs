//! The practice-word dictionary: three named lists of words, loaded once from
//! raw newline-delimited text and never mutated afterwards.

use serde::{Deserialize, Serialize};

/// Words shorter than this are dropped from the short list; spelling "cat"
/// phonetically is not much of a drill.
pub const MIN_SHORT_WORD_LEN: usize = 4;

#[derive(
    Clone,
    Copy,
    Debug,
    Serialize,
    Deserialize,
    Hash,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    tsify::Tsify,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "lowercase")]
pub enum WordList {
    Short,
    Medium,
    Long,
}

impl std::fmt::Display for WordList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            WordList::Short => "short",
            WordList::Medium => "medium",
            WordList::Long => "long",
        };
        write!(f, "{name}")
    }
}

impl std::str::FromStr for WordList {
    type Err = UnknownWordList;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short" => Ok(WordList::Short),
            "medium" => Ok(WordList::Medium),
            "long" => Ok(WordList::Long),
            _ => Err(UnknownWordList(s.to_string())),
        }
    }
}

/// A word-list name that isn't `short`, `medium`, or `long`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown word list {0:?}")]
pub struct UnknownWordList(pub String);

/// Every word list, in display order.
pub const WORD_LISTS: [WordList; 3] = [WordList::Short, WordList::Medium, WordList::Long];

/// The three immutable word lists.
#[derive(Clone, Debug, Default)]
pub struct Dictionary {
    short: Vec<String>,
    medium: Vec<String>,
    long: Vec<String>,
}

impl Dictionary {
    /// Build the dictionary from raw newline-delimited text, one file per
    /// list. The short list is filtered to words longer than three
    /// characters; empty lines (including the trailing one) are dropped.
    pub fn from_raw(short: &str, medium: &str, long: &str) -> Self {
        Self {
            short: split_words(short)
                .filter(|word| word.chars().count() >= MIN_SHORT_WORD_LEN)
                .collect(),
            medium: split_words(medium).collect(),
            long: split_words(long).collect(),
        }
    }

    pub fn words(&self, list: WordList) -> &[String] {
        match list {
            WordList::Short => &self.short,
            WordList::Medium => &self.medium,
            WordList::Long => &self.long,
        }
    }
}

fn split_words(raw: &str) -> impl Iterator<Item = String> + '_ {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
}
