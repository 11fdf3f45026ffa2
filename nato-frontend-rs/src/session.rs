//! The quiz session: one explicitly-owned state record, persisted key by key
//! into the settings store after every mutation.

use std::collections::BTreeMap;

use nato_utils::word_lists::{Dictionary, WordList};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::storage::SettingsStore;

/// Persisted keys. One logical namespace per session field; a full reset
/// clears exactly these.
mod keys {
    pub(super) const WORD_LISTS: &str = "wordLists";
    pub(super) const BIAS: &str = "bias";
    pub(super) const PAST_CHARACTERS: &str = "pastCharacters";
    pub(super) const WORD: &str = "word";
    pub(super) const TEXT: &str = "text";
    pub(super) const SUBMITTED: &str = "submitted";

    pub(super) const ALL: [&str; 6] = [WORD_LISTS, BIAS, PAST_CHARACTERS, WORD, TEXT, SUBMITTED];
}

pub(crate) const DEFAULT_BIAS_LEVEL: u8 = 2;

/// How strongly word selection favors under-practiced characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BiasLevel {
    None,
    Low,
    Medium,
    High,
}

impl BiasLevel {
    /// Total on every `u8`: out-of-range levels clamp to `High` rather than
    /// leaving selection undefined.
    pub(crate) fn from_level(level: u8) -> Self {
        match level {
            0 => BiasLevel::None,
            1 => BiasLevel::Low,
            2 => BiasLevel::Medium,
            _ => BiasLevel::High,
        }
    }

    pub(crate) fn level(self) -> u8 {
        match self {
            BiasLevel::None => 0,
            BiasLevel::Low => 1,
            BiasLevel::Medium => 2,
            BiasLevel::High => 3,
        }
    }

    /// The `1 in n` chance that a round forces a least-practiced word.
    /// `None` means selection is unbiased.
    fn least_practiced_one_in(self) -> Option<u32> {
        match self {
            BiasLevel::None => None,
            BiasLevel::Low => Some(3),    // once every 3 words
            BiasLevel::Medium => Some(2), // once every 2 words
            BiasLevel::High => Some(1),   // every word
        }
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub(crate) enum SessionError {
    #[error("cannot deactivate the last active word list")]
    LastActiveWordList,
}

/// A pool entry remembers which list it came from, so deactivating a list
/// removes exactly that list's entries. (Filtering by word string instead
/// would also remove a word's copy in another still-active list.)
#[derive(Clone, Debug)]
struct PoolEntry {
    word: String,
    source: WordList,
}

pub(crate) struct QuizSession<S> {
    store: S,
    dictionary: Dictionary,
    rng: ChaCha8Rng,

    pool: Vec<PoolEntry>,
    word_lists: Vec<WordList>,
    bias: BiasLevel,
    past_characters: BTreeMap<char, u32>,
    word: String,
    text: String,
    submitted: bool,
}

impl<S: SettingsStore> QuizSession<S> {
    /// Load the session from the store, falling back to defaults for any
    /// missing or malformed key, and write the resulting state back so a
    /// fresh store ends up fully populated.
    pub(crate) fn load(store: S, dictionary: Dictionary, rng: ChaCha8Rng) -> Self {
        let mut session = Self {
            store,
            dictionary,
            rng,
            pool: Vec::new(),
            word_lists: Vec::new(),
            bias: BiasLevel::from_level(DEFAULT_BIAS_LEVEL),
            past_characters: BTreeMap::new(),
            word: String::new(),
            text: String::new(),
            submitted: false,
        };

        session.word_lists = session
            .read_json::<Vec<WordList>>(keys::WORD_LISTS)
            .filter(|lists| !lists.is_empty())
            .unwrap_or_else(|| vec![WordList::Short]);
        session.bias = BiasLevel::from_level(
            session.read_json(keys::BIAS).unwrap_or(DEFAULT_BIAS_LEVEL),
        );
        session.past_characters = session.read_json(keys::PAST_CHARACTERS).unwrap_or_default();
        session.text = session.store.get(keys::TEXT).unwrap_or_default();
        session.submitted = session.read_json(keys::SUBMITTED).unwrap_or(false);

        session.pool = build_pool(&session.dictionary, &session.word_lists);
        session.word = match session.store.get(keys::WORD).filter(|word| !word.is_empty()) {
            Some(word) => word,
            None => session.draw_uniform(),
        };

        session.persist_all();
        session
    }

    // =======
    // reads
    // =======

    pub(crate) fn word(&self) -> &str {
        &self.word
    }

    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn submitted(&self) -> bool {
        self.submitted
    }

    pub(crate) fn word_lists(&self) -> &[WordList] {
        &self.word_lists
    }

    pub(crate) fn bias(&self) -> BiasLevel {
        self.bias
    }

    // =======
    // state transitions
    // =======

    /// Activate or deactivate a word list. Deactivating is rejected when only
    /// one list is active, since that would leave nothing to draw from; the
    /// rejection mutates nothing, so repeating it is harmless.
    pub(crate) fn set_word_list_active(
        &mut self,
        list: WordList,
        active: bool,
    ) -> Result<(), SessionError> {
        if active {
            if !self.word_lists.contains(&list) {
                self.word_lists.push(list);
                self.pool.extend(list_entries(&self.dictionary, list));
            }
        } else {
            if self.word_lists.len() == 1 {
                return Err(SessionError::LastActiveWordList);
            }
            self.word_lists.retain(|active_list| *active_list != list);
            self.pool.retain(|entry| entry.source != list);
        }
        self.write_json(keys::WORD_LISTS, &self.word_lists.clone());
        self.advance_round();
        Ok(())
    }

    /// Set the bias level, clamping out-of-range values.
    pub(crate) fn set_bias(&mut self, level: u8) {
        self.bias = BiasLevel::from_level(level);
        self.write_json(keys::BIAS, &self.bias.level());
    }

    /// Lock in an answer for the current word: store the text, mark the round
    /// submitted, and record one exposure per character of the word. A round
    /// already submitted is left untouched.
    pub(crate) fn submit_answer(&mut self, text: &str) {
        if self.submitted {
            return;
        }
        self.text = text.to_string();
        self.submitted = true;
        let word = self.word.clone();
        self.record_answer(&word);
        self.store.set(keys::TEXT, text);
        self.write_json(keys::SUBMITTED, &true);
    }

    /// Count one exposure for every character of `word` (uppercased).
    pub(crate) fn record_answer(&mut self, word: &str) {
        for character in word.chars() {
            *self
                .past_characters
                .entry(character.to_ascii_uppercase())
                .or_insert(0) += 1;
        }
        self.write_json(keys::PAST_CHARACTERS, &self.past_characters.clone());
    }

    /// Track the in-progress answer text so a reload restores it.
    pub(crate) fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.store.set(keys::TEXT, text);
    }

    /// Start a new round: draw the next word, clear the typed answer, and
    /// clear the submitted flag.
    ///
    /// With bias off the draw is uniform over the pool. Otherwise each word
    /// is scored by the summed exposure counts of its characters, and with
    /// probability `1 in n` (3, 2, or 1 by bias level) the draw is forced to
    /// the least-practiced words; the rest of the time it stays uniform.
    pub(crate) fn advance_round(&mut self) {
        if self.pool.is_empty() {
            log::warn!("word pool is empty; keeping the current word");
            return;
        }
        let picked = match self.bias.least_practiced_one_in() {
            None => word_sampler::pick_uniform(&self.pool, &mut self.rng),
            Some(one_in) => word_sampler::pick_biased(
                &self.pool,
                one_in,
                |entry| exposure_score(&entry.word, &self.past_characters),
                &mut self.rng,
            ),
        };
        let Some(entry) = picked else {
            return;
        };
        self.word = entry.word.to_uppercase();
        self.text.clear();
        self.submitted = false;

        let word = self.word.clone();
        self.store.set(keys::WORD, &word);
        self.store.set(keys::TEXT, "");
        self.write_json(keys::SUBMITTED, &false);
    }

    /// Clear every persisted key and reinitialize to defaults, including a
    /// fresh exposure history and a freshly drawn word.
    pub(crate) fn full_reset(&mut self) {
        for key in keys::ALL {
            self.store.remove(key);
        }
        self.word_lists = vec![WordList::Short];
        self.bias = BiasLevel::from_level(DEFAULT_BIAS_LEVEL);
        self.past_characters = BTreeMap::new();
        self.pool = build_pool(&self.dictionary, &self.word_lists);
        self.word = self.draw_uniform();
        self.text = String::new();
        self.submitted = false;
        self.persist_all();
    }

    // =======
    // persistence plumbing
    // =======

    fn draw_uniform(&mut self) -> String {
        match word_sampler::pick_uniform(&self.pool, &mut self.rng) {
            Some(entry) => entry.word.to_uppercase(),
            None => {
                log::warn!("word pool is empty; no word to draw");
                String::new()
            }
        }
    }

    fn persist_all(&mut self) {
        self.write_json(keys::WORD_LISTS, &self.word_lists.clone());
        self.write_json(keys::BIAS, &self.bias.level());
        self.write_json(keys::PAST_CHARACTERS, &self.past_characters.clone());
        let word = self.word.clone();
        self.store.set(keys::WORD, &word);
        let text = self.text.clone();
        self.store.set(keys::TEXT, &text);
        let submitted = self.submitted;
        self.write_json(keys::SUBMITTED, &submitted);
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.store.get(key)?;
        serde_json::from_str(&raw)
            .map_err(|err| log::warn!("discarding malformed persisted {key:?}: {err}"))
            .ok()
    }

    fn write_json<T: Serialize>(&mut self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => self.store.set(key, &raw),
            Err(err) => log::warn!("failed to serialize {key:?}: {err}"),
        }
    }
}

/// The working pool: the concatenation of every active list, duplicates and
/// all, each entry tagged with the list it came from.
fn build_pool(dictionary: &Dictionary, word_lists: &[WordList]) -> Vec<PoolEntry> {
    word_lists
        .iter()
        .flat_map(|list| list_entries(dictionary, *list))
        .collect()
}

fn list_entries(dictionary: &Dictionary, list: WordList) -> Vec<PoolEntry> {
    dictionary
        .words(list)
        .iter()
        .map(|word| PoolEntry {
            word: word.clone(),
            source: list,
        })
        .collect()
}

/// A word's cumulative exposure: the sum of its characters' exposure counts,
/// case-insensitively. Characters never seen contribute 0.
fn exposure_score(word: &str, past_characters: &BTreeMap<char, u32>) -> u64 {
    word.chars()
        .map(|character| {
            past_characters
                .get(&character.to_ascii_uppercase())
                .copied()
                .unwrap_or(0) as u64
        })
        .sum()
}
