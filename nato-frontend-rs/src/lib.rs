#![deny(clippy::string_slice)]

mod notifications;
mod session;
mod storage;
mod utils;

use std::sync::LazyLock;

use nato_utils::word_lists::{Dictionary, WORD_LISTS, WordList};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wasm_bindgen::prelude::*;

pub use notifications::{Notification, NotificationStatus};
use session::QuizSession;
use storage::LocalStorage;

const SHORT_WORDS_RAW: &str = include_str!("../data/short-words.txt");
const MEDIUM_WORDS_RAW: &str = include_str!("../data/med-words.txt");
const LONG_WORDS_RAW: &str = include_str!("../data/long-words.txt");

// putting this inside LOGGER prevents us from accidentally initializing the logger more than once
#[allow(clippy::declare_interior_mutable_const)]
const LOGGER: LazyLock<()> = LazyLock::new(|| {
    utils::set_panic_hook();

    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Logging initialized");
});

/// One judged round, everything the answer card renders.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct AnswerReport {
    /// The quizzed word, uppercase.
    pub word: String,
    /// What the user typed, verbatim.
    pub submission: String,
    pub correct: bool,
    /// The canonical space-joined phonetic spelling.
    pub answer: String,
}

/// One row of the reference table.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct AlphabetEntry {
    pub letter: String,
    pub word: String,
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub fn get_available_word_lists() -> Vec<WordList> {
    WORD_LISTS.to_vec()
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub fn get_alphabet_entries() -> Vec<AlphabetEntry> {
    nato_utils::NATO_ALPHABET
        .iter()
        .map(|(letter, word)| AlphabetEntry {
            letter: letter.to_string(),
            word: word.to_string(),
        })
        .collect()
}

/// Translator page: free-form text to space-joined phonetic words.
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub fn encode_text(text: String) -> String {
    nato_utils::encode(&text)
}

/// Translator page: space-separated phonetic words back to letters.
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub fn decode_text(text: String) -> String {
    nato_utils::decode(&text)
}

/// The quiz, as the JS UI sees it: current word in, typed answer out, with
/// settings toggles and persistence handled on this side of the boundary.
#[wasm_bindgen]
pub struct NatoQuiz {
    session: QuizSession<Option<LocalStorage>>,
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
impl NatoQuiz {
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(constructor))]
    pub fn new() -> Self {
        // used to only initialize the logger once
        #[allow(clippy::borrow_interior_mutable_const)]
        *LOGGER;

        let store = LocalStorage::open();
        if store.is_none() {
            log::warn!("local storage is unavailable; settings will not persist");
        }
        let dictionary = Dictionary::from_raw(SHORT_WORDS_RAW, MEDIUM_WORDS_RAW, LONG_WORDS_RAW);
        let rng = ChaCha8Rng::seed_from_u64(js_sys::Date::now() as u64);
        Self {
            session: QuizSession::load(store, dictionary, rng),
        }
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn word(&self) -> String {
        self.session.word().to_string()
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn pending_text(&self) -> String {
        self.session.text().to_string()
    }

    /// Track the in-progress answer as the user types, so a reload restores
    /// the input field.
    pub fn set_pending_text(&mut self, text: String) {
        self.session.set_text(&text);
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn submitted(&self) -> bool {
        self.session.submitted()
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn active_word_lists(&self) -> Vec<WordList> {
        self.session.word_lists().to_vec()
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn bias(&self) -> u8 {
        self.session.bias().level()
    }

    pub fn set_bias(&mut self, level: u8) {
        self.session.set_bias(level);
    }

    /// Activate or deactivate a word list. Returns the warning to show when
    /// the change is rejected (deactivating the last active list), `None` on
    /// success.
    pub fn set_word_list_active(&mut self, list: WordList, active: bool) -> Option<Notification> {
        match self.session.set_word_list_active(list, active) {
            Ok(()) => None,
            Err(error) => {
                log::warn!("rejected word list change: {error}");
                Some(Notification::for_rejection(&error))
            }
        }
    }

    /// Lock in the typed answer for the current word and judge it.
    pub fn submit_answer(&mut self, text: String) -> AnswerReport {
        let word = self.session.word().to_string();
        let (correct, answer) = match nato_utils::phonetic_spelling(&word) {
            Ok(expected) => (
                nato_utils::grading::judge_answer(
                    &nato_utils::grading::split_answer(&text),
                    &expected,
                ),
                expected.join(" "),
            ),
            Err(error) => {
                log::warn!("current word {word:?} has no phonetic spelling: {error}");
                (false, String::new())
            }
        };
        self.session.submit_answer(&text);
        AnswerReport {
            word,
            submission: text,
            correct,
            answer,
        }
    }

    /// Move on to the next word without answering, or after the answer card.
    pub fn next_round(&mut self) {
        self.session.advance_round();
    }

    /// Clear all persisted settings and history and start fresh.
    pub fn full_reset(&mut self) {
        self.session.full_reset();
    }
}

impl Default for NatoQuiz {
    fn default() -> Self {
        Self::new()
    }
}
