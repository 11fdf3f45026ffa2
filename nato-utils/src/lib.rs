pub mod fuzzy;
pub mod grading;
pub mod word_lists;

/// The NATO/FAA phonetic alphabet, in letter order.
pub const NATO_ALPHABET: [(char, &str); 26] = [
    ('A', "Alpha"),
    ('B', "Bravo"),
    ('C', "Charlie"),
    ('D', "Delta"),
    ('E', "Echo"),
    ('F', "Foxtrot"),
    ('G', "Golf"),
    ('H', "Hotel"),
    ('I', "India"),
    ('J', "Juliett"),
    ('K', "Kilo"),
    ('L', "Lima"),
    ('M', "Mike"),
    ('N', "November"),
    ('O', "Oscar"),
    ('P', "Papa"),
    ('Q', "Quebec"),
    ('R', "Romeo"),
    ('S', "Sierra"),
    ('T', "Tango"),
    ('U', "Uniform"),
    ('V', "Victor"),
    ('W', "Whiskey"),
    ('X', "X-ray"),
    ('Y', "Yankee"),
    ('Z', "Zulu"),
];

/// A character the alphabet has no phonetic word for (anything outside `A`-`Z`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("no phonetic word for character {0:?}")]
pub struct UnmappableCharacter(pub char);

/// Look up the phonetic word for a single character, case-insensitively.
pub fn phonetic_word(character: char) -> Option<&'static str> {
    let letter = character.to_ascii_uppercase();
    NATO_ALPHABET
        .iter()
        .find(|(candidate, _)| *candidate == letter)
        .map(|(_, word)| *word)
}

/// Look up the letter a phonetic word stands for. Exact spelling only.
pub fn letter_for(word: &str) -> Option<char> {
    NATO_ALPHABET
        .iter()
        .find(|(_, candidate)| *candidate == word)
        .map(|(letter, _)| *letter)
}

/// Spell a word out as its phonetic-word sequence.
///
/// Every character must map to a phonetic word; the first one that doesn't is
/// reported in the error instead of leaving a hole in the sequence.
pub fn phonetic_spelling(word: &str) -> Result<Vec<&'static str>, UnmappableCharacter> {
    word.chars()
        .map(|character| phonetic_word(character).ok_or(UnmappableCharacter(character)))
        .collect()
}

/// The space-joined phonetic spelling shown as the correct answer.
pub fn canonical_answer(word: &str) -> Result<String, UnmappableCharacter> {
    Ok(phonetic_spelling(word)?.join(" "))
}

/// Encode free-form text as space-joined phonetic words.
///
/// Lossy: characters with no phonetic word (spaces, digits, punctuation) are
/// skipped rather than rejected, since this feeds the translator page.
pub fn encode(text: &str) -> String {
    text.chars()
        .filter_map(phonetic_word)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decode space-separated phonetic words back into lowercase letters.
///
/// Tokens that aren't a phonetic word (exact spelling) are skipped.
pub fn decode(text: &str) -> String {
    text.split(' ')
        .filter_map(letter_for)
        .map(|letter| letter.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_letter_has_a_phonetic_word() {
        for (letter, word) in NATO_ALPHABET {
            assert_eq!(phonetic_word(letter), Some(word));
            assert_eq!(phonetic_word(letter.to_ascii_lowercase()), Some(word));
            assert_eq!(letter_for(word), Some(letter));
        }
    }

    #[test]
    fn test_single_letter_spelling() {
        assert_eq!(phonetic_spelling("Q"), Ok(vec!["Quebec"]));
        assert_eq!(phonetic_spelling("q"), Ok(vec!["Quebec"]));
    }

    #[test]
    fn test_spelling_is_in_character_order() {
        assert_eq!(phonetic_spelling("cab"), Ok(vec!["Charlie", "Alpha", "Bravo"]));
    }

    #[test]
    fn test_unmappable_character_is_reported() {
        assert_eq!(phonetic_spelling("c4t"), Err(UnmappableCharacter('4')));
        assert_eq!(canonical_answer("no space"), Err(UnmappableCharacter(' ')));
    }

    #[test]
    fn test_canonical_answer_joins_with_spaces() {
        assert_eq!(canonical_answer("hi").as_deref(), Ok("Hotel India"));
    }

    #[test]
    fn test_encode_skips_unmappable_characters() {
        assert_eq!(encode("ab"), "Alpha Bravo");
        assert_eq!(encode("a b!"), "Alpha Bravo");
    }

    #[test]
    fn test_decode_skips_unrecognized_tokens() {
        assert_eq!(decode("Alpha Bravo"), "ab");
        assert_eq!(decode("Alpha what Bravo"), "ab");
        // Decoding requires the exact spelling; near-misses are the quiz's job.
        assert_eq!(decode("alpha"), "");
    }

    #[test]
    fn test_encode_decode_round_trip() {
        assert_eq!(decode(&encode("xray")), "xray");
        assert_eq!(decode(&encode("Quebec")), "quebec");
    }
}
