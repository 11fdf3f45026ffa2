//! Fuzzy lookup over a small fixed set of candidate strings.
//!
//! Candidates are indexed by letter n-grams; a query is first narrowed to the
//! candidates it shares grams with (ranked by cosine similarity of gram-count
//! vectors), then re-ranked by Levenshtein distance ratio. The result is a
//! ranked list of `(score, candidate)` pairs, best first, with scores in
//! `0.0..=1.0`.

use rustc_hash::FxHashMap;

/// Larger grams are tried first; if a query shares no grams of one size with
/// any candidate, the next size down is tried before giving up.
const GRAM_SIZE_UPPER: usize = 3;
const GRAM_SIZE_LOWER: usize = 2;

/// Matches scoring below this are not worth returning at all.
const MIN_SCORE: f64 = 0.33;

/// How many gram-similarity candidates survive into the Levenshtein re-rank.
const RERANK_DEPTH: usize = 50;

/// A fixed set of strings supporting ranked fuzzy lookup.
pub struct FuzzySet {
    /// normalized form -> candidate as originally added
    exact: FxHashMap<String, String>,
    /// one gram index per gram size
    indexes: Vec<GramIndex>,
}

struct GramIndex {
    gram_size: usize,
    /// gram -> (item index, gram count within that item)
    postings: FxHashMap<String, Vec<(usize, u32)>>,
    /// (gram-count vector magnitude, normalized value) per item
    items: Vec<(f64, String)>,
}

impl FuzzySet {
    pub fn new<'a>(candidates: impl IntoIterator<Item = &'a str>) -> Self {
        let mut set = Self {
            exact: FxHashMap::default(),
            indexes: (GRAM_SIZE_LOWER..=GRAM_SIZE_UPPER)
                .map(|gram_size| GramIndex {
                    gram_size,
                    postings: FxHashMap::default(),
                    items: Vec::new(),
                })
                .collect(),
        };
        for candidate in candidates {
            set.add(candidate);
        }
        set
    }

    fn add(&mut self, candidate: &str) {
        let normalized = normalize(candidate);
        if self.exact.contains_key(&normalized) {
            return;
        }
        for index in &mut self.indexes {
            let grams = gram_counts(&normalized, index.gram_size);
            let magnitude = (grams.values().map(|count| count * count).sum::<u32>() as f64).sqrt();
            let item_index = index.items.len();
            index.items.push((magnitude, normalized.clone()));
            for (gram, count) in grams {
                index.postings.entry(gram).or_default().push((item_index, count));
            }
        }
        self.exact.insert(normalized, candidate.to_string());
    }

    /// Rank candidates against `query`, best match first.
    ///
    /// Returns an empty vector when the query shares no grams with any
    /// candidate at any gram size, or when nothing scores at least the
    /// minimum.
    pub fn get(&self, query: &str) -> Vec<(f64, &str)> {
        let normalized = normalize(query);
        for index in self.indexes.iter().rev() {
            let results = self.lookup(index, &normalized);
            if !results.is_empty() {
                return results;
            }
        }
        Vec::new()
    }

    fn lookup(&self, index: &GramIndex, normalized_query: &str) -> Vec<(f64, &str)> {
        let query_grams = gram_counts(normalized_query, index.gram_size);
        let query_magnitude =
            (query_grams.values().map(|count| count * count).sum::<u32>() as f64).sqrt();
        if query_magnitude == 0.0 {
            return Vec::new();
        }

        // Dot products against every candidate sharing at least one gram.
        let mut shared: FxHashMap<usize, u32> = FxHashMap::default();
        for (gram, query_count) in &query_grams {
            if let Some(postings) = index.postings.get(gram) {
                for (item_index, item_count) in postings {
                    *shared.entry(*item_index).or_insert(0) += query_count * item_count;
                }
            }
        }
        if shared.is_empty() {
            return Vec::new();
        }

        let mut by_cosine: Vec<(f64, usize)> = shared
            .into_iter()
            .map(|(item_index, dot)| {
                let (magnitude, _) = index.items[item_index];
                (dot as f64 / (query_magnitude * magnitude), item_index)
            })
            .collect();
        by_cosine.sort_by(|a, b| b.0.total_cmp(&a.0));
        by_cosine.truncate(RERANK_DEPTH);

        let mut results: Vec<(f64, &str)> = by_cosine
            .into_iter()
            .map(|(_, item_index)| {
                let (_, normalized_candidate) = &index.items[item_index];
                let score = distance_ratio(normalized_candidate, normalized_query);
                (score, self.exact[normalized_candidate].as_str())
            })
            .filter(|(score, _)| *score >= MIN_SCORE)
            .collect();
        results.sort_by(|a, b| b.0.total_cmp(&a.0));
        results
    }
}

/// Lowercase and strip anything that is not a letter, digit, or space, so
/// that "X-ray" and "xray" index identically.
fn normalize(value: &str) -> String {
    value
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ')
        .collect()
}

/// Count the n-grams of `value`, padded with a leading and trailing `-` so
/// that word boundaries contribute grams of their own.
fn gram_counts(value: &str, gram_size: usize) -> FxHashMap<String, u32> {
    let padded: Vec<char> = std::iter::once('-')
        .chain(value.chars())
        .chain(std::iter::once('-'))
        .collect();
    let mut counts = FxHashMap::default();
    if padded.len() < gram_size {
        return counts;
    }
    for window in padded.windows(gram_size) {
        *counts.entry(window.iter().collect::<String>()).or_insert(0) += 1;
    }
    counts
}

/// Similarity as `1 - levenshtein / longer length`, 1.0 for identical strings.
fn distance_ratio(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - levenshtein_distance(a, b) as f64 / longest as f64
}

/// Calculate Levenshtein distance between two strings
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut matrix = vec![vec![0; b_len + 1]; a_len + 1];

    for i in 0..=a_len {
        matrix[i][0] = i;
    }
    for j in 0..=b_len {
        matrix[0][j] = j;
    }

    for i in 1..=a_len {
        for j in 1..=b_len {
            let cost = if a_chars[i - 1] == b_chars[j - 1] {
                0
            } else {
                1
            };
            matrix[i][j] = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);
        }
    }

    matrix[a_len][b_len]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NATO_ALPHABET;

    fn phonetic_set() -> FuzzySet {
        FuzzySet::new(NATO_ALPHABET.iter().map(|(_, word)| *word))
    }

    #[test]
    fn test_exact_match_scores_one() {
        let set = phonetic_set();
        let results = set.get("Quebec");
        assert_eq!(results[0], (1.0, "Quebec"));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let set = phonetic_set();
        assert_eq!(set.get("alpha")[0], (1.0, "Alpha"));
        assert_eq!(set.get("ZULU")[0], (1.0, "Zulu"));
    }

    #[test]
    fn test_hyphen_is_ignored_in_matching() {
        let set = phonetic_set();
        assert_eq!(set.get("xray")[0], (1.0, "X-ray"));
        assert_eq!(set.get("X-ray")[0], (1.0, "X-ray"));
    }

    #[test]
    fn test_typo_still_ranks_the_right_word_first() {
        let set = phonetic_set();
        let results = set.get("Alfa");
        assert_eq!(results[0].1, "Alpha");
        assert!(results[0].0 < 1.0);
    }

    #[test]
    fn test_no_shared_grams_returns_nothing() {
        let set = phonetic_set();
        assert!(set.get("Zzzzzz").is_empty());
        assert!(set.get("").is_empty());
    }

    #[test]
    fn test_results_are_ranked_best_first() {
        let set = phonetic_set();
        let results = set.get("Victor");
        assert_eq!(results[0].1, "Victor");
        for pair in results.windows(2) {
            assert!(pair[0].0 >= pair[1].0);
        }
    }
}
