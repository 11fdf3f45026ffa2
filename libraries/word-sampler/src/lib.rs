//! Random sampling library for drill-style item selection.
//!
//! This library provides two ways to draw an item from a pool: a plain
//! uniform draw, and a biased draw that occasionally forces the draw towards
//! the items a caller-supplied scoring function rates lowest (typically
//! "least practiced"). The caller supplies the RNG, so selection is
//! deterministic under test with a seeded generator.
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use word_sampler::pick_biased;
//!
//! let pool = vec!["apple", "banana", "cherry"];
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//!
//! // Force the lowest-scored item on every draw (one_in = 1).
//! let picked = pick_biased(&pool, 1, |item| item.len() as u64, &mut rng);
//! assert_eq!(picked, Some(&"apple"));
//! ```

use rand::Rng;

/// Draw one item uniformly at random from the pool.
///
/// Returns `None` when the pool is empty.
pub fn pick_uniform<'a, T, R: Rng>(pool: &'a [T], rng: &mut R) -> Option<&'a T> {
    if pool.is_empty() {
        return None;
    }
    Some(&pool[rng.gen_range(0..pool.len())])
}

/// Draw one item, forcing a uniform draw from the lowest-scored items with
/// probability `1 / one_in`, and drawing uniformly from the whole pool the
/// rest of the time.
///
/// `one_in = 1` always draws from the lowest-scored subset; larger values
/// bias less. A `one_in` of `0` is treated as `1`. Items tied at the minimum
/// score are equally likely when the biased branch is taken.
///
/// # Arguments
///
/// * `pool` - The items to draw from
/// * `one_in` - The denominator of the bias probability
/// * `score` - Rates an item; lower means more likely under bias
/// * `rng` - The random source
///
/// # Returns
///
/// A reference to the drawn item, or `None` when the pool is empty.
pub fn pick_biased<'a, T, R, F>(
    pool: &'a [T],
    one_in: u32,
    score: F,
    rng: &mut R,
) -> Option<&'a T>
where
    R: Rng,
    F: Fn(&T) -> u64,
{
    if pool.is_empty() {
        return None;
    }

    let one_in = one_in.max(1);
    if rng.gen_range(0..one_in) != 0 {
        return pick_uniform(pool, rng);
    }

    let scores: Vec<u64> = pool.iter().map(&score).collect();
    let minimum = *scores.iter().min()?;
    let least_scored: Vec<&T> = pool
        .iter()
        .zip(&scores)
        .filter(|(_, item_score)| **item_score == minimum)
        .map(|(item, _)| item)
        .collect();

    Some(least_scored[rng.gen_range(0..least_scored.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_uniform_empty_pool_returns_none() {
        let pool: Vec<u32> = Vec::new();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(pick_uniform(&pool, &mut rng), None);
        assert_eq!(pick_biased(&pool, 1, |_| 0, &mut rng), None);
    }

    #[test]
    fn test_uniform_only_returns_pool_members() {
        let pool = vec!["a", "b", "c"];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..100 {
            let picked = pick_uniform(&pool, &mut rng).unwrap();
            assert!(pool.contains(picked));
        }
    }

    #[test]
    fn test_forced_bias_always_picks_the_unique_minimum() {
        let pool = vec![("high", 10u64), ("low", 1), ("mid", 5)];
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for _ in 0..100 {
            let picked = pick_biased(&pool, 1, |(_, score)| *score, &mut rng).unwrap();
            assert_eq!(picked.0, "low");
        }
    }

    #[test]
    fn test_forced_bias_draws_among_tied_minimums() {
        let pool = vec![("tied1", 1u64), ("high", 10), ("tied2", 1)];
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..100 {
            let picked = pick_biased(&pool, 1, |(_, score)| *score, &mut rng).unwrap();
            assert!(picked.0.starts_with("tied"));
        }
    }

    #[test]
    fn test_biased_draw_only_returns_pool_members() {
        let pool = vec![1u64, 2, 3, 4];
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        for one_in in [0, 1, 2, 3] {
            for _ in 0..50 {
                let picked = pick_biased(&pool, one_in, |item| *item, &mut rng).unwrap();
                assert!(pool.contains(picked));
            }
        }
    }

    #[test]
    fn test_weak_bias_sometimes_skips_the_minimum() {
        let pool = vec![("low", 1u64), ("high", 10)];
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut saw_high = false;
        for _ in 0..200 {
            let picked = pick_biased(&pool, 3, |(_, score)| *score, &mut rng).unwrap();
            if picked.0 == "high" {
                saw_high = true;
            }
        }
        assert!(saw_high);
    }

    #[test]
    fn test_seeded_draws_are_deterministic() {
        let pool: Vec<u64> = (0..100).collect();
        let draws = |seed: u64| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            (0..20)
                .map(|_| *pick_biased(&pool, 2, |item| *item, &mut rng).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(draws(42), draws(42));
    }
}
