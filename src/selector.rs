//! Price classification and question selection.
//!
//! Selection is deterministic given the RNG: callers pass any `rand::Rng`,
//! tests seed a `StdRng` to pin down the exact draw.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::catalog;
use crate::types::{Question, Tier};

pub const MEDIUM_THRESHOLD: f64 = 6.70;
pub const BIG_THRESHOLD: f64 = 67.0;

/// Tier-entry questions, always asked once their threshold is crossed.
const MEDIUM_ENTRY_ID: &str = "m0";
const BIG_ENTRY_ID: &str = "b0";

impl Tier {
    pub fn for_price(price: f64) -> Tier {
        if price < MEDIUM_THRESHOLD {
            Tier::Small
        } else if price < BIG_THRESHOLD {
            Tier::Medium
        } else {
            Tier::Big
        }
    }
}

fn target_count<R: Rng + ?Sized>(tier: Tier, rng: &mut R) -> usize {
    match tier {
        Tier::Small => rng.random_range(2..=3),
        Tier::Medium => rng.random_range(4..=6),
        Tier::Big => rng.random_range(6..=8),
    }
}

/// Pick the questions to ask for `price`: mandatory tier-entry questions
/// first (in catalog order, never duplicated), then a uniform draw from the
/// tier's pool up to the target count. Big-tier draws may also pull from the
/// medium pool. A thin pool yields a shorter result, never an error.
pub fn select_questions<R: Rng + ?Sized>(price: f64, rng: &mut R) -> Vec<Question> {
    let tier = Tier::for_price(price);
    let count = target_count(tier, rng);

    let mut selected: Vec<&Question> = Vec::new();
    if price >= MEDIUM_THRESHOLD {
        if let Some(q) = catalog::find(MEDIUM_ENTRY_ID) {
            selected.push(q);
        }
    }
    if price >= BIG_THRESHOLD {
        if let Some(q) = catalog::find(BIG_ENTRY_ID) {
            selected.push(q);
        }
    }
    let mandatory_ids: Vec<&str> = selected.iter().map(|q| q.id.as_str()).collect();

    let mut pool: Vec<&Question> = catalog::catalog()
        .iter()
        .filter(|q| !mandatory_ids.contains(&q.id.as_str()))
        .filter(|q| q.tier == tier || (tier == Tier::Big && q.tier == Tier::Medium))
        .collect();
    pool.shuffle(rng);

    let remaining = count.saturating_sub(selected.len());
    selected.extend(pool.into_iter().take(remaining));

    selected.into_iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn ids(questions: &[Question]) -> Vec<&str> {
        questions.iter().map(|q| q.id.as_str()).collect()
    }

    #[test]
    fn tier_brackets() {
        assert_eq!(Tier::for_price(0.0), Tier::Small);
        assert_eq!(Tier::for_price(6.69), Tier::Small);
        assert_eq!(Tier::for_price(6.70), Tier::Medium);
        assert_eq!(Tier::for_price(66.99), Tier::Medium);
        assert_eq!(Tier::for_price(67.0), Tier::Big);
        assert_eq!(Tier::for_price(5000.0), Tier::Big);
    }

    #[test]
    fn small_prices_draw_two_to_three_small_questions() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let questions = select_questions(3.50, &mut rng);
            assert!((2..=3).contains(&questions.len()), "len={}", questions.len());
            assert!(questions.iter().all(|q| q.tier == Tier::Small));
            assert!(!ids(&questions).contains(&"m0"));
            assert!(!ids(&questions).contains(&"b0"));
        }
    }

    #[test]
    fn zero_price_still_selects_small_tier() {
        let mut rng = StdRng::seed_from_u64(7);
        let questions = select_questions(0.0, &mut rng);
        assert!((2..=3).contains(&questions.len()));
        assert!(questions.iter().all(|q| q.tier == Tier::Small));
    }

    #[test]
    fn medium_prices_put_the_entry_question_first() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let questions = select_questions(10.0, &mut rng);
            assert_eq!(questions[0].id, "m0");
            assert!((4..=6).contains(&questions.len()));
            assert!(questions.iter().all(|q| q.tier == Tier::Medium));
            assert!(!ids(&questions).contains(&"b0"));
        }
    }

    #[test]
    fn big_prices_include_both_entry_questions_in_order() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let questions = select_questions(120.0, &mut rng);
            assert_eq!(questions[0].id, "m0");
            assert_eq!(questions[1].id, "b0");
            assert!((6..=8).contains(&questions.len()));
            // Pool may mix medium and big tiers, nothing else.
            assert!(
                questions
                    .iter()
                    .all(|q| q.tier == Tier::Medium || q.tier == Tier::Big)
            );
        }
    }

    #[test]
    fn never_returns_duplicates() {
        for price in [1.0, 25.0, 300.0] {
            for seed in 0..50 {
                let mut rng = StdRng::seed_from_u64(seed);
                let questions = select_questions(price, &mut rng);
                let unique: HashSet<&str> = ids(&questions).into_iter().collect();
                assert_eq!(unique.len(), questions.len());
            }
        }
    }

    #[test]
    fn same_seed_same_selection() {
        let a = select_questions(42.0, &mut StdRng::seed_from_u64(99));
        let b = select_questions(42.0, &mut StdRng::seed_from_u64(99));
        assert_eq!(ids(&a), ids(&b));
    }

    #[test]
    fn all_selected_questions_come_from_the_catalog() {
        let mut rng = StdRng::seed_from_u64(3);
        for q in select_questions(80.0, &mut rng) {
            assert!(catalog::find(&q.id).is_some());
        }
    }
}
