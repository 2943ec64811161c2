use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::difficulty::{Difficulty, TierSettings};
use crate::error::{GameError, GameResult};
use crate::letters::{concepts, Letter, LetterPool};

/// One round of play: a target concept and the two circles hiding it.
///
/// Each circle contains exactly one letter matching the target (in either
/// case) and no two letters in a circle share a concept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    target: char,
    circle_a: Vec<Letter>,
    circle_b: Vec<Letter>,
}

impl Round {
    /// Build a round from explicit circles, checking the round invariants.
    pub fn new(target: char, circle_a: Vec<Letter>, circle_b: Vec<Letter>) -> GameResult<Self> {
        if !target.is_ascii_alphabetic() {
            return Err(GameError::InvalidRound(format!(
                "target {target:?} is not a letter"
            )));
        }
        let target = target.to_ascii_uppercase();

        if circle_a.len() != circle_b.len() {
            return Err(GameError::InvalidRound(format!(
                "circles differ in size ({} vs {})",
                circle_a.len(),
                circle_b.len()
            )));
        }

        for (name, circle) in [("A", &circle_a), ("B", &circle_b)] {
            if circle.len() < 2 {
                return Err(GameError::InvalidRound(format!(
                    "circle {name} has fewer than two letters"
                )));
            }
            let matches = circle.iter().filter(|l| l.matches(target)).count();
            if matches != 1 {
                return Err(GameError::InvalidRound(format!(
                    "circle {name} holds the target {matches} times"
                )));
            }
            if !circle.iter().map(Letter::concept).all_unique() {
                return Err(GameError::InvalidRound(format!(
                    "circle {name} repeats a concept"
                )));
            }
        }

        Ok(Self {
            target,
            circle_a,
            circle_b,
        })
    }

    pub fn target(&self) -> char {
        self.target
    }

    pub fn circle_a(&self) -> &[Letter] {
        &self.circle_a
    }

    pub fn circle_b(&self) -> &[Letter] {
        &self.circle_b
    }

    pub fn circles(&self) -> [&[Letter]; 2] {
        [&self.circle_a, &self.circle_b]
    }

    pub fn letters_per_circle(&self) -> usize {
        self.circle_a.len()
    }

    pub fn is_target(&self, letter: Letter) -> bool {
        letter.matches(self.target)
    }

    /// True if either circle shows this letter, in either case.
    pub fn contains(&self, letter: Letter) -> bool {
        self.circles()
            .iter()
            .flat_map(|circle| circle.iter())
            .any(|l| l.matches(letter.concept()))
    }
}

/// Generate a round for a shipped tier using the thread RNG.
pub fn generate_round(tier: Difficulty) -> Round {
    generate_round_with(tier.settings(), &mut rand::thread_rng())
}

/// Generate a round for `settings`, drawing all randomness from `rng`.
pub fn generate_round_with<R: Rng + ?Sized>(settings: TierSettings, rng: &mut R) -> Round {
    let use_lowercase = settings.use_lowercase_variants();
    let fillers_per_circle = settings.fillers_per_circle();

    let all_concepts: Vec<char> = concepts().collect();
    let target = *all_concepts.choose(rng).unwrap_or(&'A');

    let mut pool = LetterPool::new(use_lowercase).into_letters();
    pool.shuffle(rng);

    // First occurrence of each concept wins; the target concept is never a filler.
    let mut candidates = pool
        .into_iter()
        .filter(|l| !l.matches(target))
        .unique_by(Letter::concept);

    // Both circles consume from the same sequence, so no filler concept is reused.
    let mut circle_a: Vec<Letter> = candidates.by_ref().take(fillers_per_circle).collect();
    let mut circle_b: Vec<Letter> = candidates.take(fillers_per_circle).collect();

    circle_a.push(target_instance(target, use_lowercase, rng));
    circle_b.push(target_instance(target, use_lowercase, rng));

    circle_a.shuffle(rng);
    circle_b.shuffle(rng);

    Round {
        target,
        circle_a,
        circle_b,
    }
}

fn target_instance<R: Rng + ?Sized>(target: char, use_lowercase: bool, rng: &mut R) -> Letter {
    if use_lowercase && rng.gen_bool(0.5) {
        Letter::lower(target)
    } else {
        Letter::upper(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn letters(s: &str) -> Vec<Letter> {
        s.chars().filter_map(Letter::new).collect()
    }

    fn assert_round_invariants(round: &Round, settings: TierSettings) {
        for circle in round.circles() {
            assert_eq!(circle.len(), settings.letters_per_circle());
            assert_eq!(circle.iter().filter(|l| round.is_target(**l)).count(), 1);
            let concepts: HashSet<char> = circle.iter().map(Letter::concept).collect();
            assert_eq!(concepts.len(), circle.len());
            if !settings.use_lowercase_variants() {
                assert!(circle.iter().all(|l| !l.is_lowercase()));
            }
        }
    }

    #[test]
    fn every_tier_produces_valid_rounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for tier in Difficulty::ALL {
            for _ in 0..200 {
                let round = generate_round_with(tier.settings(), &mut rng);
                assert_round_invariants(&round, tier.settings());
            }
        }
    }

    #[test]
    fn fillers_are_not_shared_between_circles() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let round = generate_round_with(TierSettings::HARD, &mut rng);
            let a: HashSet<char> = round
                .circle_a()
                .iter()
                .filter(|l| !round.is_target(**l))
                .map(Letter::concept)
                .collect();
            let b: HashSet<char> = round
                .circle_b()
                .iter()
                .filter(|l| !round.is_target(**l))
                .map(Letter::concept)
                .collect();
            assert!(a.is_disjoint(&b));
        }
    }

    #[test]
    fn largest_valid_circle_is_filled() {
        let settings = TierSettings::new(13, false).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let round = generate_round_with(settings, &mut rng);
        assert_round_invariants(&round, settings);
    }

    #[test]
    fn lowercase_tier_shows_both_cases_of_target() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen_lower = false;
        let mut seen_upper = false;
        for _ in 0..200 {
            let round = generate_round_with(TierSettings::HARD, &mut rng);
            for circle in round.circles() {
                let target = circle.iter().find(|l| round.is_target(**l)).unwrap();
                if target.is_lowercase() {
                    seen_lower = true;
                } else {
                    seen_upper = true;
                }
            }
        }
        assert!(seen_lower && seen_upper);
    }

    #[test]
    fn targets_cover_the_alphabet() {
        let mut rng = StdRng::seed_from_u64(5);
        let targets: HashSet<char> = (0..2000)
            .map(|_| generate_round_with(TierSettings::EASY, &mut rng).target())
            .collect();
        assert_eq!(targets.len(), 26);
    }

    #[test]
    fn target_position_is_not_biased() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut counts = [0usize; 4];
        let trials = 8000;
        for _ in 0..trials {
            let round = generate_round_with(TierSettings::EASY, &mut rng);
            let pos = round
                .circle_a()
                .iter()
                .position(|l| round.is_target(*l))
                .unwrap();
            counts[pos] += 1;
        }
        // Expect ~2000 per slot.
        for c in counts {
            assert!((1700..2300).contains(&c), "slot counts skewed: {counts:?}");
        }
    }

    #[test]
    fn seeded_generation_is_deterministic() {
        let a = generate_round_with(TierSettings::HARD, &mut StdRng::seed_from_u64(1234));
        let b = generate_round_with(TierSettings::HARD, &mut StdRng::seed_from_u64(1234));
        assert_eq!(a, b);
    }

    #[test]
    fn generate_round_uses_tier_size() {
        let round = generate_round(Difficulty::Hard);
        assert_eq!(round.letters_per_circle(), 8);
    }

    #[test]
    fn explicit_round_is_accepted() {
        let round = Round::new('b', letters("BKQR"), letters("XbMN")).unwrap();
        assert_eq!(round.target(), 'B');
        assert!(round.contains(Letter::upper('k')));
        assert!(round.contains(Letter::lower('b')));
        assert!(!round.contains(Letter::upper('z')));
    }

    #[test]
    fn contains_ignores_case() {
        let round = Round::new('B', letters("BKQRSTUV"), letters("bCDEFGHI")).unwrap();
        assert!(round.contains(Letter::lower('k')));
        assert!(round.contains(Letter::upper('c')));
        assert!(round.contains(Letter::upper('b')));
        assert!(!round.contains(Letter::lower('z')));
    }

    #[test]
    fn explicit_round_rejects_broken_circles() {
        assert_matches!(
            Round::new('B', letters("KQRS"), letters("BKQR")),
            Err(GameError::InvalidRound(_))
        );
        assert_matches!(
            Round::new('B', letters("BbQR"), letters("BKQR")),
            Err(GameError::InvalidRound(_))
        );
        assert_matches!(
            Round::new('B', letters("BKKR"), letters("BKQR")),
            Err(GameError::InvalidRound(_))
        );
        assert_matches!(
            Round::new('B', letters("BKQ"), letters("BKQR")),
            Err(GameError::InvalidRound(_))
        );
        assert_matches!(
            Round::new('7', letters("BKQR"), letters("BKQR")),
            Err(GameError::InvalidRound(_))
        );
    }
}
