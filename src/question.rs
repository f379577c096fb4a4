use crate::difficulty::Difficulty;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Both factors at or above this make a bonus question
pub const BONUS_FACTOR: u32 = 7;

/// A single multiplication problem. Replaced, never mutated, between rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub factor1: u32,
    pub factor2: u32,
    pub answer: u32,
    pub is_bonus: bool,
}

impl Question {
    pub fn new(factor1: u32, factor2: u32) -> Self {
        Self {
            factor1,
            factor2,
            answer: factor1 * factor2,
            is_bonus: factor1 >= BONUS_FACTOR && factor2 >= BONUS_FACTOR,
        }
    }
}

/// Draw a question for `difficulty`, factors uniform in `[1, max_factor]`
pub fn generate<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Question {
    let max = difficulty.max_factor();
    let factor1 = rng.gen_range(1..=max);
    let factor2 = rng.gen_range(1..=max);
    Question::new(factor1, factor2)
}

/// Where the game loop gets its next question from
pub trait QuestionSource {
    fn next_question(&mut self, difficulty: Difficulty) -> Question;
}

#[derive(Debug, Clone)]
pub struct RandomQuestions {
    rng: StdRng,
}

impl RandomQuestions {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomQuestions {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionSource for RandomQuestions {
    fn next_question(&mut self, difficulty: Difficulty) -> Question {
        generate(difficulty, &mut self.rng)
    }
}

/// Replays a fixed list of factor pairs, cycling when exhausted.
/// Pairs are used as given, regardless of the tier's factor range.
#[derive(Debug, Clone)]
pub struct ScriptedQuestions {
    pairs: Vec<(u32, u32)>,
    next: usize,
}

impl ScriptedQuestions {
    /// Falls back to a single `(1, 1)` pair when `pairs` is empty
    pub fn new(pairs: Vec<(u32, u32)>) -> Self {
        let pairs = if pairs.is_empty() {
            vec![(1, 1)]
        } else {
            pairs
        };
        Self { pairs, next: 0 }
    }
}

impl QuestionSource for ScriptedQuestions {
    fn next_question(&mut self, _difficulty: Difficulty) -> Question {
        let (a, b) = self.pairs[self.next % self.pairs.len()];
        self.next += 1;
        Question::new(a, b)
    }
}

impl<Q: QuestionSource + ?Sized> QuestionSource for Box<Q> {
    fn next_question(&mut self, difficulty: Difficulty) -> Question {
        (**self).next_question(difficulty)
    }
}
