//! The drill's state machine: Start → Playing → GameOver.
//!
//! `Game` is the single owner of score, mistakes, the live question and the
//! countdown. Every transition arms or cancels the countdown in the same call,
//! so a tick can never land on a question it was not armed for.

use crate::countdown::{Countdown, TimerSignal};
use crate::difficulty::Difficulty;
use crate::question::{Question, QuestionSource, RandomQuestions};
use log::{debug, info};
use std::time::Duration;
use thiserror::Error;

pub const MAX_MISTAKES: u32 = 6;
pub const POINTS_PER_ANSWER: u32 = 10;
pub const MILESTONE_STEP: u32 = 50;
/// Countdown beeps are emitted for the last this-many seconds
pub const BEEP_FROM_SECS: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum GameState {
    Start,
    Playing,
    GameOver,
}

/// Read-only view handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    pub state: GameState,
    pub difficulty: Difficulty,
    pub score: u32,
    pub mistakes: u32,
    pub current_question: Option<Question>,
    pub time_left: u32,
}

impl GameSession {
    pub fn lives_left(&self) -> u32 {
        MAX_MISTAKES.saturating_sub(self.mistakes)
    }

    /// Fraction of the round's time budget still left, in `[0, 1]`
    pub fn time_fraction(&self) -> f64 {
        let total = self.difficulty.timer_secs();
        if total == 0 {
            return 0.0;
        }
        (self.time_left as f64 / total as f64).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Outcome {
    pub correct: bool,
    pub milestone_hit: bool,
    pub bonus_hit: bool,
    pub game_over: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeCause {
    Answered,
    TimedOut,
}

/// Things that happened inside the loop, queued for whoever renders or plays sounds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    RoundStarted { question: Question, time_left: u32 },
    Correct { score: u32 },
    Milestone { score: u32 },
    Bonus { score: u32 },
    Incorrect { mistakes: u32, cause: OutcomeCause },
    CountdownBeep { remaining: u32 },
    GameOver { score: u32 },
    Abandoned,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("cannot {action} while the game is in the {state} state")]
    InvalidState {
        action: &'static str,
        state: GameState,
    },
}

#[derive(Debug)]
pub struct Game<Q: QuestionSource = RandomQuestions> {
    questions: Q,
    state: GameState,
    difficulty: Difficulty,
    score: u32,
    mistakes: u32,
    current: Option<Question>,
    countdown: Countdown,
    events: Vec<GameEvent>,
}

impl Game<RandomQuestions> {
    pub fn new() -> Self {
        Self::with_source(RandomQuestions::new())
    }
}

impl Default for Game<RandomQuestions> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Q: QuestionSource> Game<Q> {
    pub fn with_source(questions: Q) -> Self {
        Self {
            questions,
            state: GameState::Start,
            difficulty: Difficulty::default(),
            score: 0,
            mistakes: 0,
            current: None,
            countdown: Countdown::new(),
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Generation of the live countdown; changes every time a round is armed
    pub fn round(&self) -> u64 {
        self.countdown.round()
    }

    pub fn snapshot(&self) -> GameSession {
        GameSession {
            state: self.state,
            difficulty: self.difficulty,
            score: self.score,
            mistakes: self.mistakes,
            current_question: self.current,
            time_left: self.countdown.remaining(),
        }
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Valid from every state; wipes the previous session
    pub fn start_game(&mut self, difficulty: Difficulty) {
        info!("starting game at {difficulty} (previous state {})", self.state);
        self.countdown.cancel();
        self.difficulty = difficulty;
        self.score = 0;
        self.mistakes = 0;
        self.state = GameState::Playing;
        self.next_round();
    }

    pub fn submit_answer(&mut self, raw: &str) -> Result<Outcome, GameError> {
        let question = match (self.state, self.current) {
            (GameState::Playing, Some(q)) => q,
            (state, _) => {
                return Err(GameError::InvalidState {
                    action: "submit an answer",
                    state,
                });
            }
        };

        let outcome = match raw.trim().parse::<u32>() {
            Ok(value) if value == question.answer => self.resolve_correct(question),
            _ => self.resolve_incorrect(OutcomeCause::Answered),
        };
        Ok(outcome)
    }

    /// Leave a running round and go back to the menu
    pub fn abandon(&mut self) -> Result<(), GameError> {
        if self.state != GameState::Playing {
            return Err(GameError::InvalidState {
                action: "abandon the round",
                state: self.state,
            });
        }
        info!("round abandoned at score {}", self.score);
        self.countdown.cancel();
        self.current = None;
        self.state = GameState::Start;
        self.events.push(GameEvent::Abandoned);
        Ok(())
    }

    /// One second of game time. Returns the timeout outcome if the round expired.
    pub fn on_tick(&mut self) -> Option<Outcome> {
        if self.state != GameState::Playing {
            return None;
        }
        match self.countdown.tick()? {
            TimerSignal::Second { remaining } => {
                if (1..=BEEP_FROM_SECS).contains(&remaining) {
                    self.events.push(GameEvent::CountdownBeep { remaining });
                }
                None
            }
            TimerSignal::Expired => {
                debug!("question timed out");
                Some(self.resolve_incorrect(OutcomeCause::TimedOut))
            }
        }
    }

    /// Feed wall-clock time; runs `on_tick` once per whole second elapsed.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<Outcome> {
        let due = self.countdown.advance(elapsed);
        let mut outcomes = Vec::new();
        for _ in 0..due {
            if self.state != GameState::Playing {
                break;
            }
            if let Some(outcome) = self.on_tick() {
                outcomes.push(outcome);
            }
        }
        outcomes
    }

    fn resolve_correct(&mut self, answered: Question) -> Outcome {
        self.score += POINTS_PER_ANSWER;
        let milestone_hit = self.score > 0 && self.score % MILESTONE_STEP == 0;
        let bonus_hit = !milestone_hit && answered.is_bonus;
        debug!(
            "correct: {} x {} = {}, score {}",
            answered.factor1, answered.factor2, answered.answer, self.score
        );

        self.events.push(GameEvent::Correct { score: self.score });
        if milestone_hit {
            self.events.push(GameEvent::Milestone { score: self.score });
        } else if bonus_hit {
            self.events.push(GameEvent::Bonus { score: self.score });
        }

        self.next_round();
        Outcome {
            correct: true,
            milestone_hit,
            bonus_hit,
            game_over: false,
        }
    }

    fn resolve_incorrect(&mut self, cause: OutcomeCause) -> Outcome {
        self.mistakes += 1;
        debug!("incorrect ({cause:?}), mistakes {}", self.mistakes);
        self.events.push(GameEvent::Incorrect {
            mistakes: self.mistakes,
            cause,
        });

        let game_over = self.mistakes >= MAX_MISTAKES;
        if game_over {
            info!("game over with score {}", self.score);
            self.countdown.cancel();
            self.current = None;
            self.state = GameState::GameOver;
            self.events.push(GameEvent::GameOver { score: self.score });
        } else {
            self.next_round();
        }

        Outcome {
            game_over,
            ..Outcome::default()
        }
    }

    fn next_round(&mut self) {
        let question = self.questions.next_question(self.difficulty);
        let time_left = self.difficulty.timer_secs();
        self.current = Some(question);
        self.countdown.arm(time_left);
        self.events.push(GameEvent::RoundStarted {
            question,
            time_left,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::ScriptedQuestions;
    use assert_matches::assert_matches;

    fn scripted(pairs: &[(u32, u32)]) -> Game<ScriptedQuestions> {
        Game::with_source(ScriptedQuestions::new(pairs.to_vec()))
    }

    #[test]
    fn test_new_game_waits_at_start() {
        let game = scripted(&[(2, 2)]);
        let snap = game.snapshot();
        assert_eq!(snap.state, GameState::Start);
        assert_eq!(snap.current_question, None);
        assert_eq!(snap.time_left, 0);
        assert_eq!(snap.lives_left(), MAX_MISTAKES);
    }

    #[test]
    fn test_start_game_arms_first_round() {
        let mut game = scripted(&[(3, 4)]);
        game.start_game(Difficulty::Easy);

        let snap = game.snapshot();
        assert_eq!(snap.state, GameState::Playing);
        assert_eq!(snap.current_question, Some(Question::new(3, 4)));
        assert_eq!(snap.time_left, 15);
        assert_matches!(
            game.drain_events().as_slice(),
            [GameEvent::RoundStarted { time_left: 15, .. }]
        );
    }

    #[test]
    fn test_submit_outside_playing_is_rejected() {
        let mut game = scripted(&[(3, 4)]);
        assert_eq!(
            game.submit_answer("12"),
            Err(GameError::InvalidState {
                action: "submit an answer",
                state: GameState::Start,
            })
        );
        assert_eq!(game.snapshot().score, 0);
    }

    #[test]
    fn test_correct_answer_scores_and_rearms() {
        let mut game = scripted(&[(3, 4), (2, 5)]);
        game.start_game(Difficulty::Easy);
        game.on_tick();
        game.on_tick();
        assert_eq!(game.snapshot().time_left, 13);
        let round = game.round();

        let outcome = game.submit_answer("12").unwrap();
        assert!(outcome.correct);
        assert!(!outcome.game_over);

        let snap = game.snapshot();
        assert_eq!(snap.score, 10);
        assert_eq!(snap.time_left, 15);
        assert_eq!(snap.current_question, Some(Question::new(2, 5)));
        assert_eq!(game.round(), round + 1);
    }

    #[test]
    fn test_wrong_and_garbage_answers_count_as_mistakes() {
        let mut game = scripted(&[(3, 4)]);
        game.start_game(Difficulty::Easy);
        for raw in ["5", "", "abc", "99999999999"] {
            let outcome = game.submit_answer(raw).unwrap();
            assert!(!outcome.correct);
        }
        assert_eq!(game.snapshot().mistakes, 4);
        assert_eq!(game.snapshot().state, GameState::Playing);
    }

    #[test]
    fn test_answer_with_whitespace_is_accepted() {
        let mut game = scripted(&[(3, 4)]);
        game.start_game(Difficulty::Easy);
        assert!(game.submit_answer(" 12 ").unwrap().correct);
        assert!(game.submit_answer("012").unwrap().correct);
    }

    #[test]
    fn test_milestone_beats_bonus() {
        let mut game = scripted(&[(7, 8)]);
        game.start_game(Difficulty::Hard);
        for _ in 0..4 {
            let outcome = game.submit_answer("56").unwrap();
            assert!(outcome.bonus_hit);
            assert!(!outcome.milestone_hit);
        }
        game.drain_events();

        let outcome = game.submit_answer("56").unwrap();
        assert!(outcome.milestone_hit);
        assert!(!outcome.bonus_hit);

        let events = game.drain_events();
        assert!(events.contains(&GameEvent::Milestone { score: 50 }));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::Bonus { .. })));
    }

    #[test]
    fn test_sixth_mistake_ends_game() {
        let mut game = scripted(&[(2, 3)]);
        game.start_game(Difficulty::Medium);
        for _ in 0..5 {
            assert!(!game.submit_answer("0").unwrap().game_over);
        }
        let outcome = game.submit_answer("0").unwrap();
        assert!(outcome.game_over);

        let snap = game.snapshot();
        assert_eq!(snap.state, GameState::GameOver);
        assert_eq!(snap.mistakes, 6);
        assert_eq!(snap.current_question, None);
        assert_eq!(snap.time_left, 0);
        assert_matches!(game.submit_answer("6"), Err(GameError::InvalidState { .. }));
        assert_eq!(game.on_tick(), None);
        assert_eq!(game.snapshot(), snap);
    }

    #[test]
    fn test_timeout_counts_as_mistake() {
        let mut game = scripted(&[(2, 3), (4, 4)]);
        game.start_game(Difficulty::Hard);
        let mut outcome = None;
        for _ in 0..Difficulty::Hard.timer_secs() {
            outcome = game.on_tick();
        }
        assert_eq!(outcome, Some(Outcome::default()));

        let snap = game.snapshot();
        assert_eq!(snap.mistakes, 1);
        assert_eq!(snap.time_left, 7);
        assert_eq!(snap.current_question, Some(Question::new(4, 4)));
        assert!(game.drain_events().contains(&GameEvent::Incorrect {
            mistakes: 1,
            cause: OutcomeCause::TimedOut,
        }));
    }

    #[test]
    fn test_countdown_beeps_last_four_seconds() {
        let mut game = scripted(&[(2, 3)]);
        game.start_game(Difficulty::Hard);
        game.drain_events();
        for _ in 0..6 {
            game.on_tick();
        }
        let beeps: Vec<u32> = game
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                GameEvent::CountdownBeep { remaining } => Some(remaining),
                _ => None,
            })
            .collect();
        assert_eq!(beeps, vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_advance_uses_wall_clock() {
        let mut game = scripted(&[(2, 3)]);
        game.start_game(Difficulty::Medium);
        assert!(game.advance(Duration::from_millis(999)).is_empty());
        assert_eq!(game.snapshot().time_left, 10);
        game.advance(Duration::from_millis(1));
        assert_eq!(game.snapshot().time_left, 9);

        let outcomes = game.advance(Duration::from_secs(9));
        assert_eq!(outcomes.len(), 1);
        assert_eq!(game.snapshot().mistakes, 1);
    }

    #[test]
    fn test_advance_stops_at_game_over() {
        let mut game = scripted(&[(2, 3)]);
        game.start_game(Difficulty::Hard);
        let outcomes = game.advance(Duration::from_secs(600));
        assert_eq!(outcomes.len(), 6);
        assert!(outcomes.last().unwrap().game_over);
        assert_eq!(game.state(), GameState::GameOver);
    }

    #[test]
    fn test_abandon_cancels_round() {
        let mut game = scripted(&[(2, 3)]);
        game.start_game(Difficulty::Easy);
        game.submit_answer("6").unwrap();
        game.abandon().unwrap();

        let snap = game.snapshot();
        assert_eq!(snap.state, GameState::Start);
        assert_eq!(snap.current_question, None);
        assert_eq!(snap.time_left, 0);
        assert_eq!(snap.score, 10);
        assert!(game.advance(Duration::from_secs(60)).is_empty());
        assert_matches!(game.abandon(), Err(GameError::InvalidState { .. }));
    }

    #[test]
    fn test_restart_resets_counters() {
        let mut game = scripted(&[(2, 3)]);
        game.start_game(Difficulty::Easy);
        game.submit_answer("6").unwrap();
        game.submit_answer("7").unwrap();
        game.start_game(Difficulty::Hard);

        let snap = game.snapshot();
        assert_eq!(snap.score, 0);
        assert_eq!(snap.mistakes, 0);
        assert_eq!(snap.difficulty, Difficulty::Hard);
        assert_eq!(snap.time_left, 7);
    }

    #[test]
    fn test_error_message() {
        let err = GameError::InvalidState {
            action: "submit an answer",
            state: GameState::GameOver,
        };
        assert_eq!(
            err.to_string(),
            "cannot submit an answer while the game is in the GameOver state"
        );
    }

    #[test]
    fn test_time_fraction() {
        let mut game = scripted(&[(2, 3)]);
        game.start_game(Difficulty::Medium);
        for _ in 0..3 {
            game.on_tick();
        }
        assert!((game.snapshot().time_fraction() - 0.7).abs() < 1e-9);
    }
}
