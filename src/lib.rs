pub mod app;
pub mod app_dirs;
pub mod celebration;
pub mod config;
pub mod countdown;
pub mod difficulty;
pub mod game;
pub mod pad;
pub mod question;
pub mod runtime;
pub mod sound;
pub mod ui;

pub use app::App;
pub use difficulty::Difficulty;
pub use game::{Game, GameError, GameEvent, GameSession, GameState, Outcome};
pub use question::{Question, QuestionSource};
