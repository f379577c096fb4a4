use crate::celebration::{Celebration, Intensity};
use crate::config::{Config, ConfigStore};
use crate::difficulty::Difficulty;
use crate::game::{Game, GameEvent, GameSession, GameState};
use crate::pad::AnswerPad;
use crate::question::{QuestionSource, RandomQuestions};
use crate::sound::{Cue, CueSink};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{debug, warn};
use std::time::Duration;

/// Everything the terminal front end needs: the game plus its effects
pub struct App<Q: QuestionSource = RandomQuestions> {
    pub game: Game<Q>,
    pub pad: AnswerPad,
    pub celebration: Celebration,
    pub config: Config,
    /// Tier highlighted on the start menu
    pub selected: Difficulty,
    /// `--mute` for this run only; never saved
    pub muted: bool,
    pub viewport: (u16, u16),
    pub should_quit: bool,
    store: Box<dyn ConfigStore>,
    cues: Box<dyn CueSink>,
}

impl<Q: QuestionSource> App<Q> {
    pub fn new(game: Game<Q>, store: Box<dyn ConfigStore>, cues: Box<dyn CueSink>) -> Self {
        let config = store.load();
        Self {
            game,
            pad: AnswerPad::new(),
            celebration: Celebration::new(),
            selected: config.difficulty,
            config,
            muted: false,
            viewport: (80, 24),
            should_quit: false,
            store,
            cues,
        }
    }

    pub fn session(&self) -> GameSession {
        self.game.snapshot()
    }

    pub fn sound_on(&self) -> bool {
        self.config.sound && !self.muted
    }

    /// `--mute` for this run; stops the music too
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.sync_music();
    }

    pub fn start(&mut self, difficulty: Difficulty) {
        self.selected = difficulty;
        if self.config.difficulty != difficulty {
            self.config.difficulty = difficulty;
            self.persist();
        }
        self.pad.clear();
        self.celebration.stop();
        self.cue(Cue::Click);
        self.game.start_game(difficulty);
        self.pump_events();
    }

    pub fn submit(&mut self) {
        let raw = self.pad.take();
        self.cue(Cue::Submit);
        if let Err(e) = self.game.submit_answer(&raw) {
            debug!("ignored submission: {e}");
        }
        self.pump_events();
    }

    pub fn toggle_sound(&mut self) {
        self.config.sound = !self.config.sound;
        self.persist();
        self.cue(Cue::Click);
        self.sync_music();
    }

    pub fn on_resize(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
    }

    /// Wall-clock time passed since the last step
    pub fn on_tick(&mut self, elapsed: Duration) {
        self.game.advance(elapsed);
        self.celebration.update(elapsed.as_secs_f64());
        self.pump_events();
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.game.state() {
            GameState::Start => self.on_menu_key(key),
            GameState::Playing => self.on_pad_key(key),
            GameState::GameOver => self.on_game_over_key(key),
        }
    }

    fn on_menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Enter => self.start(self.selected),
            KeyCode::Up => self.selected = step_tier(self.selected, -1),
            KeyCode::Down => self.selected = step_tier(self.selected, 1),
            KeyCode::Char('s') => self.toggle_sound(),
            KeyCode::Char(c) => {
                if let Some(d) = Difficulty::from_menu_key(c) {
                    self.start(d);
                }
            }
            _ => {}
        }
    }

    fn on_pad_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.pad.clear();
                if let Err(e) = self.game.abandon() {
                    warn!("{e}");
                }
                self.pump_events();
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.submit(),
            KeyCode::Backspace => self.pad.backspace(),
            KeyCode::Delete | KeyCode::Char('c') | KeyCode::Char('C') => {
                self.pad.clear();
                self.cue(Cue::Clear);
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if self.pad.push_digit(c) {
                    self.cue(Cue::Click);
                }
            }
            _ => {}
        }
    }

    fn on_game_over_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Enter | KeyCode::Char('r') => self.start(self.game.difficulty()),
            KeyCode::Char('s') => self.toggle_sound(),
            KeyCode::Char(c) => {
                if let Some(d) = Difficulty::from_menu_key(c) {
                    self.start(d);
                }
            }
            _ => {}
        }
    }

    /// React to whatever the game loop reported since the last call
    fn pump_events(&mut self) {
        for event in self.game.drain_events() {
            match event {
                GameEvent::RoundStarted { .. } => self.pad.clear(),
                GameEvent::Milestone { .. } => {
                    let (w, h) = self.viewport;
                    self.celebration.start(Intensity::Mega, w, h);
                }
                GameEvent::Bonus { .. } => {
                    let (w, h) = self.viewport;
                    self.celebration.start(Intensity::Normal, w, h);
                }
                _ => {}
            }
            if let Some(cue) = Cue::from_event(&event) {
                self.cue(cue);
            }
        }
        self.sync_music();
    }

    /// The melody plays during a round while sound is on
    fn sync_music(&mut self) {
        let on = self.sound_on() && self.game.state() == GameState::Playing;
        self.cues.set_music(on);
    }

    fn cue(&mut self, cue: Cue) {
        if self.sound_on() {
            self.cues.play(cue);
        }
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.config) {
            warn!("failed to save preferences: {e}");
        }
    }
}

fn step_tier(current: Difficulty, delta: isize) -> Difficulty {
    let all = Difficulty::ALL;
    let idx = all.iter().position(|d| *d == current).unwrap_or(0) as isize;
    let next = (idx + delta).rem_euclid(all.len() as isize) as usize;
    all[next]
}
