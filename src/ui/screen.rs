use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Widget},
};

use crate::{
    difficulty::Difficulty,
    game::{GameSession, GameState},
    pad::PAD_KEYS,
    ui::hangman::{figure_lines, FIGURE_HEIGHT},
};

/// What a screen gets to look at
pub struct View<'a> {
    pub session: &'a GameSession,
    pub entry: &'a str,
    pub selected: Difficulty,
}

/// A UI Screen boundary: one per game state
pub trait Screen {
    fn render(&self, view: &View, area: Rect, buf: &mut Buffer);
}

pub struct StartScreen;

impl Screen for StartScreen {
    fn render(&self, view: &View, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(1), // title
                Constraint::Length(1), // subtitle
                Constraint::Length(1),
                Constraint::Length(3), // tiers
                Constraint::Min(0),
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(Span::styled(
            "Magic Multiplication",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

        Paragraph::new(Span::styled(
            "Pick your adventure!",
            Style::default().add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

        let tiers: Vec<Line> = Difficulty::ALL
            .iter()
            .enumerate()
            .map(|(i, d)| {
                let selected = *d == view.selected;
                let base = Style::default().fg(tier_color(*d));
                let style = if selected {
                    base.add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    base
                };
                let name = d.to_string().to_uppercase();
                let label = format!("({}) {name:<7} {}", i + 1, d.blurb());
                Line::from(vec![
                    Span::raw(if selected { "› " } else { "  " }),
                    Span::styled(label, style),
                ])
            })
            .collect();
        Paragraph::new(tiers)
            .alignment(Alignment::Center)
            .render(chunks[4], buf);

        legend("(1/2/3) or ↑↓ + enter to play / (s)ound / (q)uit")
            .render(chunks[6], buf);
    }
}

pub struct PlayingScreen;

impl Screen for PlayingScreen {
    fn render(&self, view: &View, area: Rect, buf: &mut Buffer) {
        let session = view.session;
        let Some(question) = session.current_question else {
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // timer bar
                Constraint::Length(1), // bonus badge
                Constraint::Length(FIGURE_HEIGHT), // hangman
                Constraint::Length(1),
                Constraint::Length(1), // question
                Constraint::Length(1),
                Constraint::Length(PAD_KEYS.len() as u16),
                Constraint::Min(0),
                Constraint::Length(1), // legend
            ])
            .split(area);

        let fraction = session.time_fraction();
        Gauge::default()
            .gauge_style(Style::default().fg(time_color(fraction)))
            .ratio(fraction)
            .label(format!("{}s", session.time_left))
            .render(chunks[0], buf);

        if question.is_bonus {
            Paragraph::new(Span::styled(
                "★ HARD BONUS! ★",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center)
            .render(chunks[1], buf);
        }

        Paragraph::new(figure_lines(session.mistakes))
            .alignment(Alignment::Center)
            .render(chunks[2], buf);

        let bold = Style::default().add_modifier(Modifier::BOLD);
        let answer = if view.entry.is_empty() {
            Span::styled("?", Style::default().fg(Color::DarkGray))
        } else {
            Span::styled(view.entry.to_string(), bold.fg(Color::Red))
        };
        Paragraph::new(Line::from(vec![
            Span::styled(question.factor1.to_string(), bold.fg(Color::Magenta)),
            Span::styled(" × ", bold.fg(Color::LightRed)),
            Span::styled(question.factor2.to_string(), bold.fg(Color::Magenta)),
            Span::styled(" = ", bold.fg(Color::LightRed)),
            answer,
        ]))
        .alignment(Alignment::Center)
        .render(chunks[4], buf);

        let pad_rows: Vec<Line> = PAD_KEYS
            .iter()
            .map(|row| {
                let spans = row
                    .iter()
                    .map(|k| {
                        let style = match k {
                            'C' => Style::default().fg(Color::Yellow),
                            '✓' => Style::default().fg(Color::Green),
                            _ => Style::default().fg(Color::Magenta),
                        };
                        Span::styled(format!("[ {k} ]"), style)
                    })
                    .collect::<Vec<_>>();
                Line::from(spans)
            })
            .collect();
        Paragraph::new(pad_rows)
            .alignment(Alignment::Center)
            .render(chunks[6], buf);

        legend("digits / (enter) ✓ / (c)lear / (backspace) / (esc) menu")
            .render(chunks[8], buf);
    }
}

pub struct GameOverScreen;

impl Screen for GameOverScreen {
    fn render(&self, view: &View, area: Rect, buf: &mut Buffer) {
        let session = view.session;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(1), // title
                Constraint::Length(1),
                Constraint::Length(FIGURE_HEIGHT),
                Constraint::Length(1),
                Constraint::Length(1), // points
                Constraint::Min(0),
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(Span::styled(
            "Game over!",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

        Paragraph::new(figure_lines(session.mistakes))
            .alignment(Alignment::Center)
            .render(chunks[3], buf);

        Paragraph::new(Line::from(vec![
            Span::raw("Points: "),
            Span::styled(
                session.score.to_string(),
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
        ]))
        .alignment(Alignment::Center)
        .render(chunks[5], buf);

        legend("(enter) play again / (1/2/3) change level / (s)ound / (q)uit")
            .render(chunks[7], buf);
    }
}

fn legend(text: &'static str) -> Paragraph<'static> {
    Paragraph::new(Span::styled(
        text,
        Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM),
    ))
    .alignment(Alignment::Center)
}

fn tier_color(d: Difficulty) -> Color {
    match d {
        Difficulty::Easy => Color::Green,
        Difficulty::Medium => Color::Yellow,
        Difficulty::Hard => Color::Red,
    }
}

/// Timer bar colour by remaining fraction of the round
pub fn time_color(fraction: f64) -> Color {
    if fraction < 0.3 {
        Color::Red
    } else if fraction < 0.6 {
        Color::Yellow
    } else {
        Color::Green
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: GameState) -> Box<dyn Screen> {
    match state {
        GameState::Start => Box::new(StartScreen),
        GameState::Playing => Box::new(PlayingScreen),
        GameState::GameOver => Box::new(GameOverScreen),
    }
}
