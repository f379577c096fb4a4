pub mod hangman;
pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::{
    app::App,
    celebration::Celebration,
    game::{GameSession, MAX_MISTAKES},
    question::QuestionSource,
    ui::screen::{current_screen, View},
};

const HORIZONTAL_MARGIN: u16 = 2;

impl<Q: QuestionSource> Widget for &App<Q> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = self.session();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints([
                Constraint::Length(1), // score + lives
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        render_header(&session, self.sound_on(), chunks[0], buf);

        let view = View {
            session: &session,
            entry: self.pad.as_str(),
            selected: self.selected,
        };
        current_screen(session.state).render(&view, chunks[2], buf);

        if self.celebration.is_active() {
            render_celebration_particles(&self.celebration, area, buf);
        }
    }
}

fn render_header(session: &GameSession, sound: bool, area: Rect, buf: &mut Buffer) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let score = Paragraph::new(Line::from(vec![
        Span::styled("★ ", Style::default().fg(Color::Yellow)),
        Span::styled(
            session.score.to_string(),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            if sound { "   ♪ on" } else { "   ♪ off" },
            Style::default().add_modifier(Modifier::DIM),
        ),
    ]));
    score.render(halves[0], buf);

    Paragraph::new(lives_line(session.lives_left()))
        .alignment(Alignment::Right)
        .render(halves[1], buf);
}

/// Full hearts for lives left, hollow ones for lives lost
fn lives_line(lives: u32) -> Line<'static> {
    let full = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);
    let lost = Style::default().fg(Color::DarkGray);
    let spans = (0..MAX_MISTAKES)
        .map(|i| {
            if i < lives {
                Span::styled("♥ ", full)
            } else {
                Span::styled("♡ ", lost)
            }
        })
        .collect::<Vec<_>>();
    Line::from(spans)
}

/// Render celebration particles on top of whatever screen is showing
fn render_celebration_particles(celebration: &Celebration, area: Rect, buf: &mut Buffer) {
    let colors = [
        Color::LightMagenta,
        Color::Magenta,
        Color::Cyan,
        Color::Yellow,
        Color::Green,
    ];

    for particle in &celebration.particles {
        if particle.x < 0.0 || particle.y < 0.0 {
            continue;
        }
        let x = particle.x.round() as u16;
        let y = particle.y.round() as u16;
        if x >= area.width || y >= area.height {
            continue;
        }

        let color = colors[particle.color_index % colors.len()];
        let life = particle.life();
        let style = if particle.is_text || life > 0.6 {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else if life > 0.25 {
            Style::default().fg(color)
        } else {
            Style::default().fg(color).add_modifier(Modifier::DIM)
        };

        if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
            cell.set_char(particle.symbol);
            cell.set_style(style);
        }
    }
}
