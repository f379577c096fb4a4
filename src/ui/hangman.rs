use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::game::MAX_MISTAKES;

const GALLOWS_TOP: [&str; 2] = ["  +---+  ", "  |   |  "];
const POLE: &str = " |  ";
const BASE: &str = "=========";

/// Body rows (four of them, five cells wide) for a mistake count.
/// Parts appear in order: head, body, left arm, right arm, left leg, right leg.
fn body_rows(mistakes: u32) -> [String; 4] {
    let m = mistakes.min(MAX_MISTAKES);
    let part = |n: u32, c: char| if m >= n { c } else { ' ' };
    // the last mistake swaps in a dead face
    let head = if m >= MAX_MISTAKES { 'X' } else { part(1, 'O') };

    [
        format!("  {head}  "),
        format!(" {}{}{} ", part(3, '/'), part(2, '|'), part(4, '\\')),
        format!(" {} {} ", part(5, '/'), part(6, '\\')),
        "     ".to_string(),
    ]
}

/// Plain-text figure, top to bottom
pub fn figure(mistakes: u32) -> Vec<String> {
    let mut rows: Vec<String> = GALLOWS_TOP.iter().map(|s| s.to_string()).collect();
    for body in body_rows(mistakes) {
        rows.push(format!("{body}{POLE}"));
    }
    rows.push(BASE.to_string());
    rows
}

/// Styled figure: gallows in magenta, the figure in red
pub fn figure_lines(mistakes: u32) -> Vec<Line<'static>> {
    let gallows = Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD);
    let body = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line<'static>> = GALLOWS_TOP
        .iter()
        .map(|s| Line::from(Span::styled(*s, gallows)))
        .collect();
    for row in body_rows(mistakes) {
        lines.push(Line::from(vec![
            Span::styled(row, body),
            Span::styled(POLE, gallows),
        ]));
    }
    lines.push(Line::from(Span::styled(BASE, gallows)));
    lines
}

pub const FIGURE_HEIGHT: u16 = 7;
