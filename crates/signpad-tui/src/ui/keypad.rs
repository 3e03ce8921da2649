//! Numeric keypad
//!
//! Mirrors the device's keypad layout. Highlighted while number entry is
//! active.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use signpad_app::SessionState;

use crate::App;

/// Rows taken by the keypad, borders included.
pub const HEIGHT: u16 = 9;

const ROWS: [[&str; 3]; 4] = [["7", "8", "9"], ["4", "5", "6"], ["1", "2", "3"], ["X", "0", "X"]];

/// Render the keypad.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let border = match app.session().state() {
        SessionState::Normal => Style::default(),
        SessionState::NumberEntry => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    };
    let block = Block::default().borders(Borders::ALL).border_style(border).title(" Keypad ");

    let digit = Style::default().fg(Color::Black).bg(Color::White);
    let function = Style::default().fg(Color::Black).bg(Color::Yellow);

    let mut lines = Vec::with_capacity(ROWS.len() * 2);
    for (i, row) in ROWS.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }

        let mut spans = vec![Span::raw(" ")];
        for (j, key) in row.iter().enumerate() {
            if j > 0 {
                spans.push(Span::raw("    "));
            }
            let style = if *key == "X" { function } else { digit };
            spans.push(Span::styled(*key, style));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
