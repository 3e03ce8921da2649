//! Device display
//!
//! Shows both display lines as the device would, with the button labels
//! printed beneath them.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use crate::App;

/// Rows taken by the display, borders included.
pub const HEIGHT: u16 = 5;

/// Labels of the buttons under the display.
const LABELS: &str = "LIKU Z  RHST ABW";

/// Render the display.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Display ");

    let lcd = Style::default().fg(Color::Black).bg(Color::Green);
    let label = Style::default().fg(Color::Black).bg(Color::White);

    let [top, bottom] = app.screen_lines();
    let lines = vec![Line::styled(top, lcd), Line::styled(bottom, lcd), Line::styled(LABELS, label)];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
