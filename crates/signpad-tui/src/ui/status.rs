//! Status bar
//!
//! Displays the input mode and the inbound checksum convention.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use signpad_app::SessionState;
use signpad_proto::InboundChecksum;

use crate::App;

/// Render the status bar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let mode = match app.session().state() {
        SessionState::Normal => Span::styled("Normal", Style::default().fg(Color::Green)),
        SessionState::NumberEntry => Span::styled(
            "Number entry",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
    };

    let hint = match app.session().state() {
        SessionState::Normal => " | keys go straight to the device",
        SessionState::NumberEntry => " | Enter: send  Esc: cancel",
    };

    let checksum = match app.inbound() {
        InboundChecksum::Trailing => " | checksum: trailing",
        InboundChecksum::LeadingUnchecked => " | checksum: leading, unchecked",
    };

    let status_line = Line::from(vec![
        Span::raw(" "),
        mode,
        Span::raw(hint),
        Span::styled(checksum, Style::default().fg(Color::Gray)),
        Span::raw(" | Ctrl-C: quit"),
    ]);

    let paragraph =
        Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}
