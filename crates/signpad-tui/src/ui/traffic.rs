//! Traffic log
//!
//! Scrolling list of frames exchanged with the device, newest at the bottom.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};
use signpad_app::{Direction, TrafficEntry};

use crate::App;

const BORDER_SIZE: u16 = 2;

/// Render the traffic log.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Traffic ");

    let visible_height = usize::from(area.height.saturating_sub(BORDER_SIZE));
    let traffic = app.traffic();
    let skip = traffic.len().saturating_sub(visible_height);
    let items: Vec<ListItem> = traffic.entries().skip(skip).map(entry_item).collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn entry_item(entry: &TrafficEntry) -> ListItem<'static> {
    let prefix = match entry.direction {
        Direction::Inbound => Span::styled("in-> ", Style::default().fg(Color::Cyan)),
        Direction::Outbound => {
            Span::styled("out-> ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        },
    };

    let mut spans = vec![prefix, Span::raw(entry.text.clone())];
    if let Some(note) = &entry.note {
        spans.push(Span::styled(format!(" ({note})"), Style::default().fg(Color::Red)));
    }

    ListItem::new(Line::from(spans))
}
