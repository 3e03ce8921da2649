//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! returning widget trees.

mod display;
mod keypad;
mod status;
mod traffic;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use crate::App;

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    const MAIN_AREA_MIN_HEIGHT: u16 = 3;
    const STATUS_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(MAIN_AREA_MIN_HEIGHT), Constraint::Length(STATUS_HEIGHT)])
        .split(frame.area());

    let [main_area, status_area] = chunks.as_ref() else {
        return;
    };

    render_main_area(frame, app, *main_area);
    status::render(frame, app, *status_area);
}

/// Render the main area (device panel + traffic log).
fn render_main_area(frame: &mut Frame, app: &App, area: Rect) {
    const PANEL_WIDTH: u16 = 20;
    const TRAFFIC_AREA_MIN_WIDTH: u16 = 20;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(PANEL_WIDTH), Constraint::Min(TRAFFIC_AREA_MIN_WIDTH)])
        .split(area);

    let [panel_area, traffic_area] = chunks.as_ref() else {
        return;
    };

    render_panel(frame, app, *panel_area);
    traffic::render(frame, app, *traffic_area);
}

/// Render the device panel (display above keypad).
fn render_panel(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(display::HEIGHT),
            Constraint::Length(keypad::HEIGHT),
            Constraint::Min(0),
        ])
        .split(area);

    let [display_area, keypad_area, _] = chunks.as_ref() else {
        return;
    };

    display::render(frame, app, *display_area);
    keypad::render(frame, app, *keypad_area);
}
