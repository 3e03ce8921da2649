//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard events and ratatui for rendering. The device is reached through
//! a [`SerialLink`].

use std::{
    io::{self, Stdout, stdout},
    time::Duration,
};

use bytes::Bytes;
use crossterm::{
    ExecutableCommand,
    cursor::Show,
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::{FutureExt, StreamExt};
use ratatui::{Terminal, backend::CrosstermBackend};
use signpad_app::{App, Driver, KeyInput, LinkEvent};
use thiserror::Error;

use crate::{
    link::{LinkError, SerialLink},
    ui,
};

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Serial link error.
    #[error("link error: {0}")]
    Link(#[from] LinkError),

    /// The operator pressed Ctrl-C.
    #[error("interrupted")]
    Interrupted,
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Handles terminal I/O (crossterm), rendering (ratatui) and the serial link.
/// Restores the terminal when dropped.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    link: SerialLink,
    resize_pending: bool,
}

impl TerminalDriver {
    /// Take over the terminal and drive `link`.
    ///
    /// # Errors
    ///
    /// Returns `TerminalError::Io` if raw mode or the alternate screen cannot
    /// be entered.
    pub fn new(link: SerialLink) -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        let event_stream = EventStream::new();

        Ok(Self { terminal, event_stream, link, resize_pending: false })
    }
}

/// Convert a crossterm key event to a `KeyInput`.
///
/// Returns `None` for keys the keypad has no byte for.
pub fn convert_key(event: &KeyEvent) -> Option<KeyInput> {
    match event.code {
        KeyCode::Char(c) => Some(KeyInput::Char(c)),
        KeyCode::Enter => Some(KeyInput::Enter),
        KeyCode::Backspace => Some(KeyInput::Backspace),
        KeyCode::Esc => Some(KeyInput::Esc),
        _ => None,
    }
}

fn is_interrupt(event: &KeyEvent) -> bool {
    event.code == KeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL)
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    async fn poll_frame(&mut self) -> Result<Option<LinkEvent>, Self::Error> {
        Ok(self.link.try_recv()?)
    }

    async fn poll_key(&mut self) -> Result<Option<KeyInput>, Self::Error> {
        // Drain non-key events until a usable key turns up or nothing is ready
        while let Some(maybe_event) = self.event_stream.next().now_or_never() {
            match maybe_event {
                Some(Ok(Event::Key(key_event))) if key_event.kind == KeyEventKind::Press => {
                    if is_interrupt(&key_event) {
                        return Err(TerminalError::Interrupted);
                    }
                    match convert_key(&key_event) {
                        Some(key) => return Ok(Some(key)),
                        None => tracing::debug!(code = ?key_event.code, "ignoring key"),
                    }
                },
                Some(Ok(Event::Resize(cols, rows))) => {
                    tracing::debug!(cols, rows, "terminal resized");
                    self.resize_pending = true;
                },
                Some(Ok(_)) => {},
                Some(Err(e)) => return Err(TerminalError::Io(e)),
                None => return Ok(None),
            }
        }

        Ok(None)
    }

    async fn send_frame(&mut self, frame: Bytes) -> Result<(), Self::Error> {
        self.link.send(&frame)?;
        Ok(())
    }

    fn take_resize(&mut self) -> bool {
        std::mem::take(&mut self.resize_pending)
    }

    fn reinitialize(&mut self) -> Result<(), Self::Error> {
        self.terminal.clear()?;
        Ok(())
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        self.terminal.draw(|frame| ui::render(frame, app))?;
        Ok(())
    }

    async fn idle(&mut self, period: Duration) {
        tokio::time::sleep(period).await;
    }

    fn stop(&mut self) {
        tracing::debug!("stopping terminal driver");
        let _ = self.terminal.show_cursor();
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
        let _ = stdout().execute(Show);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn keypad_keys_convert() {
        assert_eq!(
            convert_key(&press(KeyCode::Char('7'), KeyModifiers::NONE)),
            Some(KeyInput::Char('7'))
        );
        assert_eq!(convert_key(&press(KeyCode::Enter, KeyModifiers::NONE)), Some(KeyInput::Enter));
        assert_eq!(convert_key(&press(KeyCode::Esc, KeyModifiers::NONE)), Some(KeyInput::Esc));
        assert_eq!(
            convert_key(&press(KeyCode::Backspace, KeyModifiers::NONE)),
            Some(KeyInput::Backspace)
        );
    }

    #[test]
    fn navigation_keys_are_ignored() {
        for code in [KeyCode::Left, KeyCode::Up, KeyCode::Tab, KeyCode::F(1)] {
            assert_eq!(convert_key(&press(code, KeyModifiers::NONE)), None);
        }
    }

    #[test]
    fn ctrl_c_interrupts() {
        assert!(is_interrupt(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_interrupt(&press(KeyCode::Char('c'), KeyModifiers::NONE)));
    }
}
