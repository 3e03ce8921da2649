//! Application state machine.
//!
//! This module defines the [`App`] state machine, which owns the display
//! model and input session completely decoupled from I/O.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Strips and validates inbound checksums and interprets device commands.
//! - Advances the input session on keypresses.
//! - Records inbound and outbound traffic for display.

use signpad_proto::{InboundChecksum, Outbound};

use crate::{
    AppAction, AppEvent, DisplayBuffer, InputSession, SessionState, interpret,
    traffic::{Direction, TrafficEntry, TrafficLog},
};

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
#[derive(Debug, Clone)]
pub struct App {
    /// Device display contents.
    display: DisplayBuffer,
    /// Keypad mode and number-entry buffer.
    session: InputSession,
    /// Recent wire traffic.
    traffic: TrafficLog,
    /// Inbound checksum convention.
    inbound: InboundChecksum,
}

impl App {
    /// Create an App showing `display`, decoding inbound frames with `inbound`.
    pub fn new(display: DisplayBuffer, inbound: InboundChecksum) -> Self {
        Self { display, session: InputSession::new(), traffic: TrafficLog::default(), inbound }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Payload(payload) => self.handle_payload(&payload),
            AppEvent::LineTooLong { max } => {
                tracing::warn!(max, "inbound line too long, discarded");
                self.traffic.push(
                    TrafficEntry::new(Direction::Inbound, b"")
                        .with_note(format!("line longer than {max} bytes")),
                );
                vec![AppAction::Render]
            },
            AppEvent::Key(key) => {
                let before = self.session.state();
                let reply = self.session.handle_key(key);
                let changed = reply.is_some()
                    || before != self.session.state()
                    || self.session.state() == SessionState::NumberEntry;

                let mut actions = self.send(reply);
                if changed {
                    actions.push(AppAction::Render);
                }
                actions
            },
        }
    }

    fn handle_payload(&mut self, payload: &[u8]) -> Vec<AppAction> {
        let body = match self.inbound.strip(payload) {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, payload = %payload.escape_ascii(), "discarding frame");
                self.traffic.push(TrafficEntry::new(Direction::Inbound, payload).with_note(e.to_string()));
                return vec![AppAction::Render];
            },
        };

        match interpret(&body, &mut self.display, &mut self.session) {
            Ok(reply) => {
                self.traffic.push(TrafficEntry::new(Direction::Inbound, &body));
                let mut actions = self.send(reply);
                actions.push(AppAction::Render);
                actions
            },
            Err(e) => {
                tracing::debug!(error = %e, "ignoring command");
                self.traffic.push(TrafficEntry::new(Direction::Inbound, &body).with_note(e.to_string()));
                vec![AppAction::Render]
            },
        }
    }

    /// Record and emit an outbound message.
    fn send(&mut self, message: Option<Outbound>) -> Vec<AppAction> {
        match message {
            Some(message) => {
                self.traffic.push(TrafficEntry::new(Direction::Outbound, &message.body()));
                vec![AppAction::Send(message)]
            },
            None => vec![],
        }
    }

    /// Device display contents.
    pub fn display(&self) -> &DisplayBuffer {
        &self.display
    }

    /// Keypad input session.
    pub fn session(&self) -> &InputSession {
        &self.session
    }

    /// Recent wire traffic.
    pub fn traffic(&self) -> &TrafficLog {
        &self.traffic
    }

    /// Inbound checksum convention in use.
    pub fn inbound(&self) -> InboundChecksum {
        self.inbound
    }

    /// Both display lines as shown on screen.
    ///
    /// During number entry the typed digits overlay the end of line 0.
    pub fn screen_lines(&self) -> [String; 2] {
        let [top, bottom] = self.display.lines();
        let top = match self.session.overlay() {
            Some(overlay) => top.render_overlaid(overlay),
            None => top.render(),
        };
        [top, bottom.render()]
    }
}
