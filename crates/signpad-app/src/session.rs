//! Keypad input session.
//!
//! Outside number entry every key goes to the device immediately. While the
//! device has number entry active, digits accumulate locally and are sent as
//! one message on Enter, or dropped on Escape.
//!
//! ```text
//!            display update, mode 3
//!   Normal ---------------------------> NumberEntry --+
//!     ^                                  |   ^        | key: append
//!     |  Enter (m?..) / Esc (m/) /       |   +--------+
//!     |  display update, mode != 3       |
//!     +----------------------------------+
//! ```

use bytes::Bytes;
use signpad_proto::{Outbound, TERMINATOR};

use crate::KeyInput;

/// Maximum number of locally buffered number-entry keys.
pub const MAX_ENTRY_LEN: usize = 16;

/// Input mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Keys are sent one frame per press.
    #[default]
    Normal,
    /// Keys accumulate until Enter or Escape.
    NumberEntry,
}

/// Keypad state machine.
///
/// # Invariants
///
/// - `buffer.len() <= MAX_ENTRY_LEN`
/// - `buffer` is empty whenever the state is [`SessionState::Normal`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSession {
    state: SessionState,
    buffer: Vec<u8>,
}

impl InputSession {
    /// Session in Normal mode with an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mode.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Keys buffered during number entry.
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Overlay to show over display line 0. `None` outside number entry.
    pub fn overlay(&self) -> Option<&[u8]> {
        (self.state == SessionState::NumberEntry).then_some(self.buffer.as_slice())
    }

    /// Follow the mode carried by a device display update.
    ///
    /// Entering number entry always starts from an empty buffer, even if an
    /// entry was already in progress.
    pub fn apply_device_mode(&mut self, number_entry: bool) {
        let next = if number_entry { SessionState::NumberEntry } else { SessionState::Normal };
        if next != self.state {
            tracing::debug!(from = ?self.state, to = ?next, "device changed input mode");
        }

        self.state = next;
        self.buffer.clear();
    }

    /// Advance by one keypress, returning the message to send, if any.
    pub fn handle_key(&mut self, key: KeyInput) -> Option<Outbound> {
        let Some(byte) = key.wire_byte().filter(|&b| b != TERMINATOR) else {
            tracing::debug!(?key, "key has no wire representation");
            return None;
        };

        match self.state {
            SessionState::Normal => Some(Outbound::Key(byte)),
            SessionState::NumberEntry => match key {
                KeyInput::Esc => {
                    self.leave();
                    Some(Outbound::NumberCancel)
                },
                KeyInput::Enter => {
                    let digits = Bytes::from(std::mem::take(&mut self.buffer));
                    self.leave();
                    Some(Outbound::NumberCommit(digits))
                },
                KeyInput::Char(_) | KeyInput::Backspace => {
                    if self.buffer.len() < MAX_ENTRY_LEN {
                        self.buffer.push(byte);
                    } else {
                        tracing::debug!(?key, "number entry buffer full");
                    }
                    None
                },
            },
        }
    }

    fn leave(&mut self) {
        self.state = SessionState::Normal;
        self.buffer.clear();
    }
}
