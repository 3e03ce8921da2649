//! Terminal-agnostic keyboard input.

/// Keyboard input abstraction.
///
/// Decouples the input session from terminal libraries (crossterm, termion,
/// etc.) enabling deterministic simulation testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character.
    Char(char),
    /// Enter/Return key (commit number entry).
    Enter,
    /// Escape key (cancel number entry).
    Esc,
    /// Backspace key.
    Backspace,
}

impl KeyInput {
    /// Byte this key puts on the wire.
    ///
    /// Matches what a curses terminal in cbreak mode delivers: Enter is a
    /// line feed, Backspace is DEL. `None` for characters outside ASCII.
    pub fn wire_byte(self) -> Option<u8> {
        match self {
            Self::Char(c) => u8::try_from(c).ok().filter(u8::is_ascii),
            Self::Enter => Some(b'\n'),
            Self::Esc => Some(0x1B),
            Self::Backspace => Some(0x7F),
        }
    }
}
