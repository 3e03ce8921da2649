//! Device-to-controller commands.
//!
//! Commands are dispatched on their two-byte prefix:
//!
//! | Body | Meaning |
//! |---|---|
//! | `mC<mode><len-1><line><pos><text>` | display update |
//! | `mS` | status poll |
//!
//! Anything else parses as [`Command::Unknown`].

use bytes::Bytes;

use crate::errors::{ProtocolError, Result};

/// Prefix of display update commands.
pub const DISPLAY_UPDATE_PREFIX: &[u8; 2] = b"mC";

/// Prefix of status poll commands.
pub const STATUS_POLL_PREFIX: &[u8; 2] = b"mS";

/// Bytes a display update needs after its prefix.
pub const DISPLAY_UPDATE_MIN_LEN: usize = 6;

/// A command sent by the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Overwrite part of a display line.
    DisplayUpdate(DisplayUpdate),
    /// Liveness check; the controller must acknowledge.
    StatusPoll,
    /// Unrecognized body, kept for diagnostics.
    Unknown(Bytes),
}

/// Display update header and text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayUpdate {
    /// Display mode digit. Mode 3 requests number entry.
    pub mode: u8,
    /// Declared text length, 1 to 10.
    pub length: u8,
    /// Target line. Only 0 and 1 exist; any other digit writes nothing.
    pub line: u8,
    /// First column written, 0 to 9.
    pub pos: u8,
    /// Text to write. At most `length` bytes; fewer if the body was short.
    pub text: Bytes,
}

impl DisplayUpdate {
    /// Mode that switches the controller into number entry.
    pub const NUMBER_ENTRY_MODE: u8 = 3;

    /// Whether this update requests number entry.
    pub fn requests_number_entry(&self) -> bool {
        self.mode == Self::NUMBER_ENTRY_MODE
    }
}

impl Command {
    /// Parse a frame body (checksum and terminator already stripped).
    ///
    /// # Errors
    ///
    /// - `ProtocolError::MalformedCommand` if the body starts with the display
    ///   update prefix but has fewer than [`DISPLAY_UPDATE_MIN_LEN`] bytes after
    ///   it, or carries a non-digit header byte
    pub fn parse(body: &[u8]) -> Result<Self> {
        if let Some(rest) = body.strip_prefix(DISPLAY_UPDATE_PREFIX) {
            return parse_display_update(rest).map(Self::DisplayUpdate);
        }

        if body.starts_with(STATUS_POLL_PREFIX) {
            return Ok(Self::StatusPoll);
        }

        Ok(Self::Unknown(Bytes::copy_from_slice(body)))
    }
}

fn parse_display_update(rest: &[u8]) -> Result<DisplayUpdate> {
    const fn malformed(reason: &'static str) -> ProtocolError {
        ProtocolError::MalformedCommand { prefix: "mC", reason }
    }

    if rest.len() < DISPLAY_UPDATE_MIN_LEN {
        return Err(malformed("body too short"));
    }

    let [mode, len_minus_one, line, pos, text @ ..] = rest else {
        return Err(malformed("body too short"));
    };

    let digit = |b: u8| b.is_ascii_digit().then(|| b - b'0');

    let mode = digit(*mode).ok_or(malformed("mode is not a digit"))?;
    let length = digit(*len_minus_one).ok_or(malformed("length is not a digit"))? + 1;
    let line = digit(*line).ok_or(malformed("line is not a digit"))?;
    let pos = digit(*pos).ok_or(malformed("position is not a digit"))?;

    let take = text.len().min(usize::from(length));
    if take < usize::from(length) {
        tracing::debug!(declared = length, present = take, "display update text is short");
    }

    Ok(DisplayUpdate { mode, length, line, pos, text: Bytes::copy_from_slice(&text[..take]) })
}
