//! Protocol error types.

use thiserror::Error;

/// Result alias for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors produced while encoding or decoding protocol frames.
///
/// None of these are fatal to a session. The control loop logs them and drops
/// the offending frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Body contains the frame terminator and cannot be framed.
    #[error("body contains frame terminator at offset {offset}")]
    TerminatorInBody {
        /// Offset of the first terminator byte.
        offset: usize,
    },

    /// Frame does not end with the terminator.
    #[error("frame is not terminated")]
    MissingTerminator,

    /// Frame is too short to carry a checksum byte.
    #[error("frame too short: expected at least {expected} bytes, got {actual}")]
    FrameTooShort {
        /// Minimum number of payload bytes.
        expected: usize,
        /// Bytes actually present.
        actual: usize,
    },

    /// Trailing checksum byte does not match the body.
    #[error("checksum mismatch: expected {expected:#04x}, got {actual:#04x}")]
    ChecksumMismatch {
        /// Checksum computed over the received body.
        expected: u8,
        /// Checksum byte carried by the frame.
        actual: u8,
    },

    /// Recognized command prefix with an unusable header.
    #[error("malformed {prefix} command: {reason}")]
    MalformedCommand {
        /// Two-character command prefix.
        prefix: &'static str,
        /// What was wrong with the header.
        reason: &'static str,
    },
}
