//! Controller-to-device messages.

use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};

use crate::{errors::Result, frame};

/// A message sent by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    /// Status poll acknowledgment (`mQ`).
    StatusAck,
    /// Single keypress outside number entry (`m<key>`).
    Key(u8),
    /// Committed number entry (`m?<digits>`).
    NumberCommit(Bytes),
    /// Cancelled number entry (`m/`).
    NumberCancel,
}

impl Outbound {
    /// Frame body, without checksum or terminator.
    pub fn body(&self) -> Bytes {
        match self {
            Self::StatusAck => Bytes::from_static(b"mQ"),
            Self::NumberCancel => Bytes::from_static(b"m/"),
            Self::Key(key) => Bytes::copy_from_slice(&[b'm', *key]),
            Self::NumberCommit(digits) => {
                let mut body = BytesMut::with_capacity(digits.len() + 2);
                body.put_slice(b"m?");
                body.put_slice(digits);
                body.freeze()
            },
        }
    }

    /// Complete wire frame for this message.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::TerminatorInBody` if a key or digit is the terminator
    pub fn encode(&self) -> Result<Bytes> {
        frame::encode(&self.body())
    }
}

impl fmt::Display for Outbound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.body().escape_ascii())
    }
}
