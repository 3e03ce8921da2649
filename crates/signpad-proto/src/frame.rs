//! Frame encoding and decoding.
//!
//! A frame is the unit of wire I/O:
//!
//! ```text
//! [body: n bytes] [checksum(body): 1 byte] [TERMINATOR]
//! ```
//!
//! The terminator is not escaped, so a body containing it cannot be framed.
//! The checksum byte is not escaped either: a body whose checksum happens to be
//! `0x0D` produces a frame that a terminator-scanning peer splits early.
//! [`decode`] works on a complete frame and is unaffected.

use bytes::{BufMut, Bytes, BytesMut};

use crate::{
    checksum,
    errors::{ProtocolError, Result},
};

/// Frame terminator (carriage return).
pub const TERMINATOR: u8 = b'\r';

/// Encode a body into a complete frame.
///
/// # Errors
///
/// - `ProtocolError::TerminatorInBody` if `body` contains [`TERMINATOR`]
pub fn encode(body: &[u8]) -> Result<Bytes> {
    let mut dst = BytesMut::with_capacity(body.len() + 2);
    encode_into(body, &mut dst)?;
    Ok(dst.freeze())
}

/// Encode a body into `dst`.
///
/// Nothing is written if the body is rejected.
///
/// # Errors
///
/// - `ProtocolError::TerminatorInBody` if `body` contains [`TERMINATOR`]
pub fn encode_into(body: &[u8], dst: &mut impl BufMut) -> Result<()> {
    if let Some(offset) = body.iter().position(|&b| b == TERMINATOR) {
        return Err(ProtocolError::TerminatorInBody { offset });
    }

    dst.put_slice(body);
    dst.put_u8(checksum(body));
    dst.put_u8(TERMINATOR);
    Ok(())
}

/// Decode a complete frame produced by [`encode`].
///
/// Expects exactly one trailing terminator and validates the trailing checksum.
///
/// # Errors
///
/// - `ProtocolError::MissingTerminator` if the last byte is not [`TERMINATOR`]
/// - `ProtocolError::FrameTooShort` if no checksum byte precedes it
/// - `ProtocolError::ChecksumMismatch` if the checksum does not match
/// - `ProtocolError::TerminatorInBody` if the body holds a second terminator
pub fn decode(frame: &[u8]) -> Result<Bytes> {
    let Some((&TERMINATOR, payload)) = frame.split_last() else {
        return Err(ProtocolError::MissingTerminator);
    };

    let body = InboundChecksum::Trailing.strip(payload)?;
    if let Some(offset) = body.iter().position(|&b| b == TERMINATOR) {
        return Err(ProtocolError::TerminatorInBody { offset });
    }

    Ok(body)
}

/// Where inbound payloads carry their checksum.
///
/// Outbound frames always carry a trailing checksum. The controller this crate
/// replaces treated the *first* inbound byte as the checksum and never checked
/// it. The two conventions are not interoperable, and which one the hardware
/// uses has not been confirmed, so both are available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InboundChecksum {
    /// Last payload byte is the checksum of the rest; validated and stripped.
    #[default]
    Trailing,

    /// First payload byte is dropped without validation.
    ///
    /// Payloads shorter than two bytes become an empty body.
    LeadingUnchecked,
}

impl InboundChecksum {
    /// Strip the checksum from a terminator-free payload, returning the body.
    ///
    /// # Errors
    ///
    /// Only [`InboundChecksum::Trailing`] fails:
    /// - `ProtocolError::FrameTooShort` if the payload is empty
    /// - `ProtocolError::ChecksumMismatch` if the checksum does not match
    pub fn strip(self, payload: &[u8]) -> Result<Bytes> {
        match self {
            Self::Trailing => {
                let Some((&actual, body)) = payload.split_last() else {
                    return Err(ProtocolError::FrameTooShort { expected: 1, actual: 0 });
                };

                let expected = checksum(body);
                if expected != actual {
                    return Err(ProtocolError::ChecksumMismatch { expected, actual });
                }

                Ok(Bytes::copy_from_slice(body))
            },
            Self::LeadingUnchecked => match payload {
                [_, body @ ..] if !body.is_empty() => Ok(Bytes::copy_from_slice(body)),
                _ => Ok(Bytes::new()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_appends_checksum_and_terminator() {
        let frame = encode(b"mQ").unwrap();

        assert_eq!(frame.as_ref(), &[b'm', b'Q', 0x7F ^ b'm' ^ b'Q', b'\r']);
    }

    #[test]
    fn encode_empty_body() {
        let frame = encode(b"").unwrap();

        assert_eq!(frame.as_ref(), &[0x7F, b'\r']);
    }

    #[test]
    fn encode_rejects_terminator() {
        let result = encode(b"m\rX");

        assert_eq!(result, Err(ProtocolError::TerminatorInBody { offset: 1 }));
    }

    #[test]
    fn encode_into_writes_nothing_on_error() {
        let mut dst = Vec::new();
        let result = encode_into(b"\r", &mut dst);

        assert!(result.is_err());
        assert!(dst.is_empty());
    }

    #[test]
    fn decode_inverts_encode() {
        let frame = encode(b"m?123").unwrap();

        assert_eq!(decode(&frame).unwrap().as_ref(), b"m?123");
    }

    #[test]
    fn decode_requires_terminator() {
        let frame = encode(b"mA").unwrap();

        assert_eq!(decode(&frame[..frame.len() - 1]), Err(ProtocolError::MissingTerminator));
        assert_eq!(decode(b""), Err(ProtocolError::MissingTerminator));
    }

    #[test]
    fn decode_rejects_embedded_terminator() {
        let body = b"a\rb";
        let mut frame = body.to_vec();
        frame.push(checksum(body));
        frame.push(TERMINATOR);

        assert_eq!(decode(&frame), Err(ProtocolError::TerminatorInBody { offset: 1 }));
    }

    #[test]
    fn decode_rejects_bare_terminator() {
        assert_eq!(decode(b"\r"), Err(ProtocolError::FrameTooShort { expected: 1, actual: 0 }));
    }

    #[test]
    fn trailing_rejects_corrupted_body() {
        let mut payload = b"mS".to_vec();
        payload.push(checksum(b"mS"));
        payload[1] = b'T';

        let result = InboundChecksum::Trailing.strip(&payload);

        assert_eq!(
            result,
            Err(ProtocolError::ChecksumMismatch { expected: checksum(b"mT"), actual: checksum(b"mS") })
        );
    }

    #[test]
    fn leading_unchecked_drops_first_byte_only() {
        let body = InboundChecksum::LeadingUnchecked.strip(b"XmC3402HELLO").unwrap();

        assert_eq!(body.as_ref(), b"mC3402HELLO");
    }

    #[test]
    fn leading_unchecked_short_payloads_are_empty() {
        assert!(InboundChecksum::LeadingUnchecked.strip(b"").unwrap().is_empty());
        assert!(InboundChecksum::LeadingUnchecked.strip(b"m").unwrap().is_empty());
    }

    #[test]
    fn default_convention_is_trailing() {
        assert_eq!(InboundChecksum::default(), InboundChecksum::Trailing);
    }
}
