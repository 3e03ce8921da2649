//! Buffered frame reader.
//!
//! [`FrameReader`] scans an arbitrary byte source for [`TERMINATOR`] and hands
//! out one payload per call. It reads in chunks rather than byte-at-a-time, but
//! never returns more than one frame per call: further complete frames stay
//! buffered for the following calls.

use std::io::{self, Read};

use bytes::{Bytes, BytesMut};
use thiserror::Error;

use crate::TERMINATOR;

/// Default frame capacity, terminator excluded.
pub const DEFAULT_MAX_FRAME_LEN: usize = 256;

const READ_CHUNK: usize = 64;

/// Outcome of a single [`FrameReader::read_frame`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// One complete payload, terminator stripped.
    Payload(Bytes),
    /// Source has no data right now (`WouldBlock` or `TimedOut`).
    Pending,
    /// Source closed.
    EndOfStream,
}

/// Errors produced by [`FrameReader::read_frame`].
#[derive(Debug, Error)]
pub enum ReadError {
    /// A line reached the frame capacity before its terminator.
    ///
    /// The rest of the line is discarded; the next call resumes at the
    /// following frame.
    #[error("line exceeds maximum length of {max} bytes")]
    LineTooLong {
        /// Frame capacity in bytes.
        max: usize,
    },

    /// The source failed.
    #[error("read failed: {0}")]
    Io(#[from] io::Error),
}

/// Terminator-scanning reader over a byte source.
#[derive(Debug)]
pub struct FrameReader<R> {
    inner: R,
    buf: BytesMut,
    max_len: usize,
    /// Dropping bytes until the next terminator after an overlong line.
    discarding: bool,
}

impl<R: Read> FrameReader<R> {
    /// Create a reader with [`DEFAULT_MAX_FRAME_LEN`] capacity.
    pub fn new(inner: R) -> Self {
        Self::with_max_len(inner, DEFAULT_MAX_FRAME_LEN)
    }

    /// Create a reader that rejects payloads of `max_len` bytes or more.
    pub fn with_max_len(inner: R, max_len: usize) -> Self {
        Self { inner, buf: BytesMut::with_capacity(max_len), max_len, discarding: false }
    }

    /// Frame capacity in bytes.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Number of bytes buffered but not yet returned.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    /// Read the next frame payload.
    ///
    /// Returns buffered frames before touching the source. Blocks only if the
    /// source blocks.
    ///
    /// # Errors
    ///
    /// - `ReadError::LineTooLong` if a line reaches the capacity
    /// - `ReadError::Io` if the source fails with anything other than
    ///   `WouldBlock`, `TimedOut` or `Interrupted`
    pub fn read_frame(&mut self) -> Result<ReadOutcome, ReadError> {
        loop {
            if let Some(pos) = self.buf.iter().position(|&b| b == TERMINATOR) {
                let mut line = self.buf.split_to(pos + 1);
                line.truncate(pos);

                if self.discarding {
                    self.discarding = false;
                    tracing::debug!(dropped = line.len(), "resynchronized after overlong line");
                    continue;
                }

                if line.len() >= self.max_len {
                    return Err(ReadError::LineTooLong { max: self.max_len });
                }

                return Ok(ReadOutcome::Payload(line.freeze()));
            }

            if self.discarding {
                self.buf.clear();
            } else if self.buf.len() >= self.max_len {
                self.buf.clear();
                self.discarding = true;
                return Err(ReadError::LineTooLong { max: self.max_len });
            }

            let mut chunk = [0u8; READ_CHUNK];
            match self.inner.read(&mut chunk) {
                Ok(0) => {
                    if !self.buf.is_empty() {
                        tracing::debug!(
                            dropped = self.buf.len(),
                            "discarding unterminated line at end of stream"
                        );
                        self.buf.clear();
                    }
                    return Ok(ReadOutcome::EndOfStream);
                },
                Ok(n) => self.buf.extend_from_slice(&chunk[..n]),
                Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => {
                    return Ok(ReadOutcome::Pending);
                },
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {},
                Err(e) => return Err(ReadError::Io(e)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::VecDeque, io::Cursor};

    use super::*;

    /// Source that replays scripted read results.
    struct Scripted(VecDeque<io::Result<Vec<u8>>>);

    impl Scripted {
        fn new(steps: impl IntoIterator<Item = io::Result<Vec<u8>>>) -> Self {
            Self(steps.into_iter().collect())
        }
    }

    impl Read for Scripted {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.0.pop_front() {
                None => Ok(0),
                Some(Err(e)) => Err(e),
                Some(Ok(bytes)) => {
                    assert!(bytes.len() <= buf.len(), "scripted chunk larger than read buffer");
                    buf[..bytes.len()].copy_from_slice(&bytes);
                    Ok(bytes.len())
                },
            }
        }
    }

    fn payload(bytes: &[u8]) -> ReadOutcome {
        ReadOutcome::Payload(Bytes::copy_from_slice(bytes))
    }

    #[test]
    fn reads_single_frame() {
        let mut reader = FrameReader::new(Cursor::new(b"mS\x5e\r".to_vec()));

        assert_eq!(reader.read_frame().unwrap(), payload(b"mS\x5e"));
        assert_eq!(reader.read_frame().unwrap(), ReadOutcome::EndOfStream);
    }

    #[test]
    fn returns_one_frame_per_call() {
        let mut reader = FrameReader::new(Cursor::new(b"one\rtwo\rthree\r".to_vec()));

        assert_eq!(reader.read_frame().unwrap(), payload(b"one"));
        assert_eq!(reader.buffered(), b"two\rthree\r".len());
        assert_eq!(reader.read_frame().unwrap(), payload(b"two"));
        assert_eq!(reader.read_frame().unwrap(), payload(b"three"));
        assert_eq!(reader.read_frame().unwrap(), ReadOutcome::EndOfStream);
    }

    #[test]
    fn reassembles_split_frame() {
        let source = Scripted::new([Ok(b"mC34".to_vec()), Ok(b"02HEL".to_vec()), Ok(b"LO\r".to_vec())]);
        let mut reader = FrameReader::new(source);

        assert_eq!(reader.read_frame().unwrap(), payload(b"mC3402HELLO"));
    }

    #[test]
    fn empty_line_is_empty_payload() {
        let mut reader = FrameReader::new(Cursor::new(b"\r".to_vec()));

        assert_eq!(reader.read_frame().unwrap(), payload(b""));
    }

    #[test]
    fn end_of_stream_without_data() {
        let mut reader = FrameReader::new(Cursor::new(Vec::new()));

        assert_eq!(reader.read_frame().unwrap(), ReadOutcome::EndOfStream);
    }

    #[test]
    fn end_of_stream_drops_partial_line() {
        let mut reader = FrameReader::new(Cursor::new(b"mC3".to_vec()));

        assert_eq!(reader.read_frame().unwrap(), ReadOutcome::EndOfStream);
        assert_eq!(reader.buffered(), 0);
    }

    #[test]
    fn would_block_is_pending_and_keeps_partial() {
        let source = Scripted::new([
            Ok(b"mS".to_vec()),
            Err(io::Error::from(io::ErrorKind::WouldBlock)),
            Ok(b"X\r".to_vec()),
        ]);
        let mut reader = FrameReader::new(source);

        assert_eq!(reader.read_frame().unwrap(), ReadOutcome::Pending);
        assert_eq!(reader.buffered(), 2);
        assert_eq!(reader.read_frame().unwrap(), payload(b"mSX"));
    }

    #[test]
    fn timed_out_is_pending() {
        let source = Scripted::new([Err(io::Error::from(io::ErrorKind::TimedOut))]);
        let mut reader = FrameReader::new(source);

        assert_eq!(reader.read_frame().unwrap(), ReadOutcome::Pending);
    }

    #[test]
    fn interrupted_is_retried() {
        let source =
            Scripted::new([Err(io::Error::from(io::ErrorKind::Interrupted)), Ok(b"mS\r".to_vec())]);
        let mut reader = FrameReader::new(source);

        assert_eq!(reader.read_frame().unwrap(), payload(b"mS"));
    }

    #[test]
    fn other_errors_propagate() {
        let source = Scripted::new([Err(io::Error::from(io::ErrorKind::BrokenPipe))]);
        let mut reader = FrameReader::new(source);

        assert!(matches!(reader.read_frame(), Err(ReadError::Io(_))));
    }

    #[test]
    fn overlong_line_in_one_chunk() {
        let mut reader = FrameReader::with_max_len(Cursor::new(b"ABCDEFGH\rmS\r".to_vec()), 4);

        assert!(matches!(reader.read_frame(), Err(ReadError::LineTooLong { max: 4 })));
        assert_eq!(reader.read_frame().unwrap(), payload(b"mS"));
    }

    #[test]
    fn overlong_line_across_chunks_resynchronizes() {
        let source = Scripted::new([
            Ok(b"ABCD".to_vec()),
            Ok(b"EFGH".to_vec()),
            Ok(b"IJ\rmS".to_vec()),
            Ok(b"\r".to_vec()),
        ]);
        let mut reader = FrameReader::with_max_len(source, 4);

        assert!(matches!(reader.read_frame(), Err(ReadError::LineTooLong { max: 4 })));
        assert_eq!(reader.read_frame().unwrap(), payload(b"mS"));
        assert_eq!(reader.read_frame().unwrap(), ReadOutcome::EndOfStream);
    }

    #[test]
    fn payload_one_below_capacity_is_accepted() {
        let mut reader = FrameReader::with_max_len(Cursor::new(b"ABC\r".to_vec()), 4);

        assert_eq!(reader.read_frame().unwrap(), payload(b"ABC"));
    }

    #[test]
    fn default_capacity_matches_line_buffer() {
        let reader = FrameReader::new(Cursor::new(Vec::new()));

        assert_eq!(reader.max_len(), 256);
    }
}
