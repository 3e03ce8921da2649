//! Property-based tests for frame encoding, decoding and reading.
//!
//! These verify the codec for arbitrary bodies rather than hand-picked
//! examples: framing round-trips, checksum placement, and that the reader
//! recovers every frame regardless of how the byte stream is chunked.

use std::io::{self, Read};

use proptest::prelude::*;
use signpad_proto::{
    FrameReader, InboundChecksum, ProtocolError, ReadOutcome, TERMINATOR, checksum,
    frame::{decode, encode},
};

/// Bodies that can be framed.
fn body_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>().prop_filter("no terminator", |b| *b != TERMINATOR), 0..64)
}

/// Source that hands out its bytes in fixed-size pieces.
struct Chunked {
    data: Vec<u8>,
    pos: usize,
    chunk: usize,
}

impl Read for Chunked {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let end = self.data.len().min(self.pos + self.chunk.min(buf.len()));
        let n = end - self.pos;
        buf[..n].copy_from_slice(&self.data[self.pos..end]);
        self.pos = end;
        Ok(n)
    }
}

proptest! {
    #[test]
    fn prop_encode_decode_roundtrip(body in body_strategy()) {
        let frame = encode(&body).expect("body without terminator should encode");
        let decoded = decode(&frame).expect("encoded frame should decode");

        // PROPERTY: Round-trip must be identity
        prop_assert_eq!(decoded.as_ref(), body.as_slice());
    }

    #[test]
    fn prop_frame_layout(body in body_strategy()) {
        let frame = encode(&body).expect("should encode");

        prop_assert_eq!(frame.len(), body.len() + 2);
        prop_assert_eq!(&frame[..body.len()], body.as_slice());
        prop_assert_eq!(frame[body.len()], checksum(&body));
        prop_assert_eq!(frame[body.len() + 1], TERMINATOR);
    }

    #[test]
    fn prop_terminator_anywhere_is_rejected(
        body in body_strategy(),
        index in any::<prop::sample::Index>(),
    ) {
        let mut body = body;
        let offset = index.index(body.len() + 1);
        body.insert(offset, TERMINATOR);

        prop_assert_eq!(encode(&body), Err(ProtocolError::TerminatorInBody { offset }));
    }

    #[test]
    fn prop_corrupted_checksum_is_rejected(body in body_strategy(), flip in 1u8..=255) {
        let mut payload = body.clone();
        payload.push(checksum(&body) ^ flip);

        let result = InboundChecksum::Trailing.strip(&payload);
        let is_mismatch = matches!(result, Err(ProtocolError::ChecksumMismatch { .. }));
        prop_assert!(is_mismatch);
    }

    #[test]
    fn prop_reader_recovers_frames_for_any_chunking(
        bodies in prop::collection::vec(body_strategy(), 1..8),
        chunk in 1usize..32,
    ) {
        // Checksums equal to the terminator would split a frame early
        let bodies: Vec<Vec<u8>> =
            bodies.into_iter().filter(|b| checksum(b) != TERMINATOR).collect();

        let mut data = Vec::new();
        for body in &bodies {
            data.extend_from_slice(&encode(body).expect("should encode"));
        }

        let mut reader = FrameReader::new(Chunked { data, pos: 0, chunk });
        for body in &bodies {
            let outcome = reader.read_frame().expect("frames fit the default capacity");
            let ReadOutcome::Payload(payload) = outcome else {
                return Err(TestCaseError::fail(format!("expected payload, got {outcome:?}")));
            };
            let decoded = InboundChecksum::Trailing.strip(&payload).expect("checksum should match");
            prop_assert_eq!(decoded.as_ref(), body.as_slice());
        }

        prop_assert_eq!(reader.read_frame().expect("end of stream"), ReadOutcome::EndOfStream);
    }
}

#[test]
fn status_ack_checksum_matches_fold() {
    let frame = encode(b"mQ").unwrap();

    assert_eq!(frame[2], 0x7F ^ b'm' ^ b'Q');
}
