//! Fuzz target for the buffered frame reader
//!
//! # Strategy
//!
//! - Stream bytes: arbitrary, split into arbitrary read sizes
//! - Capacity: small enough that overlong lines are common
//! - Interruptions: `WouldBlock` between chunks
//!
//! # Invariants
//!
//! - Reading never panics and always terminates with end of stream
//! - Payloads never contain the terminator and are shorter than the capacity
//! - Total payload bytes never exceed the input

#![no_main]

use std::io::{self, Read};

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use signpad_proto::{FrameReader, ReadError, ReadOutcome, TERMINATOR};

#[derive(Debug, Arbitrary)]
struct Input {
    max_len: u8,
    chunks: Vec<Chunk>,
}

#[derive(Debug, Arbitrary)]
enum Chunk {
    Data(Vec<u8>),
    WouldBlock,
}

struct Scripted {
    chunks: std::vec::IntoIter<Chunk>,
    current: Vec<u8>,
}

impl Read for Scripted {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        while self.current.is_empty() {
            match self.chunks.next() {
                Some(Chunk::Data(data)) => self.current = data,
                Some(Chunk::WouldBlock) => return Err(io::ErrorKind::WouldBlock.into()),
                None => return Ok(0),
            }
        }
        let n = buf.len().min(self.current.len());
        buf[..n].copy_from_slice(&self.current[..n]);
        self.current.drain(..n);
        Ok(n)
    }
}

fuzz_target!(|input: Input| {
    let max_len = usize::from(input.max_len.max(1));
    let total: usize = input
        .chunks
        .iter()
        .map(|c| match c {
            Chunk::Data(d) => d.len(),
            Chunk::WouldBlock => 0,
        })
        .sum();

    let source = Scripted { chunks: input.chunks.into_iter(), current: Vec::new() };
    let mut reader = FrameReader::with_max_len(source, max_len);
    let mut seen = 0;

    loop {
        match reader.read_frame() {
            Ok(ReadOutcome::Payload(payload)) => {
                assert!(!payload.contains(&TERMINATOR));
                assert!(payload.len() < max_len);
                seen += payload.len();
            },
            Ok(ReadOutcome::Pending) | Err(ReadError::LineTooLong { .. }) => {},
            Ok(ReadOutcome::EndOfStream) => break,
            Err(ReadError::Io(e)) => panic!("scripted source cannot fail: {e}"),
        }
    }

    assert!(seen <= total);
});
