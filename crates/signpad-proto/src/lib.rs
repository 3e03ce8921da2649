//! Wire protocol for the signpad display controller.
//!
//! The device speaks a line-oriented text protocol over a serial link. Every
//! frame is a short ASCII body followed by a one-byte XOR checksum and a
//! carriage return:
//!
//! ```text
//! [body: n bytes] [checksum: 1 byte] [\r]
//! ```
//!
//! # Components
//!
//! - [`checksum()`]: XOR fold seeded with `0x7F`
//! - [`frame`]: encoding and decoding of complete frames
//! - [`FrameReader`]: buffered terminator scanning over any [`std::io::Read`]
//! - [`Command`]: device-to-controller messages parsed from a body
//! - [`Outbound`]: controller-to-device messages

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod checksum;
pub mod command;
pub mod errors;
pub mod frame;
mod outbound;
mod reader;

pub use checksum::{CHECKSUM_SEED, checksum};
pub use command::{Command, DisplayUpdate};
pub use errors::{ProtocolError, Result};
pub use frame::{InboundChecksum, TERMINATOR};
pub use outbound::Outbound;
pub use reader::{DEFAULT_MAX_FRAME_LEN, FrameReader, ReadError, ReadOutcome};
