//! Fuzz target for frame decoding
//!
//! Arbitrary bytes go through both inbound checksum conventions and the
//! full-frame decoder.
//!
//! # Invariants
//!
//! - Decoding never panics; invalid input returns an error
//! - A body that decodes re-encodes to the original frame

#![no_main]

use libfuzzer_sys::fuzz_target;
use signpad_proto::{InboundChecksum, frame};

fuzz_target!(|data: &[u8]| {
    let _ = InboundChecksum::Trailing.strip(data);
    let _ = InboundChecksum::LeadingUnchecked.strip(data);

    if let Ok(body) = frame::decode(data) {
        let encoded = frame::encode(&body).expect("decoded body has no terminator");
        assert_eq!(encoded.as_ref(), data, "decode/encode mismatch");
    }
});
