//! Fuzz target for command parsing and interpretation
//!
//! # Invariants
//!
//! - Parsing never panics
//! - Interpreting any body keeps both display lines at 16 bytes and the
//!   number-entry buffer empty
//! - A rejected command leaves display and session untouched

#![no_main]

use libfuzzer_sys::fuzz_target;
use signpad_app::{DisplayBuffer, InputSession, LINE_WIDTH, interpret};
use signpad_proto::Command;

fuzz_target!(|data: &[u8]| {
    let _ = Command::parse(data);

    let mut display = DisplayBuffer::with_banner(b"IBIS GESTOERT 1");
    let mut session = InputSession::new();
    let before = (display.clone(), session.clone());

    match interpret(data, &mut display, &mut session) {
        Ok(_) => {
            for line in display.lines() {
                assert_eq!(line.as_bytes().len(), LINE_WIDTH);
            }
            assert!(session.buffer().is_empty());
        },
        Err(_) => assert_eq!((display, session), before, "rejected command changed state"),
    }
});
