//! Application input events.
//!
//! This module defines [`AppEvent`], the inputs that drive the [`crate::App`]
//! state machine, and [`LinkEvent`], what a [`crate::Driver`] reports from the
//! serial link.
//!
//! Events originate from two distinct sources:
//! - The device, as frame payloads read from the link.
//! - The operator, as keypresses.

use bytes::Bytes;

use crate::KeyInput;

/// Events processed by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Inbound frame payload, terminator stripped, checksum still attached.
    Payload(Bytes),

    /// An inbound line overflowed the frame capacity and was discarded.
    LineTooLong {
        /// Frame capacity in bytes.
        max: usize,
    },

    /// Keyboard input.
    Key(KeyInput),
}

/// Non-blocking poll result from the serial link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkEvent {
    /// One complete inbound payload.
    Payload(Bytes),

    /// An inbound line overflowed the frame capacity and was discarded.
    LineTooLong {
        /// Frame capacity in bytes.
        max: usize,
    },

    /// The device closed the link.
    Closed,
}
