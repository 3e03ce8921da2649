//! Terminal front end for signpad
//!
//! A thin shell over [`signpad_app::Driver`] that provides terminal and
//! serial I/O. All orchestration logic lives in the generic
//! [`signpad_app::Runtime`].
//!
//! This crate only handles the device link, keyboard and rendering.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod link;
pub mod terminal;
pub mod ui;

pub use link::{LinkError, SerialLink};
pub use signpad_app::{App, Driver, KeyInput, Runtime, RuntimeConfig};
pub use terminal::{TerminalDriver, TerminalError};
