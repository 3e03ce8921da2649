//! Application layer for signpad
//!
//! Pure state machines and a generic control loop for a two-line display
//! controller, enabling deterministic simulation testing with the same code
//! that drives the real serial link.
//!
//! # Components
//!
//! - [`DisplayBuffer`]: two 16-column display lines
//! - [`InputSession`]: Normal / number-entry keypad state machine
//! - [`interpret`]: applies device commands to display and session
//! - [`App`]: state machine owning all of the above
//! - [`Driver`]: trait for platform-specific I/O
//! - [`Runtime`]: tick-based control loop using a Driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod display;
mod driver;
mod event;
mod input;
mod interpreter;
mod runtime;
mod session;
mod traffic;

pub use action::AppAction;
pub use app::App;
pub use display::{DisplayBuffer, DisplayLine, LINE_COUNT, LINE_WIDTH, substitute};
pub use driver::Driver;
pub use event::{AppEvent, LinkEvent};
pub use input::KeyInput;
pub use interpreter::interpret;
pub use runtime::{Runtime, RuntimeConfig};
pub use session::{InputSession, MAX_ENTRY_LEN, SessionState};
pub use traffic::{Direction, TrafficEntry, TrafficLog};
