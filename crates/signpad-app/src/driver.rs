//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the control loop from specific I/O
//! implementations. Each frontend implements the trait to provide
//! platform-specific I/O, while the generic [`crate::Runtime`] handles all
//! orchestration.

use std::{future::Future, time::Duration};

use bytes::Bytes;

use crate::{App, KeyInput, LinkEvent};

/// Abstracts I/O operations for the control loop.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic. This ensures
/// the same orchestration code runs in the production TUI and in simulation.
///
/// # Implementations
///
/// - **TUI**: crossterm for keys, ratatui for rendering, a device file for
///   the serial link
/// - **Simulation**: scripted frames and keys, captured output
///
/// Both poll methods must return immediately when nothing is ready. Anything
/// not consumed in one tick stays queued in the driver for the next.
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Poll the link for at most one inbound event.
    ///
    /// Returns `None` if no complete frame is available.
    ///
    /// # Errors
    ///
    /// Returns an error if the link failed unrecoverably.
    fn poll_frame(&mut self) -> impl Future<Output = Result<Option<LinkEvent>, Self::Error>> + Send;

    /// Poll the keyboard for at most one keypress.
    ///
    /// Returns `None` if no key is pending.
    fn poll_key(&mut self) -> impl Future<Output = Result<Option<KeyInput>, Self::Error>> + Send;

    /// Write one encoded frame to the link.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn send_frame(&mut self, frame: Bytes) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Take the pending resize flag, clearing it.
    fn take_resize(&mut self) -> bool;

    /// Reinitialize the display after a resize.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be reset.
    fn reinitialize(&mut self) -> Result<(), Self::Error>;

    /// Render the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;

    /// Wait between loop ticks.
    fn idle(&mut self, period: Duration) -> impl Future<Output = ()> + Send;

    /// Close the link and clean up resources.
    fn stop(&mut self);
}
