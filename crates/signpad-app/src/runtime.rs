//! Generic runtime for the control loop.
//!
//! The Runtime drives the application tick by tick, coordinating between:
//! - [`App`]: display, session and interpreter state machine
//! - [`Driver`]: platform-specific I/O
//!
//! Each tick runs, in order:
//! 1. Reinitialize the display if a resize was flagged since the last tick
//! 2. Apply at most one inbound frame
//! 3. Apply at most one keypress
//! 4. Render if anything changed, then idle for the tick interval

use std::time::Duration;

use signpad_proto::{DEFAULT_MAX_FRAME_LEN, InboundChecksum};

use crate::{App, AppAction, AppEvent, DisplayBuffer, Driver, LinkEvent};

/// Control loop tunables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Idle time between ticks.
    pub tick_interval: Duration,
    /// Inbound frame capacity in bytes, terminator excluded.
    pub max_frame_len: usize,
    /// Inbound checksum convention.
    pub inbound: InboundChecksum,
    /// Text shown on line 0 until the device writes to it.
    pub banner: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(10),
            max_frame_len: DEFAULT_MAX_FRAME_LEN,
            inbound: InboundChecksum::default(),
            banner: "IBIS GESTOERT 1".to_string(),
        }
    }
}

/// Generic runtime that orchestrates App and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
pub struct Runtime<D>
where
    D: Driver,
{
    driver: D,
    app: App,
    tick_interval: Duration,
}

impl<D> Runtime<D>
where
    D: Driver,
{
    /// Create a new runtime with the given driver and configuration.
    pub fn new(driver: D, config: &RuntimeConfig) -> Self {
        let display = DisplayBuffer::with_banner(config.banner.as_bytes());
        let app = App::new(display, config.inbound);
        Self { driver, app, tick_interval: config.tick_interval }
    }

    /// Run the control loop until the link closes.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an unrecoverable I/O error.
    pub async fn run(mut self) -> Result<(), D::Error> {
        self.driver.render(&self.app)?;

        let result = loop {
            match self.tick().await {
                Ok(true) => break Ok(()),
                Ok(false) => self.driver.idle(self.tick_interval).await,
                Err(e) => break Err(e),
            }
        };

        self.driver.stop();
        result
    }

    /// Run one tick of the control loop.
    ///
    /// Returns `true` if the link closed and the loop should stop.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an unrecoverable I/O error.
    pub async fn tick(&mut self) -> Result<bool, D::Error> {
        let mut dirty = false;

        if self.driver.take_resize() {
            self.driver.reinitialize()?;
            dirty = true;
        }

        match self.driver.poll_frame().await? {
            Some(LinkEvent::Payload(payload)) => {
                dirty |= self.process(AppEvent::Payload(payload)).await?;
            },
            Some(LinkEvent::LineTooLong { max }) => {
                dirty |= self.process(AppEvent::LineTooLong { max }).await?;
            },
            Some(LinkEvent::Closed) => {
                tracing::info!("end of stream reached");
                return Ok(true);
            },
            None => {},
        }

        if let Some(key) = self.driver.poll_key().await? {
            dirty |= self.process(AppEvent::Key(key)).await?;
        }

        if dirty {
            self.driver.render(&self.app)?;
        }

        Ok(false)
    }

    /// Feed one event to the App and execute its actions.
    ///
    /// Returns `true` if a render was requested.
    async fn process(&mut self, event: AppEvent) -> Result<bool, D::Error> {
        let mut render = false;

        for action in self.app.handle(event) {
            match action {
                AppAction::Render => render = true,
                AppAction::Send(message) => match message.encode() {
                    Ok(frame) => {
                        tracing::debug!(%message, "sending");
                        self.driver.send_frame(frame).await?;
                    },
                    Err(e) => tracing::warn!(error = %e, %message, "dropping unframeable message"),
                },
            }
        }

        Ok(render)
    }

    /// Get a reference to the App
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a reference to the Driver
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Get a mutable reference to the Driver
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }
}
