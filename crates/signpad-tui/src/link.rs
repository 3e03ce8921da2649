//! Serial link to the display controller.
//!
//! Provides [`SerialLink`], which owns the device's write half and a channel
//! fed by a dedicated reader thread. The thread owns the [`FrameReader`] and
//! blocks on the device; the control loop only ever drains the channel, so a
//! silent device never stalls a tick. A non-blocking source that has nothing
//! ready is retried after a short pause.

use std::{
    fs::OpenOptions,
    io::{self, Read, Write},
    path::{Path, PathBuf},
    thread,
    time::Duration,
};

use signpad_app::LinkEvent;
use signpad_proto::{FrameReader, ReadError, ReadOutcome};
use thiserror::Error;
use tokio::sync::mpsc::{self, error::TryRecvError};

/// Read outcomes buffered between the reader thread and the control loop.
const CHANNEL_CAPACITY: usize = 64;

/// Pause before retrying a source that had nothing ready.
const PENDING_BACKOFF: Duration = Duration::from_millis(5);

/// Serial link errors.
#[derive(Debug, Error)]
pub enum LinkError {
    /// The device could not be opened.
    #[error("cannot open {}: {source}", path.display())]
    Open {
        /// Device path given on the command line.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },

    /// The reader thread could not be started.
    #[error("cannot start reader thread: {0}")]
    Spawn(io::Error),

    /// Reading from the device failed.
    #[error(transparent)]
    Read(ReadError),

    /// Writing to the device failed.
    #[error("write failed: {0}")]
    Write(#[from] io::Error),

    /// The reader thread went away without reporting end of stream.
    #[error("reader thread exited unexpectedly")]
    ReaderGone,
}

/// Handle to an open serial link.
pub struct SerialLink {
    writer: Box<dyn Write + Send>,
    from_device: mpsc::Receiver<Result<ReadOutcome, ReadError>>,
}

impl SerialLink {
    /// Open the device at `path` for reading and writing.
    ///
    /// The device is opened twice so the reader thread and the writer keep
    /// independent file offsets.
    ///
    /// # Errors
    ///
    /// - `LinkError::Open` if either handle cannot be opened
    /// - `LinkError::Spawn` if the reader thread cannot be started
    pub fn open(path: &Path, max_frame_len: usize) -> Result<Self, LinkError> {
        let open = |options: &mut OpenOptions| {
            options
                .open(path)
                .map_err(|source| LinkError::Open { path: path.to_path_buf(), source })
        };

        let reader = open(OpenOptions::new().read(true))?;
        let writer = open(OpenOptions::new().write(true))?;

        tracing::info!(path = %path.display(), "opened serial link");
        Self::spawn(reader, writer, max_frame_len)
    }

    /// Start a link over an arbitrary byte source and sink.
    ///
    /// # Errors
    ///
    /// Returns `LinkError::Spawn` if the reader thread cannot be started.
    pub fn spawn<R, W>(reader: R, writer: W, max_frame_len: usize) -> Result<Self, LinkError>
    where
        R: Read + Send + 'static,
        W: Write + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let reader = FrameReader::with_max_len(reader, max_frame_len);

        thread::Builder::new()
            .name("signpad-link".into())
            .spawn(move || run_reader(reader, &tx))
            .map_err(LinkError::Spawn)?;

        Ok(Self { writer: Box::new(writer), from_device: rx })
    }

    /// Take at most one event from the device without blocking.
    ///
    /// Returns `None` if no complete frame has arrived.
    ///
    /// # Errors
    ///
    /// - `LinkError::Read` if the device failed
    /// - `LinkError::ReaderGone` if the reader thread stopped without
    ///   reporting end of stream
    pub fn try_recv(&mut self) -> Result<Option<LinkEvent>, LinkError> {
        match self.from_device.try_recv() {
            Ok(Ok(ReadOutcome::Payload(payload))) => Ok(Some(LinkEvent::Payload(payload))),
            Ok(Ok(ReadOutcome::Pending)) | Err(TryRecvError::Empty) => Ok(None),
            Ok(Ok(ReadOutcome::EndOfStream)) => Ok(Some(LinkEvent::Closed)),
            Ok(Err(ReadError::LineTooLong { max })) => Ok(Some(LinkEvent::LineTooLong { max })),
            Ok(Err(e)) => Err(LinkError::Read(e)),
            Err(TryRecvError::Disconnected) => Err(LinkError::ReaderGone),
        }
    }

    /// Write one encoded frame and flush it to the device.
    ///
    /// # Errors
    ///
    /// Returns `LinkError::Write` if the write fails.
    pub fn send(&mut self, frame: &[u8]) -> Result<(), LinkError> {
        self.writer.write_all(frame)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Reader thread body: forward every outcome until the stream ends, the
/// device fails, or the link is dropped.
fn run_reader<R: Read>(
    mut reader: FrameReader<R>,
    tx: &mpsc::Sender<Result<ReadOutcome, ReadError>>,
) {
    loop {
        let outcome = reader.read_frame();
        let last = matches!(outcome, Ok(ReadOutcome::EndOfStream) | Err(ReadError::Io(_)));

        // Only non-blocking sources report this
        if matches!(outcome, Ok(ReadOutcome::Pending)) {
            thread::park_timeout(PENDING_BACKOFF);
            continue;
        }

        if tx.blocking_send(outcome).is_err() {
            tracing::debug!("link dropped, reader thread exiting");
            return;
        }

        if last {
            return;
        }
    }
}
