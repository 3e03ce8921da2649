//! signpad entry point.

use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use signpad_tui::{Runtime, RuntimeConfig, SerialLink, TerminalDriver, TerminalError};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Exit status after Ctrl-C, as for a shell-delivered SIGINT.
const INTERRUPTED: u8 = 130;

/// Terminal remote control for a two-line serial display controller
#[derive(Parser, Debug)]
#[command(name = "signpad")]
#[command(about = "Terminal remote control for a two-line serial display controller")]
#[command(version)]
struct Args {
    /// Serial device the controller is attached to (e.g. /dev/ttyUSB0)
    device: PathBuf,
}

/// Print a command-line parse outcome and pick the exit status.
///
/// `--help` and `--version` arrive here too and exit 0, unless the text
/// could not be written.
fn usage_status(e: &clap::Error) -> u8 {
    u8::from(e.print().is_err() || e.use_stderr())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => return ExitCode::from(usage_status(&e)),
    };

    // Stderr only, and quiet by default: the TUI owns stdout
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr)).with(filter).init();

    let config = RuntimeConfig::default();

    let link = match SerialLink::open(&args.device, config.max_frame_len) {
        Ok(link) => link,
        Err(e) => {
            tracing::error!(error = %e, "failed to open device");
            return ExitCode::FAILURE;
        },
    };

    let driver = match TerminalDriver::new(link) {
        Ok(driver) => driver,
        Err(e) => {
            tracing::error!(error = %e, "failed to set up terminal");
            return ExitCode::FAILURE;
        },
    };

    // The driver is dropped, and the terminal restored, before anything is logged
    match Runtime::new(driver, &config).run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(TerminalError::Interrupted) => ExitCode::from(INTERRUPTED),
        Err(e) => {
            tracing::error!(error = %e, "control loop failed");
            ExitCode::FAILURE
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_error(args: &[&str]) -> clap::Error {
        match Args::try_parse_from(args) {
            Ok(args) => panic!("unexpected success: {args:?}"),
            Err(e) => e,
        }
    }

    #[test]
    fn help_and_version_succeed() {
        assert_eq!(usage_status(&parse_error(&["signpad", "--help"])), 0);
        assert_eq!(usage_status(&parse_error(&["signpad", "--version"])), 0);
    }

    #[test]
    fn usage_errors_fail() {
        assert_eq!(usage_status(&parse_error(&["signpad"])), 1);
        assert_eq!(usage_status(&parse_error(&["signpad", "--baud", "9600", "/dev/null"])), 1);
    }

    #[test]
    fn device_path_is_taken() {
        let args = Args::try_parse_from(["signpad", "/dev/ttyUSB0"]).unwrap();

        assert_eq!(args.device, PathBuf::from("/dev/ttyUSB0"));
    }
}
