//! Device command interpreter.

use signpad_proto::{Command, DisplayUpdate, Outbound, Result};

use crate::{DisplayBuffer, InputSession};

/// Apply one frame body to the display and input session.
///
/// Returns the reply to send, if any. Display updates write into the display
/// and set the input mode; status polls are acknowledged; anything else is
/// ignored.
///
/// # Errors
///
/// - `ProtocolError::MalformedCommand` for an unusable display update. Nothing
///   was changed; callers are expected to log and carry on. An update naming a
///   line that does not exist is not an error: it writes nothing but still
///   sets the input mode.
pub fn interpret(
    body: &[u8],
    display: &mut DisplayBuffer,
    session: &mut InputSession,
) -> Result<Option<Outbound>> {
    let reply = match Command::parse(body)? {
        Command::DisplayUpdate(update) => {
            apply_display_update(&update, display, session);
            None
        },
        Command::StatusPoll => Some(Outbound::StatusAck),
        Command::Unknown(raw) => {
            tracing::debug!(body = %raw.escape_ascii(), "ignoring unknown command");
            None
        },
    };

    Ok(reply)
}

fn apply_display_update(
    update: &DisplayUpdate,
    display: &mut DisplayBuffer,
    session: &mut InputSession,
) {
    let line = usize::from(update.line);
    let pos = usize::from(update.pos);

    let written = display.write(line, pos, &update.text);
    if display.line(line).is_none() {
        tracing::debug!(line, "display update names a missing line, text dropped");
    } else if written < update.text.len() {
        tracing::debug!(
            line,
            pos,
            len = update.text.len(),
            written,
            "display update clamped at last column"
        );
    }

    session.apply_device_mode(update.requests_number_entry());
}
