//! Bounded log of wire traffic for display.

use std::collections::VecDeque;

/// Entries kept before the oldest is dropped.
const DEFAULT_CAPACITY: usize = 256;

/// Direction of a logged frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Device to controller.
    Inbound,
    /// Controller to device.
    Outbound,
}

/// One logged frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrafficEntry {
    /// Which way the frame travelled.
    pub direction: Direction,
    /// Frame body, ASCII-escaped.
    pub text: String,
    /// Why the frame was not applied. `None` if it was.
    pub note: Option<String>,
}

impl TrafficEntry {
    /// Entry for a body, escaping non-printable bytes.
    pub fn new(direction: Direction, body: &[u8]) -> Self {
        Self { direction, text: body.escape_ascii().to_string(), note: None }
    }

    /// Attach a note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Ring of the most recent traffic entries, oldest first.
#[derive(Debug, Clone)]
pub struct TrafficLog {
    entries: VecDeque<TrafficEntry>,
    capacity: usize,
}

impl Default for TrafficLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl TrafficLog {
    /// Log holding at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: VecDeque::with_capacity(capacity), capacity }
    }

    /// Append an entry, dropping the oldest if full.
    pub fn push(&mut self, entry: TrafficEntry) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Entries, oldest first.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &TrafficEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    /// Number of entries held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_control_bytes() {
        let entry = TrafficEntry::new(Direction::Outbound, b"m\x1b");

        assert_eq!(entry.text, "m\\x1b");
    }

    #[test]
    fn drops_oldest_when_full() {
        let mut log = TrafficLog::with_capacity(2);
        log.push(TrafficEntry::new(Direction::Inbound, b"one"));
        log.push(TrafficEntry::new(Direction::Inbound, b"two"));
        log.push(TrafficEntry::new(Direction::Outbound, b"three"));

        let texts: Vec<_> = log.entries().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, ["two", "three"]);
    }

    #[test]
    fn zero_capacity_keeps_nothing() {
        let mut log = TrafficLog::with_capacity(0);
        log.push(TrafficEntry::new(Direction::Inbound, b"mS"));

        assert!(log.is_empty());
    }
}
