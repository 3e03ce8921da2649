//! Two-line character display model.
//!
//! The device drives a fixed 2x16 character display by overwriting parts of
//! a line in place. [`DisplayBuffer`] mirrors that storage exactly; glyph
//! substitution happens only when rendering.

/// Columns per display line.
pub const LINE_WIDTH: usize = 16;

/// Number of display lines.
pub const LINE_COUNT: usize = 2;

const BLANK: u8 = b' ';

/// One fixed-width display line.
///
/// Always exactly [`LINE_WIDTH`] bytes. Writes past the last column are
/// clamped, never wrapped or resized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayLine([u8; LINE_WIDTH]);

impl Default for DisplayLine {
    fn default() -> Self {
        Self::blank()
    }
}

impl DisplayLine {
    /// Line of spaces.
    pub const fn blank() -> Self {
        Self([BLANK; LINE_WIDTH])
    }

    /// Line holding `text`, padded with spaces or truncated to fit.
    pub fn from_text(text: &[u8]) -> Self {
        let mut line = Self::blank();
        line.write(0, text);
        line
    }

    /// Overwrite starting at `column`, returning the number of bytes written.
    ///
    /// Bytes that would land at or beyond [`LINE_WIDTH`] are dropped.
    pub fn write(&mut self, column: usize, text: &[u8]) -> usize {
        let Some(target) = self.0.get_mut(column..) else {
            return 0;
        };

        let n = target.len().min(text.len());
        target[..n].copy_from_slice(&text[..n]);
        n
    }

    /// Raw stored bytes.
    pub fn as_bytes(&self) -> &[u8; LINE_WIDTH] {
        &self.0
    }

    /// Text as shown on screen, with glyph substitution applied.
    pub fn render(&self) -> String {
        self.0.iter().copied().map(substitute).collect()
    }

    /// Render with `overlay` right-justified over the last columns.
    ///
    /// The stored line is not modified. Overlays longer than the line show
    /// their last [`LINE_WIDTH`] bytes.
    pub fn render_overlaid(&self, overlay: &[u8]) -> String {
        let overlay = &overlay[overlay.len().saturating_sub(LINE_WIDTH)..];
        let mut bytes = self.0;
        bytes[LINE_WIDTH - overlay.len()..].copy_from_slice(overlay);
        bytes.iter().copied().map(substitute).collect()
    }
}

/// Map a stored byte to its on-screen glyph.
///
/// The wire character set has no umlauts; the device sends the ASCII
/// brackets and braces in their place. Non-printable bytes show as spaces.
pub fn substitute(byte: u8) -> char {
    match byte {
        b'{' => 'ä',
        b'|' => 'ö',
        b'}' => 'ü',
        b'~' => 'ß',
        b'[' => 'Ä',
        b'\\' => 'Ö',
        b']' => 'Ü',
        0x20..=0x7E => char::from(byte),
        _ => ' ',
    }
}

/// Storage for both display lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayBuffer {
    lines: [DisplayLine; LINE_COUNT],
}

impl DisplayBuffer {
    /// Blank display.
    pub fn new() -> Self {
        Self::default()
    }

    /// Display with `banner` on line 0 and line 1 blank.
    pub fn with_banner(banner: &[u8]) -> Self {
        Self { lines: [DisplayLine::from_text(banner), DisplayLine::blank()] }
    }

    /// Overwrite part of line `index`, returning the number of bytes written.
    ///
    /// Writes to a nonexistent line or past the last column are dropped.
    pub fn write(&mut self, index: usize, column: usize, text: &[u8]) -> usize {
        self.lines.get_mut(index).map_or(0, |line| line.write(column, text))
    }

    /// Line `index`. `None` if there is no such line.
    pub fn line(&self, index: usize) -> Option<&DisplayLine> {
        self.lines.get(index)
    }

    /// Both lines, top first.
    pub fn lines(&self) -> &[DisplayLine; LINE_COUNT] {
        &self.lines
    }

    /// Rendered text of line `index`. `None` if there is no such line.
    pub fn render(&self, index: usize) -> Option<String> {
        self.line(index).map(DisplayLine::render)
    }
}
