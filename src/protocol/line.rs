//! Line accumulation
//!
//! Collects bytes from the peer until a newline. The newline counts
//! against the buffer, so the longest accepted line is
//! `LINE_BUFFER_SIZE - 1` bytes of text.

use heapless::Vec;

use crate::config::LINE_BUFFER_SIZE;

/// Result of feeding one byte
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineEvent {
    /// Byte stored (or ignored); line not finished
    Pending,
    /// Newline received; the line is ready in [`LineBuffer::as_bytes`]
    Complete,
    /// Buffer filled up without a newline; contents are garbage
    Overflow,
}

#[cfg(feature = "embedded")]
impl defmt::Format for LineEvent {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Pending => defmt::write!(f, "Pending"),
            Self::Complete => defmt::write!(f, "Complete"),
            Self::Overflow => defmt::write!(f, "Overflow"),
        }
    }
}

/// Fixed-capacity command line buffer
#[derive(Clone, Debug, Default)]
pub struct LineBuffer {
    buf: Vec<u8, LINE_BUFFER_SIZE>,
}

impl LineBuffer {
    /// Create an empty line buffer
    #[must_use]
    pub const fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Feed one byte from the peer
    ///
    /// `\r` is dropped. `\n` completes the line without being stored but
    /// still occupies a slot, so a full buffer with no newline overflows.
    pub fn push(&mut self, byte: u8) -> LineEvent {
        match byte {
            b'\r' => LineEvent::Pending,
            b'\n' => LineEvent::Complete,
            _ => {
                // Overflow is reported before the buffer can refuse a push.
                let _ = self.buf.push(byte);
                if self.buf.len() >= LINE_BUFFER_SIZE {
                    LineEvent::Overflow
                } else {
                    LineEvent::Pending
                }
            }
        }
    }

    /// Current line contents, without the newline
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Current line as text, if it is valid UTF-8
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.buf).ok()
    }

    /// Bytes buffered so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if nothing is buffered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Discard the buffered bytes
    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(line: &mut LineBuffer, bytes: &[u8]) -> LineEvent {
        let mut last = LineEvent::Pending;
        for &b in bytes {
            last = line.push(b);
        }
        last
    }

    #[test]
    fn newline_completes() {
        let mut line = LineBuffer::new();
        assert_eq!(feed(&mut line, b"on a 1\n"), LineEvent::Complete);
        assert_eq!(line.as_str(), Some("on a 1"));
    }

    #[test]
    fn carriage_return_ignored() {
        let mut line = LineBuffer::new();
        assert_eq!(feed(&mut line, b"l\ro\rg\r\n"), LineEvent::Complete);
        assert_eq!(line.as_bytes(), b"log");
    }

    #[test]
    fn longest_line_fits() {
        let mut line = LineBuffer::new();
        let text = [b'x'; LINE_BUFFER_SIZE - 1];
        assert_eq!(feed(&mut line, &text), LineEvent::Pending);
        assert_eq!(line.push(b'\n'), LineEvent::Complete);
        assert_eq!(line.len(), LINE_BUFFER_SIZE - 1);
    }

    #[test]
    fn full_buffer_overflows() {
        let mut line = LineBuffer::new();
        let text = [b'x'; LINE_BUFFER_SIZE];
        assert_eq!(feed(&mut line, &text), LineEvent::Overflow);
    }

    #[test]
    fn invalid_utf8_has_no_str() {
        let mut line = LineBuffer::new();
        feed(&mut line, &[0xFF, 0xFE]);
        assert_eq!(line.as_str(), None);
        line.clear();
        assert!(line.is_empty());
    }
}
