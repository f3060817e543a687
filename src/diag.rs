//! Diagnostic ring buffer log
//!
//! Keeps the most recent log output in a fixed block of memory so it can be
//! read back over the command connection. When a new line does not fit, the
//! oldest bytes are shifted out.
//!
//! Invariants:
//! - content occupies `buf[..len]` and `buf[len] == 0`, so `len < N`
//! - content is always valid UTF-8 (truncation and eviction respect
//!   character boundaries)

use core::fmt;

use crate::config::{LINE_ENDING, LOG_CAPACITY, LOG_STAGING_SIZE};
use crate::text::Staging;

/// Prefix for warnings
pub const WARN_PREFIX: &str = "warning: ";

/// Prefix for errors
pub const ERROR_PREFIX: &str = "error: ";

/// Bytes of rendered text a single write can carry (staging minus terminator)
pub const MAX_LINE_LEN: usize = LOG_STAGING_SIZE - 1;

/// Fixed-capacity text log with oldest-first eviction
#[derive(Clone)]
pub struct MemoryLog<const N: usize = LOG_CAPACITY> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> MemoryLog<N> {
    const CAPACITY_OK: () = assert!(N >= 2, "MemoryLog needs room for text and a terminator");

    /// Create an empty log
    #[must_use]
    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::CAPACITY_OK;
        Self { buf: [0; N], len: 0 }
    }

    /// Total capacity in bytes, including the terminator slot
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Bytes currently held
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Check if nothing has been logged
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes that can be appended without evicting anything
    #[must_use]
    pub const fn remaining(&self) -> usize {
        N - 1 - self.len
    }

    /// Current contents, valid until the next write
    #[must_use]
    pub fn text(&self) -> &str {
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or_default()
    }

    /// Current contents including the trailing NUL
    #[must_use]
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.buf[..=self.len]
    }

    /// Append a line
    ///
    /// Text beyond [`MAX_LINE_LEN`] bytes (terminator included) is cut off.
    pub fn write(&mut self, args: fmt::Arguments<'_>) {
        self.write_prefixed("", args);
    }

    /// Append an informational line
    pub fn info(&mut self, args: fmt::Arguments<'_>) {
        self.write_prefixed("", args);
    }

    /// Append a warning line
    pub fn warn(&mut self, args: fmt::Arguments<'_>) {
        self.write_prefixed(WARN_PREFIX, args);
    }

    /// Append an error line
    pub fn error(&mut self, args: fmt::Arguments<'_>) {
        self.write_prefixed(ERROR_PREFIX, args);
    }

    /// Drop everything
    pub fn clear(&mut self) {
        self.len = 0;
        self.buf[0] = 0;
    }

    fn write_prefixed(&mut self, prefix: &str, args: fmt::Arguments<'_>) {
        let line = render_line(prefix, args);
        self.append(line.as_str());
    }

    /// Append raw text, evicting the oldest bytes if needed
    fn append(&mut self, text: &str) {
        // A line larger than the whole log keeps only its tail.
        let max = N - 1;
        let text = if text.len() > max {
            let mut start = text.len() - max;
            while !text.is_char_boundary(start) {
                start += 1;
            }
            &text[start..]
        } else {
            text
        };

        self.make_room(text.len());

        let end = self.len + text.len();
        self.buf[self.len..end].copy_from_slice(text.as_bytes());
        self.len = end;
        self.buf[self.len] = 0;
    }

    /// Evict the oldest content until `needed` bytes can be appended
    ///
    /// Eviction shifts retained bytes to the front. It never removes more
    /// than the retained content and never splits a UTF-8 character, so it
    /// may remove a few bytes more than strictly required. Returns the
    /// number of bytes evicted.
    pub fn make_room(&mut self, needed: usize) -> usize {
        let available = self.remaining();
        if needed <= available {
            return 0;
        }

        let mut excess = (needed - available).min(self.len);
        while excess < self.len && is_continuation(self.buf[excess]) {
            excess += 1;
        }

        self.buf.copy_within(excess..self.len, 0);
        self.len -= excess;
        self.buf[self.len] = 0;
        excess
    }
}

impl<const N: usize> Default for MemoryLog<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Debug for MemoryLog<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MemoryLog({}/{} bytes)", self.len, N - 1)
    }
}

#[cfg(feature = "embedded")]
impl<const N: usize> defmt::Format for MemoryLog<N> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "MemoryLog({}/{} bytes)", self.len, N - 1);
    }
}

/// Render `prefix`, `args` and the line terminator into one staging line
///
/// The terminator is always present, even when the text is truncated.
fn render_line(prefix: &str, args: fmt::Arguments<'_>) -> Staging<MAX_LINE_LEN> {
    let limit = MAX_LINE_LEN - LINE_ENDING.len();
    let mut line = Staging::<MAX_LINE_LEN>::render(format_args!("{prefix}{args}"), limit);
    let _ = line.push_str(LINE_ENDING);
    line
}

const fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}
