//! Bounded text rendering.
//!
//! `heapless::String` rejects a whole `write_str` that does not fit. Log
//! lines and replies must instead keep as much as fits, so formatting goes
//! through [`Staging`], which truncates on a character boundary.

use core::fmt;

use heapless::String;

/// Fixed-capacity render target that truncates instead of failing
#[derive(Clone, Debug, Default)]
pub struct Staging<const N: usize> {
    buf: String<N>,
    truncated: bool,
}

impl<const N: usize> Staging<N> {
    /// Create an empty staging buffer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buf: String::new(),
            truncated: false,
        }
    }

    /// Render formatted arguments, keeping at most `limit` bytes
    #[must_use]
    pub fn render(args: fmt::Arguments<'_>, limit: usize) -> Self {
        let mut staging = Self::new();
        let mut writer = Limited {
            staging: &mut staging,
            limit: limit.min(N),
        };
        // Limited never returns an error; overflow sets `truncated` instead.
        let _ = fmt::write(&mut writer, args);
        staging
    }

    /// Append a string that is known to fit in the remaining capacity
    ///
    /// Returns `false` (and appends nothing) if it does not fit.
    pub fn push_str(&mut self, s: &str) -> bool {
        self.buf.push_str(s).is_ok()
    }

    /// Whether the rendered text was cut short
    #[must_use]
    pub const fn truncated(&self) -> bool {
        self.truncated
    }

    /// Rendered text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Rendered length in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if nothing was rendered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

struct Limited<'s, const N: usize> {
    staging: &'s mut Staging<N>,
    limit: usize,
}

impl<const N: usize> fmt::Write for Limited<'_, N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.staging.truncated {
            return Ok(());
        }
        let room = self.limit.saturating_sub(self.staging.buf.len());
        if s.len() <= room {
            let _ = self.staging.buf.push_str(s);
            return Ok(());
        }
        let cut = floor_char_boundary(s, room);
        let _ = self.staging.buf.push_str(&s[..cut]);
        self.staging.truncated = true;
        Ok(())
    }
}

/// Largest index `<= index` that lies on a char boundary of `s`
#[must_use]
pub fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_fits() {
        let s = Staging::<16>::render(format_args!("{}-{}", "ab", 12), 16);
        assert_eq!(s.as_str(), "ab-12");
        assert!(!s.truncated());
    }

    #[test]
    fn render_truncates_to_limit() {
        let s = Staging::<16>::render(format_args!("{}", "abcdefghij"), 4);
        assert_eq!(s.as_str(), "abcd");
        assert!(s.truncated());
    }

    #[test]
    fn render_never_splits_a_char() {
        // 'é' is two bytes; a limit of 2 cannot hold "aé"
        let s = Staging::<8>::render(format_args!("aé"), 2);
        assert_eq!(s.as_str(), "a");
        assert!(s.truncated());
    }

    #[test]
    fn push_after_render() {
        let mut s = Staging::<8>::render(format_args!("abc"), 6);
        assert!(s.push_str("\r\n"));
        assert_eq!(s.as_str(), "abc\r\n");
        assert!(!s.push_str("xyz1"));
    }
}
