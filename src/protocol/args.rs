//! Command line splitting
//!
//! Splits on single spaces with no trimming: `"cmd  x"` gives the
//! arguments `["", "x"]` and a trailing space gives a trailing empty
//! argument. After [`MAX_ARGS`] arguments the last one keeps whatever is
//! left of the line, spaces included.

use core::ops::Index;

use heapless::Vec;

use crate::config::MAX_ARGS;

/// A command line split into its name and arguments
///
/// Borrows the session's line buffer, so it cannot outlive the dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedLine<'l> {
    /// Command token (everything up to the first space)
    pub name: &'l str,
    /// Argument tokens
    pub args: Args<'l>,
}

/// Argument tokens of one command line
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Args<'l> {
    tokens: Vec<&'l str, MAX_ARGS>,
}

impl<'l> Args<'l> {
    /// Build from tokens; extra tokens beyond [`MAX_ARGS`] are dropped
    #[must_use]
    pub fn from_tokens(tokens: &[&'l str]) -> Self {
        Self {
            tokens: tokens.iter().copied().take(MAX_ARGS).collect(),
        }
    }

    /// Argument by index (0-based)
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&'l str> {
        self.tokens.get(index).copied()
    }

    /// Number of arguments
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if there are no arguments
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Arguments as a slice
    #[must_use]
    pub fn as_slice(&self) -> &[&'l str] {
        &self.tokens
    }

    /// Iterate over the arguments
    pub fn iter(&self) -> impl Iterator<Item = &'l str> + '_ {
        self.tokens.iter().copied()
    }
}

impl<'l> Index<usize> for Args<'l> {
    type Output = &'l str;

    fn index(&self, index: usize) -> &Self::Output {
        &self.tokens[index]
    }
}

/// Split a line into command name and arguments
#[must_use]
pub fn parse_line(line: &str) -> ParsedLine<'_> {
    let (name, rest) = match line.split_once(' ') {
        Some((name, rest)) => (name, Some(rest)),
        None => (line, None),
    };

    let mut args = Args::default();
    if let Some(rest) = rest {
        for token in rest.splitn(MAX_ARGS, ' ') {
            // splitn never yields more than MAX_ARGS items.
            let _ = args.tokens.push(token);
        }
    }

    ParsedLine { name, args }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_only() {
        let parsed = parse_line("log");
        assert_eq!(parsed.name, "log");
        assert!(parsed.args.is_empty());
    }

    #[test]
    fn empty_line() {
        let parsed = parse_line("");
        assert_eq!(parsed.name, "");
        assert!(parsed.args.is_empty());
    }

    #[test]
    fn three_args() {
        let parsed = parse_line("set a 1 on");
        assert_eq!(parsed.name, "set");
        assert_eq!(parsed.args.as_slice(), &["a", "1", "on"]);
    }

    #[test]
    fn double_space_gives_empty_token() {
        let parsed = parse_line("cmd  x");
        assert_eq!(parsed.name, "cmd");
        assert_eq!(parsed.args.as_slice(), &["", "x"]);
    }

    #[test]
    fn trailing_space_gives_empty_token() {
        let parsed = parse_line("on ");
        assert_eq!(parsed.args.as_slice(), &[""]);
    }

    #[test]
    fn last_arg_keeps_remainder() {
        let parsed = parse_line("c 1 2 3 4 5 6 7 8 9 10 11");
        assert_eq!(parsed.args.len(), MAX_ARGS);
        assert_eq!(parsed.args[8], "9 10 11");
    }
}
