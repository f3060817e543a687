//! System configuration and protocol constants
//!
//! This module defines compile-time constants for the controller.
//! Radio timing, buffer sizes and protocol literals are centralized here.

/// Width of one timing unit of the EMW200R line code in microseconds
pub const PULSE_WIDTH_US: u32 = 350;

/// Number of times each codeword is repeated in one burst
///
/// The radio link has no acknowledgment, so repetition is the only
/// way to make a receiver catch the frame.
pub const NUM_TRANSMITS: u8 = 10;

/// Sync pulse high time in units
pub const SYNC_HIGH_UNITS: u8 = 1;

/// Sync pulse low time in units
pub const SYNC_LOW_UNITS: u8 = 31;

/// Long half of a bit pulse pair in units
pub const BIT_LONG_UNITS: u8 = 3;

/// Short half of a bit pulse pair in units
pub const BIT_SHORT_UNITS: u8 = 1;

/// Number of data bits in one codeword
pub const CODEWORD_BITS: usize = 24;

/// Units taken by one frame (sync pulse plus 24 data bits)
pub const FRAME_UNITS: u32 = (SYNC_HIGH_UNITS as u32 + SYNC_LOW_UNITS as u32)
    + CODEWORD_BITS as u32 * (BIT_LONG_UNITS as u32 + BIT_SHORT_UNITS as u32);

/// Duration of one full burst at the default timing, in microseconds
pub const BURST_DURATION_US: u32 = NUM_TRANSMITS as u32 * FRAME_UNITS * PULSE_WIDTH_US;

/// Command line buffer size (a line including its newline must fit)
pub const LINE_BUFFER_SIZE: usize = 64;

/// Maximum number of argument tokens after the command name
pub const MAX_ARGS: usize = 9;

/// Default number of command bindings a session can hold
pub const MAX_COMMANDS: usize = 8;

/// Staging buffer for a single rendered log line, including the terminator
pub const LOG_STAGING_SIZE: usize = 128;

/// Default ring buffer log capacity in bytes
pub const LOG_CAPACITY: usize = 512;

/// Staging buffer for formatted replies
pub const REPLY_STAGING_SIZE: usize = 128;

/// Default telnet port
pub const TELNET_PORT: u16 = 23;

/// Default host poll interval in milliseconds
pub const POLL_INTERVAL_MS: u64 = 5;

/// Reply sent for any line that does not name a registered command
pub const UNKNOWN_COMMAND_REPLY: &str = "what?\r\n";

/// Reply sent after a successful switch command
pub const OK_REPLY: &str = "ok\r\n";

/// Line terminator appended to log lines and replies
pub const LINE_ENDING: &str = "\r\n";
