//! Network transport traits
//!
//! The session never touches link setup. It only needs a way to pick up a
//! waiting peer and a byte stream to that peer. Byte I/O reuses the
//! `embedded-io` traits so any stack that implements them (a W5x00 socket,
//! a TCP stream on a host) can be plugged in.

use embedded_io::{Read, ReadReady, Write};

/// An accepted peer connection
///
/// Reads must be preceded by [`ReadReady::read_ready`] returning `true`;
/// the session never calls [`Read::read`] otherwise, so it never blocks.
pub trait Connection: Read + ReadReady + Write {
    /// Whether the peer is still attached
    fn is_connected(&self) -> bool;

    /// Tear the connection down
    fn close(&mut self);
}

/// Source of new peer connections
pub trait Listener {
    /// Connection type handed out by this listener
    type Conn: Connection;

    /// Return a waiting peer, if any, without blocking
    fn accept(&mut self) -> Option<Self::Conn>;
}
