//! Command session state machine
//!
//! ```text
//!                 accept()                 '\n'
//!  Disconnected ───────────▶ Accumulating ──────▶ Dispatching
//!       ▲                      │     ▲                 │
//!       │  overflow / hang-up  │     └─────────────────┘
//!       └──────────────────────┘       reset line
//! ```
//!
//! [`Session::poll`] never blocks: it drains whatever bytes the peer has
//! already sent and returns. A handler that transmits does block, and the
//! session cannot read until it returns.

use core::fmt;

use embedded_io::{Read, ReadReady, Write};

use super::args::{parse_line, ParsedLine};
use super::line::{LineBuffer, LineEvent};
use super::registry::{Command, Registry, RegistryFull};
use crate::config::{MAX_COMMANDS, REPLY_STAGING_SIZE, UNKNOWN_COMMAND_REPLY};
use crate::hal::net::{Connection, Listener};
use crate::text::Staging;

/// Write access back to the connected peer
pub trait Reply {
    /// Send `text` and flush it
    ///
    /// Does nothing when no peer is connected.
    fn respond(&mut self, text: &str);

    /// Format and send a reply, truncated to the reply staging size
    fn respond_fmt(&mut self, args: fmt::Arguments<'_>) {
        let text = Staging::<REPLY_STAGING_SIZE>::render(args, REPLY_STAGING_SIZE);
        self.respond(text.as_str());
    }
}

/// Stable session states (dispatching is transient inside `poll`)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// No peer attached
    Disconnected,
    /// Peer attached, collecting a line
    Accumulating,
}

#[cfg(feature = "embedded")]
impl defmt::Format for SessionState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Disconnected => defmt::write!(f, "Disconnected"),
            Self::Accumulating => defmt::write!(f, "Accumulating"),
        }
    }
}

/// Reply handle over the session's peer slot
struct PeerReply<'p, C> {
    peer: &'p mut Option<C>,
}

impl<C: Connection> Reply for PeerReply<'_, C> {
    fn respond(&mut self, text: &str) {
        respond_to(self.peer, text);
    }
}

fn respond_to<C: Connection>(peer: &mut Option<C>, text: &str) {
    let Some(conn) = peer.as_mut().filter(|c| c.is_connected()) else {
        return;
    };
    if conn.write_all(text.as_bytes()).and_then(|()| conn.flush()).is_err() {
        warn!("reply dropped, peer write failed");
    }
}

/// One command session over a single peer connection
///
/// `'a` is the lifetime of the registered handlers, `Ctx` the application
/// state passed to them and `N` the registry capacity.
pub struct Session<'a, L: Listener, Ctx, const N: usize = MAX_COMMANDS> {
    listener: L,
    peer: Option<L::Conn>,
    line: LineBuffer,
    registry: Registry<'a, Ctx, N>,
}

impl<'a, L: Listener, Ctx, const N: usize> Session<'a, L, Ctx, N> {
    /// Create a disconnected session with an empty registry
    pub fn new(listener: L) -> Self {
        Self {
            listener,
            peer: None,
            line: LineBuffer::new(),
            registry: Registry::new(),
        }
    }

    /// Register a command handler
    ///
    /// # Errors
    ///
    /// Returns [`RegistryFull`] if the registry has no free slot.
    pub fn register(&mut self, name: &'a str, handler: &'a dyn Command<Ctx>) -> Result<(), RegistryFull> {
        self.registry.register(name, handler)
    }

    /// Registered commands
    #[must_use]
    pub fn registry(&self) -> &Registry<'a, Ctx, N> {
        &self.registry
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.peer.is_some() {
            SessionState::Accumulating
        } else {
            SessionState::Disconnected
        }
    }

    /// Whether a peer is attached and still connected
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.peer.as_ref().is_some_and(Connection::is_connected)
    }

    /// Bytes of the current partial line
    #[must_use]
    pub fn pending(&self) -> &[u8] {
        self.line.as_bytes()
    }

    /// Send `text` to the peer and flush; no-op without a peer
    pub fn respond(&mut self, text: &str) {
        respond_to(&mut self.peer, text);
    }

    /// Listener the session accepts peers from
    pub fn listener(&mut self) -> &mut L {
        &mut self.listener
    }

    /// Run the session once
    ///
    /// Accepts a peer if none is attached, then consumes every byte the
    /// peer has available, dispatching each complete line.
    pub fn poll(&mut self, ctx: &mut Ctx) {
        if self.peer.is_none() {
            let Some(conn) = self.listener.accept() else {
                return;
            };
            info!("peer connected");
            self.line.clear();
            self.peer = Some(conn);
        }

        loop {
            let Some(conn) = self.peer.as_mut() else {
                return;
            };

            if !conn.is_connected() {
                self.hang_up("peer disconnected");
                return;
            }

            match conn.read_ready() {
                Ok(true) => {}
                Ok(false) => {
                    // The ready probe may itself notice a hang-up.
                    if !conn.is_connected() {
                        self.hang_up("peer disconnected");
                    }
                    return;
                }
                Err(_) => {
                    self.hang_up("peer read failed");
                    return;
                }
            }

            let mut byte = [0u8; 1];
            match conn.read(&mut byte) {
                Ok(1) => {}
                Ok(_) => {
                    self.hang_up("peer disconnected");
                    return;
                }
                Err(_) => {
                    self.hang_up("peer read failed");
                    return;
                }
            }

            match self.line.push(byte[0]) {
                LineEvent::Pending => {}
                LineEvent::Complete => self.dispatch(ctx),
                LineEvent::Overflow => {
                    self.hang_up("line too long");
                    return;
                }
            }
        }
    }

    /// Parse the buffered line, run its handler and reset the buffer
    fn dispatch(&mut self, ctx: &mut Ctx) {
        let Self {
            peer, line, registry, ..
        } = self;

        let parsed = line.as_str().map(parse_line);
        let handler = parsed
            .as_ref()
            .and_then(|ParsedLine { name, .. }| registry.lookup(name));

        match (handler, parsed) {
            (Some(handler), Some(parsed)) => {
                debug!("dispatch {}", parsed.name);
                let mut reply = PeerReply { peer };
                handler.execute(ctx, &mut reply, &parsed.args);
            }
            _ => {
                debug!("unknown command");
                respond_to(peer, UNKNOWN_COMMAND_REPLY);
            }
        }

        line.clear();
    }

    /// Close and forget the peer, discarding any partial line
    fn hang_up(&mut self, reason: &str) {
        if let Some(mut conn) = self.peer.take() {
            conn.close();
        }
        self.line.clear();
        info!("peer dropped: {}", reason);
    }
}
