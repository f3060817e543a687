//! Host adapters
//!
//! Lets the controller run on a desktop: a non-blocking TCP listener stands
//! in for the Ethernet shield, a tracing pin stands in for the transmitter
//! data line and a spin loop provides microsecond delays.

use std::io::{self, Read as _, Write as _};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};

use core::convert::Infallible;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType as PinErrorType, OutputPin};
use embedded_io::{ErrorKind, ErrorType, Read, ReadReady, Write};

use super::net::{Connection, Listener};

/// Map a std I/O error onto the `embedded-io` error kinds
#[must_use]
pub fn error_kind(err: &io::Error) -> ErrorKind {
    match err.kind() {
        io::ErrorKind::ConnectionReset => ErrorKind::ConnectionReset,
        io::ErrorKind::ConnectionAborted => ErrorKind::ConnectionAborted,
        io::ErrorKind::NotConnected => ErrorKind::NotConnected,
        io::ErrorKind::BrokenPipe => ErrorKind::BrokenPipe,
        io::ErrorKind::TimedOut => ErrorKind::TimedOut,
        io::ErrorKind::Interrupted => ErrorKind::Interrupted,
        io::ErrorKind::InvalidInput => ErrorKind::InvalidInput,
        io::ErrorKind::InvalidData => ErrorKind::InvalidData,
        _ => ErrorKind::Other,
    }
}

/// Non-blocking TCP listener accepting one peer at a time
pub struct TcpPeerListener {
    inner: TcpListener,
}

impl TcpPeerListener {
    /// Bind and switch the socket to non-blocking mode
    ///
    /// # Errors
    ///
    /// Returns the underlying error if the address cannot be bound.
    pub fn bind(addr: impl ToSocketAddrs) -> io::Result<Self> {
        let inner = TcpListener::bind(addr)?;
        inner.set_nonblocking(true)?;
        Ok(Self { inner })
    }

    /// Address actually bound (useful with port 0)
    ///
    /// # Errors
    ///
    /// Returns the underlying error if the socket has no local address.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.inner.local_addr()
    }
}

impl Listener for TcpPeerListener {
    type Conn = TcpPeer;

    fn accept(&mut self) -> Option<TcpPeer> {
        match self.inner.accept() {
            Ok((stream, addr)) => match TcpPeer::new(stream) {
                Ok(peer) => {
                    info!("accepted {}", addr);
                    Some(peer)
                }
                Err(e) => {
                    warn!("could not configure {}: {}", addr, e);
                    None
                }
            },
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => None,
            Err(e) => {
                warn!("accept failed: {}", e);
                None
            }
        }
    }
}

/// Non-blocking TCP peer
pub struct TcpPeer {
    stream: TcpStream,
    open: bool,
}

impl TcpPeer {
    /// Wrap an accepted stream
    ///
    /// # Errors
    ///
    /// Returns the underlying error if the stream cannot be made non-blocking.
    pub fn new(stream: TcpStream) -> io::Result<Self> {
        stream.set_nonblocking(true)?;
        stream.set_nodelay(true)?;
        Ok(Self { stream, open: true })
    }
}

impl ErrorType for TcpPeer {
    type Error = ErrorKind;
}

impl ReadReady for TcpPeer {
    fn read_ready(&mut self) -> Result<bool, ErrorKind> {
        if !self.open {
            return Ok(false);
        }
        let mut probe = [0u8; 1];
        match self.stream.peek(&mut probe) {
            Ok(0) => {
                // Orderly shutdown by the peer.
                self.open = false;
                Ok(false)
            }
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(false),
            Err(e) => {
                self.open = false;
                Err(error_kind(&e))
            }
        }
    }
}

impl Read for TcpPeer {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ErrorKind> {
        match self.stream.read(buf) {
            Ok(0) if !buf.is_empty() => {
                self.open = false;
                Ok(0)
            }
            Ok(n) => Ok(n),
            Err(e) => Err(error_kind(&e)),
        }
    }
}

impl Write for TcpPeer {
    fn write(&mut self, buf: &[u8]) -> Result<usize, ErrorKind> {
        loop {
            match self.stream.write(buf) {
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => std::thread::yield_now(),
                Err(e) => return Err(error_kind(&e)),
                Ok(n) => return Ok(n),
            }
        }
    }

    fn flush(&mut self) -> Result<(), ErrorKind> {
        self.stream.flush().map_err(|e| error_kind(&e))
    }
}

impl Connection for TcpPeer {
    fn is_connected(&self) -> bool {
        self.open
    }

    fn close(&mut self) {
        if self.open {
            let _ = self.stream.shutdown(Shutdown::Both);
            self.open = false;
        }
    }
}

/// Output pin that records its level and logs every transition
#[derive(Debug, Default)]
pub struct TracePin {
    high: bool,
    transitions: u64,
}

impl TracePin {
    /// Create a pin that starts low
    #[must_use]
    pub const fn new() -> Self {
        Self {
            high: false,
            transitions: 0,
        }
    }

    /// Current level
    #[must_use]
    pub const fn is_high(&self) -> bool {
        self.high
    }

    /// Number of level changes so far
    #[must_use]
    pub const fn transitions(&self) -> u64 {
        self.transitions
    }

    fn set(&mut self, high: bool) {
        if self.high != high {
            self.high = high;
            self.transitions += 1;
            trace!("pin -> {}", if high { "HIGH" } else { "LOW" });
        }
    }
}

impl PinErrorType for TracePin {
    type Error = Infallible;
}

impl OutputPin for TracePin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.set(true);
        Ok(())
    }
}

/// Busy-wait delay with microsecond resolution
///
/// Sleeping would hand the thread to the scheduler and stretch pulses far
/// beyond tolerance, so this spins on the monotonic clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpinDelay;

impl DelayNs for SpinDelay {
    fn delay_ns(&mut self, ns: u32) {
        let deadline = Instant::now() + Duration::from_nanos(u64::from(ns));
        while Instant::now() < deadline {
            core::hint::spin_loop();
        }
    }
}
