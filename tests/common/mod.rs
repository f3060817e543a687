//! Shared test doubles
//!
//! A recording pin and delay that write into one shared timeline, and a
//! scripted peer connection with a handle for driving it from the test.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, OutputPin};
use embedded_io::{ErrorKind, ErrorType, Read, ReadReady, Write};

use lightmgr::hal::net::{Connection, Listener};

// =============================================================================
// Pin and delay
// =============================================================================

/// One recorded hardware action
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    High,
    Low,
    /// Delay in nanoseconds
    Delay(u64),
}

pub type Timeline = Rc<RefCell<Vec<Event>>>;

/// Pin error returned by a failing [`RecordingPin`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PinFault;

impl digital::Error for PinFault {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

pub struct RecordingPin {
    timeline: Timeline,
    /// Fail once this many level changes have been recorded
    fail_after: Option<usize>,
    writes: usize,
}

impl RecordingPin {
    fn record(&mut self, event: Event) -> Result<(), PinFault> {
        if self.fail_after.is_some_and(|limit| self.writes >= limit) {
            return Err(PinFault);
        }
        self.writes += 1;
        self.timeline.borrow_mut().push(event);
        Ok(())
    }
}

impl digital::ErrorType for RecordingPin {
    type Error = PinFault;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), PinFault> {
        self.record(Event::Low)
    }

    fn set_high(&mut self) -> Result<(), PinFault> {
        self.record(Event::High)
    }
}

pub struct RecordingDelay {
    timeline: Timeline,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.timeline.borrow_mut().push(Event::Delay(u64::from(ns)));
    }

    fn delay_us(&mut self, us: u32) {
        self.timeline.borrow_mut().push(Event::Delay(u64::from(us) * 1_000));
    }
}

/// Pin and delay sharing a fresh timeline
pub fn recorder() -> (RecordingPin, RecordingDelay, Timeline) {
    recorder_failing_after(None)
}

/// Like [`recorder`], but the pin fails after `limit` successful writes
pub fn recorder_failing_after(limit: Option<usize>) -> (RecordingPin, RecordingDelay, Timeline) {
    let timeline = Timeline::default();
    let pin = RecordingPin {
        timeline: Rc::clone(&timeline),
        fail_after: limit,
        writes: 0,
    };
    let delay = RecordingDelay {
        timeline: Rc::clone(&timeline),
    };
    (pin, delay, timeline)
}

/// Collapse a timeline into `(high_us, low_us)` pulses
pub fn pulses(timeline: &Timeline) -> Vec<(u64, u64)> {
    let mut out = Vec::new();
    let mut current: Option<(u64, u64)> = None;
    let mut high = false;

    for event in timeline.borrow().iter() {
        match *event {
            Event::High => {
                if let Some(pulse) = current.take() {
                    out.push(pulse);
                }
                current = Some((0, 0));
                high = true;
            }
            Event::Low => high = false,
            Event::Delay(ns) => {
                if let Some((h, l)) = current.as_mut() {
                    if high {
                        *h += ns / 1_000;
                    } else {
                        *l += ns / 1_000;
                    }
                }
            }
        }
    }
    out.extend(current);
    out
}

// =============================================================================
// Peer connection
// =============================================================================

#[derive(Debug, Default)]
struct PeerState {
    input: VecDeque<u8>,
    output: Vec<u8>,
    connected: bool,
    closed: bool,
    flushes: usize,
    /// Report a hang-up once all input has been read
    hang_up_when_drained: bool,
}

/// Test-side handle on a scripted connection
#[derive(Clone, Debug)]
pub struct PeerHandle(Rc<RefCell<PeerState>>);

impl PeerHandle {
    pub fn send(&self, bytes: &[u8]) {
        self.0.borrow_mut().input.extend(bytes.iter().copied());
    }

    pub fn output(&self) -> Vec<u8> {
        self.0.borrow().output.clone()
    }

    pub fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow().output).into_owned()
    }

    pub fn take_output(&self) -> String {
        let bytes = std::mem::take(&mut self.0.borrow_mut().output);
        String::from_utf8_lossy(&bytes).into_owned()
    }

    pub fn unread(&self) -> usize {
        self.0.borrow().input.len()
    }

    pub fn flushes(&self) -> usize {
        self.0.borrow().flushes
    }

    pub fn is_closed(&self) -> bool {
        self.0.borrow().closed
    }

    pub fn disconnect(&self) {
        self.0.borrow_mut().connected = false;
    }

    pub fn hang_up_when_drained(&self) {
        self.0.borrow_mut().hang_up_when_drained = true;
    }
}

pub struct ScriptedConn {
    state: Rc<RefCell<PeerState>>,
}

/// A connected peer and the handle that drives it
pub fn peer() -> (ScriptedConn, PeerHandle) {
    let state = Rc::new(RefCell::new(PeerState {
        connected: true,
        ..PeerState::default()
    }));
    (
        ScriptedConn {
            state: Rc::clone(&state),
        },
        PeerHandle(state),
    )
}

impl ErrorType for ScriptedConn {
    type Error = ErrorKind;
}

impl ReadReady for ScriptedConn {
    fn read_ready(&mut self) -> Result<bool, ErrorKind> {
        let mut state = self.state.borrow_mut();
        if state.input.is_empty() && state.hang_up_when_drained {
            state.connected = false;
        }
        Ok(!state.input.is_empty())
    }
}

impl Read for ScriptedConn {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ErrorKind> {
        let mut state = self.state.borrow_mut();
        let mut n = 0;
        while n < buf.len() {
            let Some(byte) = state.input.pop_front() else {
                break;
            };
            buf[n] = byte;
            n += 1;
        }
        Ok(n)
    }
}

impl Write for ScriptedConn {
    fn write(&mut self, buf: &[u8]) -> Result<usize, ErrorKind> {
        let mut state = self.state.borrow_mut();
        if !state.connected {
            return Err(ErrorKind::NotConnected);
        }
        state.output.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), ErrorKind> {
        self.state.borrow_mut().flushes += 1;
        Ok(())
    }
}

impl Connection for ScriptedConn {
    fn is_connected(&self) -> bool {
        let state = self.state.borrow();
        state.connected && !state.closed
    }

    fn close(&mut self) {
        let mut state = self.state.borrow_mut();
        state.closed = true;
        state.connected = false;
    }
}

/// Listener handing out queued connections, one per `accept`
#[derive(Default)]
pub struct ScriptedListener {
    queue: Rc<RefCell<VecDeque<ScriptedConn>>>,
}

impl ScriptedListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a fresh peer and return its handle
    pub fn connect(&self) -> PeerHandle {
        let (conn, handle) = peer();
        self.queue.borrow_mut().push_back(conn);
        handle
    }

    pub fn waiting(&self) -> usize {
        self.queue.borrow().len()
    }
}

impl Listener for ScriptedListener {
    type Conn = ScriptedConn;

    fn accept(&mut self) -> Option<ScriptedConn> {
        self.queue.borrow_mut().pop_front()
    }
}
