//! Built-in commands
//!
//! | Command                  | Effect                                   |
//! |--------------------------|------------------------------------------|
//! | `on <group> <socket>`    | switch a socket on, reply `ok`           |
//! | `off <group> <socket>`   | switch a socket off, reply `ok`          |
//! | `log`                    | send the diagnostic log                  |
//!
//! Bad switch arguments are rejected before anything is transmitted and
//! answered with `error: <reason>`.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::{LINE_ENDING, LOG_CAPACITY, OK_REPLY};
use crate::diag::MemoryLog;
use crate::hal::net::Listener;
use crate::protocol::args::Args;
use crate::protocol::registry::{Command, RegistryFull};
use crate::protocol::session::{Reply, Session};
use crate::radio::encoder::Codeword;
use crate::radio::transmit::Transmitter;
use crate::types::{Action, SwitchAddress, SwitchError};

/// Application state handed to the built-in commands
pub struct Controller<P, D, const M: usize = LOG_CAPACITY> {
    transmitter: Transmitter<P, D>,
    log: MemoryLog<M>,
}

impl<P, D, const M: usize> Controller<P, D, M>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Create a controller around a transmitter with an empty log
    pub fn new(transmitter: Transmitter<P, D>) -> Self {
        Self {
            transmitter,
            log: MemoryLog::new(),
        }
    }

    /// Switch a socket and record the outcome in the log
    ///
    /// Blocks for a full burst.
    ///
    /// # Errors
    ///
    /// Returns [`SwitchError::Output`] if the transmitter pin fails.
    pub fn switch(&mut self, address: SwitchAddress, action: Action) -> Result<Codeword, SwitchError> {
        match self.transmitter.switch(address, action) {
            Ok(codeword) => {
                info!("{} {} ({})", address, action, codeword);
                self.log.info(format_args!("{address} {action}"));
                Ok(codeword)
            }
            Err(e) => {
                self.log.error(format_args!("{address} {action}: {e}"));
                Err(e)
            }
        }
    }

    /// The transmitter
    pub fn transmitter(&self) -> &Transmitter<P, D> {
        &self.transmitter
    }

    /// The diagnostic log
    pub fn log(&self) -> &MemoryLog<M> {
        &self.log
    }

    /// The diagnostic log, for writing
    pub fn log_mut(&mut self) -> &mut MemoryLog<M> {
        &mut self.log
    }
}

/// `on` / `off` handler
#[derive(Clone, Copy, Debug)]
pub struct SwitchCommand {
    action: Action,
}

impl SwitchCommand {
    /// Handler for the given action
    #[must_use]
    pub const fn new(action: Action) -> Self {
        Self { action }
    }

    /// Validate `<group> <socket>` into an address
    fn address(args: &Args<'_>) -> Result<SwitchAddress, SwitchError> {
        let group = args.get(0).ok_or(SwitchError::MissingArgument)?;
        let socket = args.get(1).ok_or(SwitchError::MissingArgument)?;
        SwitchAddress::parse(group, socket)
    }
}

impl<P, D, const M: usize> Command<Controller<P, D, M>> for SwitchCommand
where
    P: OutputPin,
    D: DelayNs,
{
    fn execute(&self, ctx: &mut Controller<P, D, M>, reply: &mut dyn Reply, args: &Args<'_>) {
        let result = Self::address(args).and_then(|address| ctx.switch(address, self.action));
        match result {
            Ok(_) => reply.respond(OK_REPLY),
            Err(e) => {
                if e != SwitchError::Output {
                    warn!("rejected {}: {}", self.action, e);
                    ctx.log.warn(format_args!("{} rejected: {e}", self.action));
                }
                reply.respond_fmt(format_args!("error: {e}{LINE_ENDING}"));
            }
        }
    }
}

/// `log` handler
#[derive(Clone, Copy, Debug, Default)]
pub struct LogCommand;

impl<P, D, const M: usize> Command<Controller<P, D, M>> for LogCommand
where
    P: OutputPin,
    D: DelayNs,
{
    fn execute(&self, ctx: &mut Controller<P, D, M>, reply: &mut dyn Reply, _args: &Args<'_>) {
        reply.respond(ctx.log.text());
    }
}

/// Handler for `on`
pub static ON: SwitchCommand = SwitchCommand::new(Action::On);

/// Handler for `off`
pub static OFF: SwitchCommand = SwitchCommand::new(Action::Off);

/// Handler for `log`
pub static SHOW_LOG: LogCommand = LogCommand;

/// Register `on`, `off` and `log` on a session
///
/// # Errors
///
/// Returns [`RegistryFull`] if the session registry cannot take three more
/// bindings.
pub fn register_commands<L, P, D, const N: usize, const M: usize>(
    session: &mut Session<'static, L, Controller<P, D, M>, N>,
) -> Result<(), RegistryFull>
where
    L: Listener,
    P: OutputPin,
    D: DelayNs,
{
    session.register(Action::On.as_str(), &ON)?;
    session.register(Action::Off.as_str(), &OFF)?;
    session.register("log", &SHOW_LOG)?;
    Ok(())
}
