//! Transmit Control
//!
//! Bit-bangs codewords onto the data pin of a 433 MHz OOK transmitter.
//!
//! # Blocking
//!
//! [`Transmitter::transmit`] busy-waits through the whole burst
//! ([`crate::config::BURST_DURATION_US`] at default timing). It is not cooperative and
//! cannot be cancelled: the receivers only decode tightly timed pulses, so
//! the burst is one uninterruptible unit of work and everything else on the
//! polling loop stalls until it returns.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::{FRAME_UNITS, NUM_TRANSMITS, PULSE_WIDTH_US};
use crate::radio::encoder::{Codeword, Pulse};
use crate::types::{Action, SwitchAddress, SwitchError};

/// Burst timing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransmitterConfig {
    /// Width of one timing unit in microseconds
    pub pulse_width_us: u32,
    /// Frames per burst
    pub repeats: u8,
}

impl TransmitterConfig {
    /// Duration of one burst in microseconds
    #[must_use]
    pub fn burst_duration_us(&self) -> u64 {
        u64::from(self.repeats) * u64::from(FRAME_UNITS) * u64::from(self.pulse_width_us)
    }
}

impl Default for TransmitterConfig {
    fn default() -> Self {
        Self {
            pulse_width_us: PULSE_WIDTH_US,
            repeats: NUM_TRANSMITS,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for TransmitterConfig {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "TxConfig({}us x{})", self.pulse_width_us, self.repeats);
    }
}

/// Pulse-train transmitter
///
/// Owns the data pin and the delay source exclusively for its lifetime.
pub struct Transmitter<P, D> {
    pin: P,
    delay: D,
    config: TransmitterConfig,
    bursts: u32,
}

impl<P, D> Transmitter<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Create a transmitter with default timing
    ///
    /// The pin is expected to already be configured as a push-pull output.
    pub fn new(pin: P, delay: D) -> Self {
        Self::with_config(pin, delay, TransmitterConfig::default())
    }

    /// Create a transmitter with custom timing
    pub fn with_config(pin: P, delay: D, config: TransmitterConfig) -> Self {
        Self {
            pin,
            delay,
            config,
            bursts: 0,
        }
    }

    /// Get the burst timing
    #[must_use]
    pub const fn config(&self) -> TransmitterConfig {
        self.config
    }

    /// Number of completed bursts since creation
    #[must_use]
    pub const fn bursts(&self) -> u32 {
        self.bursts
    }

    /// Encode and send a switch command
    ///
    /// # Errors
    ///
    /// Returns [`SwitchError::Output`] if the pin fails mid-burst.
    pub fn switch(&mut self, address: SwitchAddress, action: Action) -> Result<Codeword, SwitchError> {
        let codeword = Codeword::encode(address, action);
        self.transmit(codeword).map_err(|_| {
            error!("pin fault while sending {}", codeword);
            SwitchError::Output
        })?;
        Ok(codeword)
    }

    /// Send one full burst of `codeword`
    ///
    /// Blocks for the whole burst. The pin is left low afterwards.
    ///
    /// # Errors
    ///
    /// Propagates the first pin error; the rest of the burst is abandoned.
    pub fn transmit(&mut self, codeword: Codeword) -> Result<(), P::Error> {
        debug!("burst {} x{}", codeword, self.config.repeats);
        for pulse in codeword.burst(self.config.repeats) {
            self.emit(pulse)?;
        }
        self.bursts = self.bursts.wrapping_add(1);
        Ok(())
    }

    /// Drive one pulse pair
    fn emit(&mut self, pulse: Pulse) -> Result<(), P::Error> {
        let unit = self.config.pulse_width_us;
        if pulse.high > 0 {
            self.pin.set_high()?;
            self.delay.delay_us(u32::from(pulse.high) * unit);
        }
        if pulse.low > 0 {
            self.pin.set_low()?;
            self.delay.delay_us(u32::from(pulse.low) * unit);
        }
        Ok(())
    }

    /// Release the pin and delay
    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }
}
