//! EMW200R Codeword Encoder
//!
//! A receiver listens for a 24-bit word made of three bytes: an address
//! byte selecting the group, a socket byte and an action byte. Both the
//! address and socket bytes start from the alternating pattern `0x55` and
//! clear bit pairs to select a dial position; the action byte ends in
//! `11` for on and `00` for off.
//!
//! On air every bit is a pulse pair measured in timing units:
//!
//! ```text
//!  1-bit  ███___        3 high, 1 low
//!  0-bit  █___          1 high, 3 low
//!  sync   █_______ ... 1 high, 31 low
//! ```
//!
//! Everything here is pure; [`super::transmit`] turns pulses into pin
//! transitions.

use core::fmt;
use core::iter;

use crate::config::{
    BIT_LONG_UNITS, BIT_SHORT_UNITS, CODEWORD_BITS, NUM_TRANSMITS, SYNC_HIGH_UNITS, SYNC_LOW_UNITS,
};
use crate::types::{Action, SwitchAddress};

/// Base pattern for an "on" word: 01010101 01010101 01010111
pub const BASE_ON: [u8; 3] = [0x55, 0x55, 0x57];

/// Base pattern for an "off" word: 01010101 01010101 01010100
pub const BASE_OFF: [u8; 3] = [0x55, 0x55, 0x54];

/// One high/low pulse pair, measured in timing units
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pulse {
    /// Units the pin is held high
    pub high: u8,
    /// Units the pin is held low afterwards
    pub low: u8,
}

impl Pulse {
    /// Frame synchronisation pulse
    pub const SYNC: Self = Self::new(SYNC_HIGH_UNITS, SYNC_LOW_UNITS);

    /// Pulse pair for a 1-bit
    pub const ONE: Self = Self::new(BIT_LONG_UNITS, BIT_SHORT_UNITS);

    /// Pulse pair for a 0-bit
    pub const ZERO: Self = Self::new(BIT_SHORT_UNITS, BIT_LONG_UNITS);

    /// Create a pulse pair
    #[must_use]
    pub const fn new(high: u8, low: u8) -> Self {
        Self { high, low }
    }

    /// Pulse pair for a data bit
    #[must_use]
    pub const fn for_bit(bit: bool) -> Self {
        if bit {
            Self::ONE
        } else {
            Self::ZERO
        }
    }

    /// Total length in units
    #[must_use]
    pub const fn units(self) -> u32 {
        self.high as u32 + self.low as u32
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Pulse {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Pulse({}H,{}L)", self.high, self.low);
    }
}

/// The 24-bit word that fully determines one switch command
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Codeword([u8; 3]);

impl Codeword {
    /// Derive the codeword for an address and action
    #[must_use]
    pub const fn encode(address: SwitchAddress, action: Action) -> Self {
        let base = match action {
            Action::On => BASE_ON,
            Action::Off => BASE_OFF,
        };
        Self([
            base[0] & address.group().mask(),
            base[1] & address.socket().mask(),
            base[2],
        ])
    }

    /// Wrap raw bytes (address, socket, action)
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self(bytes)
    }

    /// Raw bytes in transmission order
    #[must_use]
    pub const fn bytes(self) -> [u8; 3] {
        self.0
    }

    /// Address (group) byte
    #[must_use]
    pub const fn address_byte(self) -> u8 {
        self.0[0]
    }

    /// Socket byte
    #[must_use]
    pub const fn socket_byte(self) -> u8 {
        self.0[1]
    }

    /// Action byte
    #[must_use]
    pub const fn action_byte(self) -> u8 {
        self.0[2]
    }

    /// The word as a 24-bit integer, address byte most significant
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        (self.0[0] as u32) << 16 | (self.0[1] as u32) << 8 | self.0[2] as u32
    }

    /// Data bits in transmission order (each byte MSB first)
    pub fn bits(self) -> impl Iterator<Item = bool> {
        (0..CODEWORD_BITS).rev().map(move |i| (self.as_u32() >> i) & 1 == 1)
    }

    /// One frame: a sync pulse followed by the 24 data pulses
    pub fn frame(self) -> impl Iterator<Item = Pulse> {
        iter::once(Pulse::SYNC).chain(self.bits().map(Pulse::for_bit))
    }

    /// A full burst: the frame repeated `repeats` times back to back
    pub fn burst(self, repeats: u8) -> impl Iterator<Item = Pulse> {
        (0..repeats).flat_map(move |_| self.frame())
    }

    /// Number of pulses in a default burst
    #[must_use]
    pub const fn burst_len() -> usize {
        NUM_TRANSMITS as usize * (1 + CODEWORD_BITS)
    }
}

impl fmt::Debug for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Codeword({:06X})", self.as_u32())
    }
}

impl fmt::Display for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06X}", self.as_u32())
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Codeword {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{:06X}", self.as_u32());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Group, Socket};

    fn addr(group: Group, socket: u8) -> SwitchAddress {
        SwitchAddress::new(group, Socket::new(socket).unwrap())
    }

    #[test]
    fn a1_on() {
        let cw = Codeword::encode(addr(Group::A, 1), Action::On);
        assert_eq!(cw.bytes(), [0x15, 0x15, 0x57]);
    }

    #[test]
    fn d3_off() {
        let cw = Codeword::encode(addr(Group::D, 3), Action::Off);
        assert_eq!(cw.bytes(), [0x54, 0x51, 0x54]);
    }

    #[test]
    fn bits_are_msb_first() {
        let cw = Codeword::from_bytes([0x80, 0x00, 0x01]);
        let bits: heapless::Vec<bool, 24> = cw.bits().collect();
        assert_eq!(bits.len(), 24);
        assert!(bits[0]);
        assert!(bits[1..23].iter().all(|b| !b));
        assert!(bits[23]);
    }

    #[test]
    fn frame_starts_with_sync() {
        let cw = Codeword::encode(addr(Group::B, 2), Action::On);
        let mut frame = cw.frame();
        assert_eq!(frame.next(), Some(Pulse::SYNC));
        assert_eq!(frame.count(), 24);
    }

    #[test]
    fn pulse_units() {
        assert_eq!(Pulse::SYNC.units(), 32);
        assert_eq!(Pulse::ONE.units(), 4);
        assert_eq!(Pulse::ZERO.units(), 4);
    }
}
