//! Shared types used across the controller
//!
//! This module defines domain-specific types that enforce invariants
//! at construction time. A [`SwitchAddress`] can only name a receiver that
//! actually exists, so the encoder never has to deal with bad input.

use core::fmt;
use core::str::FromStr;

/// Receiver group selected by the letter wheel on the socket
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Group {
    /// Group A
    A,
    /// Group B
    B,
    /// Group C
    C,
    /// Group D
    D,
}

impl Group {
    /// All groups in dial order
    pub const ALL: [Self; 4] = [Self::A, Self::B, Self::C, Self::D];

    /// Parse a group letter (case-insensitive)
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'a' | 'A' => Some(Self::A),
            'b' | 'B' => Some(Self::B),
            'c' | 'C' => Some(Self::C),
            'd' | 'D' => Some(Self::D),
            _ => None,
        }
    }

    /// Mask applied to the address byte of the base pattern
    #[must_use]
    pub const fn mask(self) -> u8 {
        match self {
            Self::A => 0x15,
            Self::B => 0x45,
            Self::C => 0x51,
            Self::D => 0x54,
        }
    }

    /// Upper-case letter for display
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
        }
    }
}

impl FromStr for Group {
    type Err = SwitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c).ok_or(SwitchError::InvalidGroup),
            _ => Err(SwitchError::InvalidGroup),
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Group {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}", self.letter());
    }
}

/// Socket number within a group (1-3)
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Socket(u8);

impl Socket {
    /// Lowest socket number
    pub const MIN: u8 = 1;

    /// Highest socket number
    pub const MAX: u8 = 3;

    /// Create a socket, returns None if out of range
    #[must_use]
    pub const fn new(number: u8) -> Option<Self> {
        if number >= Self::MIN && number <= Self::MAX {
            Some(Self(number))
        } else {
            None
        }
    }

    /// Get the socket number
    #[must_use]
    pub const fn number(self) -> u8 {
        self.0
    }

    /// Mask applied to the socket byte of the base pattern
    #[must_use]
    pub const fn mask(self) -> u8 {
        match self.0 {
            1 => 0x15,
            2 => 0x45,
            _ => 0x51,
        }
    }
}

impl FromStr for Socket {
    type Err = SwitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u8>()
            .ok()
            .and_then(Self::new)
            .ok_or(SwitchError::InvalidSocket)
    }
}

impl fmt::Debug for Socket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Socket({})", self.0)
    }
}

impl fmt::Display for Socket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Socket {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}", self.0);
    }
}

/// Address of one physical receiver
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SwitchAddress {
    group: Group,
    socket: Socket,
}

impl SwitchAddress {
    /// Create an address from already validated parts
    #[must_use]
    pub const fn new(group: Group, socket: Socket) -> Self {
        Self { group, socket }
    }

    /// Parse an address from its group and socket tokens
    ///
    /// # Errors
    ///
    /// Returns [`SwitchError::InvalidGroup`] or [`SwitchError::InvalidSocket`]
    /// if either token does not name an existing receiver.
    pub fn parse(group: &str, socket: &str) -> Result<Self, SwitchError> {
        Ok(Self {
            group: group.parse()?,
            socket: socket.parse()?,
        })
    }

    /// Get the group
    #[must_use]
    pub const fn group(self) -> Group {
        self.group
    }

    /// Get the socket
    #[must_use]
    pub const fn socket(self) -> Socket {
        self.socket
    }
}

impl fmt::Display for SwitchAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.group, self.socket)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for SwitchAddress {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}{}", self.group, self.socket);
    }
}

/// Switch action
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Turn the socket on
    On,
    /// Turn the socket off
    Off,
}

impl Action {
    /// Get the command word for this action
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
        }
    }
}

impl FromStr for Action {
    type Err = SwitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => Ok(Self::On),
            "off" => Ok(Self::Off),
            _ => Err(SwitchError::InvalidAction),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Action {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.as_str());
    }
}

/// Errors raised while turning a command into a radio transmission
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwitchError {
    /// A required argument was not given
    MissingArgument,
    /// Group is not one of A-D
    InvalidGroup,
    /// Socket is not one of 1-3
    InvalidSocket,
    /// Action is neither `on` nor `off`
    InvalidAction,
    /// The output pin reported an error mid-burst
    Output,
}

impl SwitchError {
    /// Get a short human readable reason
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::MissingArgument => "missing argument",
            Self::InvalidGroup => "invalid group",
            Self::InvalidSocket => "invalid socket",
            Self::InvalidAction => "invalid action",
            Self::Output => "transmitter fault",
        }
    }
}

impl fmt::Display for SwitchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SwitchError {}

#[cfg(feature = "embedded")]
impl defmt::Format for SwitchError {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.message());
    }
}
