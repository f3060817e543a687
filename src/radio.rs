//! Radio Control Logic
//!
//! Turns a switch command into the EMW200R line code and drives it onto
//! the transmitter data pin.

pub mod encoder;
pub mod transmit;
