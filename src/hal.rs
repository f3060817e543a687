//! Hardware Abstraction Layer
//!
//! The controller only consumes hardware through traits: the radio goes
//! through `embedded-hal` pins and delays, the command session through the
//! transport traits in [`net`]. Host implementations of both live in
//! [`host`] for simulation and testing.

pub mod net;

#[cfg(feature = "std")]
pub mod host;
