//! Light Manager Firmware Library
//!
//! This library provides the core of a small network-attached controller
//! for EverFlourish EMW200R remote power sockets. A telnet-style peer sends
//! line commands; switch commands are turned into a 24-bit codeword and
//! bit-banged onto a 433 MHz OOK transmitter.
//!
//! # Architecture
//!
//! The firmware is organized in layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    APPLICATION LAYER                         │
//! │  Built-in commands (on/off/log)  │  Controller context       │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    PROTOCOL LAYER                            │
//! │  Session state machine  │  Line parser  │  Command registry   │
//! ├─────────────────────────────────────────────────────────────┤
//! │                      RADIO LAYER                             │
//! │  Codeword encoder  │  Pulse-train transmitter                │
//! ├─────────────────────────────────────────────────────────────┤
//! │                   HAL / TRANSPORT LAYER                      │
//! │  embedded-hal OutputPin + DelayNs  │  embedded-io peer       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Execution model
//!
//! Everything runs on one thread, driven by an external loop that keeps
//! calling [`protocol::session::Session::poll`]. Only the transmitter
//! blocks: one burst busy-waits for its full duration (see
//! [`config::BURST_DURATION_US`]) and the session is starved meanwhile.
//!
//! # Design Principles
//!
//! - **Type-driven design**: a [`types::SwitchAddress`] can only hold a valid
//!   group and socket, so no degenerate codeword can reach the radio
//! - **No heap**: all buffers are fixed-capacity `heapless` containers
//! - **No unsafe in application code**
//! - **Functional core, imperative shell**: encoding and parsing are pure,
//!   pins and sockets sit behind traits

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

#[macro_use]
mod logging;

/// Hardware Abstraction Layer
///
/// Transport traits consumed by the session, plus host adapters.
pub mod hal;

/// Radio Control Logic
///
/// Codeword encoding and the blocking pulse-train transmitter.
pub mod radio;

/// Communication Protocols
///
/// Line buffering, command parsing, registry and the session state machine.
pub mod protocol;

/// Diagnostic ring buffer log
pub mod diag;

/// Built-in command handlers
pub mod commands;

/// Bounded text rendering
pub mod text;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::commands::{register_commands, Controller};
    pub use crate::config::*;
    pub use crate::diag::MemoryLog;
    pub use crate::hal::net::{Connection, Listener};
    pub use crate::protocol::args::Args;
    pub use crate::protocol::registry::{Command, Registry, RegistryFull};
    pub use crate::protocol::session::{Reply, Session, SessionState};
    pub use crate::radio::encoder::{Codeword, Pulse};
    pub use crate::radio::transmit::{Transmitter, TransmitterConfig};
    pub use crate::types::*;

    // Common traits
    pub use embedded_hal::delay::DelayNs;
    pub use embedded_hal::digital::OutputPin;
}
