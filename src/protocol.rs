//! Communication Protocols
//!
//! Line-oriented text commands over a single peer connection:
//! `name arg1 arg2 ...\n`. Carriage returns are ignored, unknown commands
//! are answered with `what?`, and an overlong line drops the connection.

pub mod args;
pub mod line;
pub mod registry;
pub mod session;
