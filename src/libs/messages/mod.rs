//! Centralized user-facing messages and the macros that print them.
//!
//! Call sites pick a [`Message`] variant and hand it to one of the `msg_*`
//! macros; the wording lives in `display.rs`, the routing between console
//! output and `tracing` lives in `macros.rs`.

pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;
