// typea/src/lib.rs

//! typea
//!
//! Pure Rust driver core for PN532-class ISO 14443 Type A contactless
//! front-ends: frame codec, command/response engine, register access,
//! reader-side anticollision and card-side emulation. Physical transports
//! (serial/SPI bring-up) live outside the crate behind the
//! [`transport::Transport`] and [`transport::RegisterBus`] traits.
#![warn(missing_docs)]

pub mod cancel;
pub mod constants;
pub mod device;
pub mod error;
pub mod initiator;
pub mod prelude;
pub mod protocol;
pub mod target;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
