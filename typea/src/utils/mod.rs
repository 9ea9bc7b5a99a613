//! Small shared helpers: hex formatting for log output and timeout
//! conversion.

pub mod hex;
pub mod timeout;

pub use hex::*;
pub use timeout::*;
