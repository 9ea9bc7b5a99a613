// typea/src/device/mod.rs

//! Chip session plumbing: the framed command engine, the register
//! facade, and the caller-facing [`Device`] handle.

pub mod builder;
pub mod exchange;
pub mod handle;
pub mod registers;

pub use builder::DeviceBuilder;
pub use exchange::{Exchange, RetryPolicy};
pub use handle::{Device, Initialized, Uninitialized};
pub use registers::{BusRegisters, ChipRegisters, RegisterAccess};
