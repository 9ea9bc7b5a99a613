// typea/src/transport/mod.rs

//! Byte-transport and register-bus seams plus their scripted mocks.

pub mod mock;
pub mod traits;

pub use mock::{MockBus, MockTransport};
pub use traits::{RegisterBus, Transport};
