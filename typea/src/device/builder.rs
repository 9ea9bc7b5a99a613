// typea/src/device/builder.rs

//! Builder wiring a transport, retry policy and cancel token into a
//! device handle.

use crate::cancel::Cancel;
use crate::device::exchange::{Exchange, RetryPolicy};
use crate::device::handle::{Device, Uninitialized};
use crate::transport::Transport;

/// Constructs a [`Device`] from a transport with optional configuration.
pub struct DeviceBuilder<T: Transport> {
    transport: T,
    policy: RetryPolicy,
    cancel: Cancel,
}

impl<T: Transport> DeviceBuilder<T> {
    /// Start from a transport with default policy and a fresh cancel
    /// token.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            policy: RetryPolicy::default(),
            cancel: Cancel::new(),
        }
    }

    /// Override the retry and timeout knobs.
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Share an externally owned cancellation token (e.g. one a signal
    /// handler sets).
    pub fn with_cancel(mut self, cancel: Cancel) -> Self {
        self.cancel = cancel;
        self
    }

    /// Consume the builder and return an uninitialized device handle.
    pub fn build_uninitialized(self) -> Device<T, Uninitialized> {
        let exchange = Exchange::new(self.transport, self.policy, self.cancel);
        Device::from_exchange(exchange)
    }
}
