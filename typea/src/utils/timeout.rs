//! Timeout helpers.
//!
//! Timeouts are passed around as milliseconds; a value of 0 means "block
//! indefinitely" (used while waiting for an initiator whose next command
//! arrival time is unbounded).

use std::time::Duration;

/// Default per-exchange read timeout in milliseconds.
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 1000;

/// Chip-side maximum response latency per its datasheet, used as the
/// per-read granularity while assembling a frame.
pub const CHIP_RESPONSE_SLICE_MS: u64 = 15;

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// True if `timeout_ms` means "no deadline".
pub fn blocks_forever(timeout_ms: u64) -> bool {
    timeout_ms == 0
}
