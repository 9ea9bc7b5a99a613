// typea/src/error.rs

//! Crate-wide error and result types.

use thiserror::Error;

/// Crate-wide error type
#[derive(Error, Debug)]
pub enum Error {
    /// The transport rejected or truncated a write
    #[error("transport write failed: {0}")]
    TransportWrite(String),

    /// The transport failed while reading
    #[error("transport read failed: {0}")]
    TransportRead(String),

    /// No ACK arrived within the configured deadline
    #[error("no ACK within deadline")]
    AckTimeout,

    /// No response frame arrived within the configured deadline
    #[error("no response within deadline")]
    ResponseTimeout,

    /// A frame violated the wire format beyond recovery
    #[error("malformed frame: {0}")]
    MalformedFrame(String),

    /// LCS or DCS did not match the frame contents
    #[error("checksum mismatch: expected {expected:#04x}, got {actual:#04x}")]
    ChecksumMismatch {
        /// Checksum the frame contents require
        expected: u8,
        /// Checksum byte actually carried by the frame
        actual: u8,
    },

    /// A frame or payload exceeded the available buffer space
    #[error("frame needs {needed} bytes but buffer holds {capacity}")]
    BufferOverflow {
        /// Bytes the frame or payload requires
        needed: usize,
        /// Bytes the buffer can hold
        capacity: usize,
    },

    /// The extended (>255 byte) frame format was announced
    #[error("extended frames are not supported")]
    UnsupportedFrameSize,

    /// The chip answered with an application-level error frame
    #[error("chip error frame: code {0:#04x}")]
    ChipError(u8),

    /// A register read/write echoed the wrong response code
    #[error("register access failed: expected response {expected:#04x}, got {actual:#04x}")]
    RegisterAccess {
        /// Response code the command pairs with
        expected: u8,
        /// Response code actually received
        actual: u8,
    },

    /// A command response carried the wrong response code
    #[error("unexpected response code: expected {expected:#04x}, got {actual:#04x}")]
    UnexpectedResponse {
        /// Response code the command pairs with
        expected: u8,
        /// Response code actually received
        actual: u8,
    },

    /// An external initiator sent a card-layer command the responder
    /// does not implement
    #[error("initiator sent unimplemented command {0:#04x}")]
    UnknownInitiatorCommand(u8),

    /// A read-page request reached past the end of the memory image
    #[error("page {page} out of range: image has {pages} pages")]
    PageOutOfRange {
        /// First page of the requested chunk
        page: usize,
        /// Whole pages available in the image
        pages: usize,
    },

    /// A buffer or field had the wrong byte count
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Byte count the context requires
        expected: usize,
        /// Byte count actually seen
        actual: usize,
    },
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;
