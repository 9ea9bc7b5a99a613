// typea/src/constants.rs
//! Wire constants shared across the crate

/// Frame preamble + start code: 0x00 0x00 0xFF
pub const FRAME_PREAMBLE: [u8; 3] = [0x00, 0x00, 0xFF];

/// Frame postamble: 0x00
pub const FRAME_POSTAMBLE: u8 = 0x00;

/// Fixed ACK short frame
pub const ACK_FRAME: [u8; 6] = [0x00, 0x00, 0xFF, 0x00, 0xFF, 0x00];

/// Fixed NACK short frame
pub const NACK_FRAME: [u8; 6] = [0x00, 0x00, 0xFF, 0xFF, 0x00, 0x00];

/// Length byte value marking an extended (>255 byte) frame. Extended
/// frames are not implemented; the marker is detected and rejected.
pub const EXTENDED_FRAME_MARKER: u8 = 0xFF;

/// Bytes of fixed overhead around an information frame payload:
/// preamble(3) + len(1) + lcs(1) + dcs(1) + postamble(1)
pub const FRAME_OVERHEAD: usize = 7;

/// Length of an ACK/NACK short frame
pub const SHORT_FRAME_LEN: usize = 6;

/// Length of an error frame
pub const ERROR_FRAME_LEN: usize = 8;

/// TFI byte marking an application-level error frame. Error frames are
/// otherwise shaped like a zero-payload information frame, so the TFI
/// slot is the only discriminator.
pub const ERROR_TFI: u8 = 0x7F;

/// Maximum payload length for a standard (non-extended) frame
pub const MAX_PAYLOAD_LEN: usize = 255;

/// TFI direction byte: host -> front-end
pub const DIR_HOST_TO_CHIP: u8 = 0xD4;
/// TFI direction byte: front-end -> host
pub const DIR_CHIP_TO_HOST: u8 = 0xD5;

/// Serial wake preamble. The chip samples the line after the 0x55 0x55
/// pattern; the trailing zeros give it time to leave low-power mode.
pub const WAKE_PREAMBLE: [u8; 16] = [
    0x55, 0x55, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// Chip command codes (host -> chip). The response code is always the
/// command code + 1.
pub mod cmd {
    /// Query IC type, firmware version and supported features
    pub const GET_FIRMWARE_VERSION: u8 = 0x02;
    /// Read one internal register
    pub const READ_REGISTER: u8 = 0x06;
    /// Write one internal register
    pub const WRITE_REGISTER: u8 = 0x08;
    /// Set the internal flag byte controlling automatic behaviors
    pub const SET_PARAMETERS: u8 = 0x12;
    /// Configure the secure access module wiring
    pub const SAM_CONFIGURATION: u8 = 0x14;
    /// Tune an RF configuration item
    pub const RF_CONFIGURATION: u8 = 0x32;
    /// Exchange data with a selected target, chip handles the card layer
    pub const IN_DATA_EXCHANGE: u8 = 0x40;
    /// Raw card-layer passthrough, no automatic handling
    pub const IN_COMMUNICATE_THRU: u8 = 0x42;
    /// Chip-driven polling and anticollision
    pub const IN_LIST_PASSIVE_TARGET: u8 = 0x4A;
    /// Fetch the next frame an external initiator sent us
    pub const TG_GET_INITIATOR_COMMAND: u8 = 0x88;
    /// Enter target mode and wait for an external field
    pub const TG_INIT_AS_TARGET: u8 = 0x8C;
    /// Answer the initiator's last frame
    pub const TG_RESPONSE_TO_INITIATOR: u8 = 0x90;

    /// Response code paired with a command code.
    pub const fn response(cmd: u8) -> u8 {
        cmd + 1
    }
}

/// ISO 14443-A card-layer command codes, relayed transparently by the
/// front-end.
pub mod card {
    /// REQA, sent as a 7-bit short frame
    pub const REQA: u8 = 0x26;
    /// Anticollision cascade level 1 selector
    pub const SEL_CL1: u8 = 0x93;
    /// Anticollision cascade level 2 selector
    pub const SEL_CL2: u8 = 0x95;
    /// Second byte of SDD_REQ (NVB = 0x20: no UID bits yet)
    pub const SDD_REQ: u8 = 0x20;
    /// Second byte of SEL_REQ (NVB = 0x70: full 40 bits follow)
    pub const SEL_REQ: u8 = 0x70;
    /// Cascade tag prefixing an incomplete UID fragment
    pub const CASCADE_TAG: u8 = 0x88;
    /// NTAG/Ultralight read-page command (returns 16 bytes / 4 pages)
    pub const READ_PAGE: u8 = 0x30;
    /// HLTA halt command
    pub const HALT: u8 = 0x50;
}

/// SetParameters flag byte clearing every automatic behavior, most
/// importantly ATR_RES and RATS handling in target mode. The responder
/// answers all card-layer traffic itself.
pub const PARAMS_NONE: u8 = 0x00;

/// SAMConfiguration operating modes (chip command 0x14)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SamMode {
    /// SAM unused, the chip handles everything itself
    Normal = 0x01,
    /// Virtual-card mode
    VirtualCard = 0x02,
    /// Wired-card mode
    WiredCard = 0x03,
    /// Dual-card mode
    DualCard = 0x04,
}

/// TgInitAsTarget mode bits
pub mod target_mode {
    /// Only accept passive-mode activation
    pub const PASSIVE_ONLY: u8 = 1 << 0;
    /// Only accept DEP activation
    pub const DEP_ONLY: u8 = 1 << 1;
    /// Only accept PICC activation
    pub const PICC_ONLY: u8 = 1 << 2;
}

/// CIU register addresses reachable through the serial ReadRegister /
/// WriteRegister passthrough. The 0x63xx block shadows the contactless
/// interface unit.
pub mod reg {
    /// TX framing and CRC generation control
    pub const CIU_TX_MODE: u16 = 0x6302;
    /// RX framing and CRC checking control
    pub const CIU_RX_MODE: u16 = 0x6303;
    /// Manual receiver settings, including the parity kill bit
    pub const CIU_MANUAL_RCV: u16 = 0x630D;
    /// Bit-oriented framing adjustments (TxLastBits for short frames)
    pub const CIU_BIT_FRAMING: u16 = 0x633D;
}
