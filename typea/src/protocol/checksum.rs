// typea/src/protocol/checksum.rs

//! Link-level two's-complement checksums of the frame format.

/// Compute the Length Checksum (LCS) for a frame.
/// LCS = 0x100 - length (mod 256)
pub fn lcs(len: u8) -> u8 {
    0u8.wrapping_sub(len)
}

/// Compute the Data Checksum (DCS) over the TFI direction byte and the
/// payload. DCS = 0x100 - (TFI + sum(payload)) (mod 256)
pub fn dcs(direction: u8, payload: &[u8]) -> u8 {
    let sum = payload
        .iter()
        .fold(direction, |acc, &b| acc.wrapping_add(b));
    0u8.wrapping_sub(sum)
}
