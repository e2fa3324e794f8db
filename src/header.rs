//! Boot signature.
//!
//! Some bare-metal bootstraps check for two fixed 32-bit words at the very
//! start of flash before jumping to the image. When requested, the composer
//! stamps them over whatever a component placed at offset 0.

/// The signature word, stored little-endian.
pub const MAGIC_WORD: u32 = 0xAEDB_041D;

/// Size of the signature region at offset 0.
pub const HEADER_LEN: usize = 8;

/// Returns the signature: `MAGIC_WORD` twice, little-endian.
pub fn header_bytes() -> [u8; HEADER_LEN] {
    let word = MAGIC_WORD.to_le_bytes();
    let mut header = [0u8; HEADER_LEN];
    header[..4].copy_from_slice(&word);
    header[4..].copy_from_slice(&word);
    header
}
