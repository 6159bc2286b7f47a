//! The CRC-32 variant used to checksum tag bodies.
//!
//! This is the common reflected CRC-32 (polynomial `0xEDB88320`, seed `0xFFFFFFFF`) except that
//! the final register is stored as-is instead of being complemented.

/// The reflected CRC-32 polynomial.
const POLYNOMIAL: u32 = 0xEDB8_8320;

/// The initial value of the CRC register.
const SEED: u32 = 0xFFFF_FFFF;

/// Lookup table for byte-at-a-time CRC-32 computation.
pub const CRC32_TABLE: [u32; 256] = build_table();

/// Builds [`CRC32_TABLE`].
#[expect(clippy::cast_possible_truncation, reason = "index is at most 255")]
const fn build_table() -> [u32; 256] {
    let mut table = [0; 256];

    let mut index = 0;
    while index < table.len() {
        let mut value = index as u32;
        let mut bit = 0;
        while bit < 8 {
            value = if value & 1 == 1 {
                (value >> 1) ^ POLYNOMIAL
            } else {
                value >> 1
            };
            bit += 1;
        }

        table[index] = value;
        index += 1;
    }

    table
}

/// Incremental tag checksum computation.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Crc32 {
    /// The current CRC register.
    register: u32,
}

impl Crc32 {
    /// Creates a new [`Crc32`] seeded with `0xFFFFFFFF`.
    pub const fn new() -> Self {
        Self { register: SEED }
    }

    /// Feeds `bytes` into the checksum.
    pub fn update(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            let [index, ..] = (self.register ^ u32::from(byte)).to_le_bytes();
            self.register = CRC32_TABLE[usize::from(index)] ^ (self.register >> 8);
        }
    }

    /// Returns the raw CRC register without the final complement.
    pub const fn register(&self) -> u32 {
        self.register
    }
}

impl Default for Crc32 {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the checksum of `bytes` as stored in [`TagHeader::checksum`][c].
///
/// [c]: crate::header::TagHeader::checksum
pub fn tag_checksum(bytes: &[u8]) -> u32 {
    let mut crc = Crc32::new();
    crc.update(bytes);
    crc.register()
}
