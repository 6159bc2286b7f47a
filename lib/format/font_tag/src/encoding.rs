//! Big-endian reading and writing of font tag fields.

use alloc::vec::Vec;

/// Generates a bounds checked big-endian read function.
macro_rules! setup_read {
    ($func:ident, $kind:ident) => {
        #[doc = concat!("Reads the `", stringify!($kind), "` at `offset` bytes into `bytes`.")]
        ///
        /// Returns `None` if the value does not fit inside `bytes`.
        pub fn $func(bytes: &[u8], offset: usize) -> Option<$kind> {
            // Size of the generic array is interpreted from the `from_be_bytes` function.
            read_array(bytes, offset).map($kind::from_be_bytes)
        }
    };
}

/// Generates a big-endian append function.
macro_rules! setup_write {
    ($func:ident, $kind:ident) => {
        #[doc = concat!("Appends `value` to `out` as a big-endian `", stringify!($kind), "`.")]
        pub fn $func(out: &mut Vec<u8>, value: $kind) {
            out.extend_from_slice(&value.to_be_bytes());
        }
    };
}

/// A zero-sized object offering methods for safe handling of unaligned big-endian integers.
#[derive(Clone, Copy, Hash, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct BigEndian;

impl BigEndian {
    setup_read!(read_u8, u8);
    setup_read!(read_u16, u16);
    setup_read!(read_u32, u32);
    setup_read!(read_i16, i16);

    setup_write!(write_u8, u8);
    setup_write!(write_u16, u16);
    setup_write!(write_u32, u32);
    setup_write!(write_i16, i16);

    /// Appends `count` zero bytes to `out`.
    pub fn write_padding(out: &mut Vec<u8>, count: usize) {
        out.resize(out.len() + count, 0);
    }
}

/// Performs an exact-length read.
fn read_array<const N: usize>(bytes: &[u8], offset: usize) -> Option<[u8; N]> {
    let end = offset.checked_add(N)?;
    bytes.get(offset..end)?.try_into().ok()
}
