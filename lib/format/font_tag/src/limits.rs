//! Resource ceilings applied while splitting and joining font tags.
//!
//! Every ceiling is enforced by failing the whole operation. Nothing is ever truncated to fit.

/// Default value of [`Limits::max_characters`]. Character codes are 16 bits wide.
pub const DEFAULT_MAX_CHARACTERS: u32 = 65535;

/// Default value of [`Limits::max_pixel_bytes`] (32 MiB).
pub const DEFAULT_MAX_PIXEL_BYTES: usize = 32 * 1024 * 1024;

/// Default value of [`Limits::max_character_bytes`] (4 MiB).
pub const DEFAULT_MAX_CHARACTER_BYTES: usize = 4 * 1024 * 1024;

/// Ceilings on the amount of data a single operation will handle.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Limits {
    /// The maximum number of characters in a font tag.
    pub max_characters: u32,
    /// The maximum size, in bytes, of the aggregated pixel region built while joining.
    pub max_pixel_bytes: usize,
    /// The maximum size, in bytes, of the bitmap of a single character while splitting.
    pub max_character_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_characters: DEFAULT_MAX_CHARACTERS,
            max_pixel_bytes: DEFAULT_MAX_PIXEL_BYTES,
            max_character_bytes: DEFAULT_MAX_CHARACTER_BYTES,
        }
    }
}
