//! Character records and the per-character files built from them.

use alloc::{format, string::String, vec::Vec};
use core::{error, fmt, mem::offset_of};

use crate::{encoding::BigEndian, raw};

/// The size, in bytes, of a [`CharacterRecord`].
pub const CHARACTER_RECORD_SIZE: usize = size_of::<raw::FontCharacter>();

/// The extension of a [`CharacterFile`].
pub const CHARACTER_FILE_EXTENSION: &str = "bin";

/// Glyph metadata of a single character.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct CharacterRecord {
    /// The character code.
    pub character: u16,
    /// The horizontal advance of the character.
    pub character_width: i16,
    /// The width of the bitmap in pixels.
    pub bitmap_width: i16,
    /// The height of the bitmap in pixels.
    pub bitmap_height: i16,
    /// The horizontal origin of the bitmap.
    pub bitmap_origin_x: i16,
    /// The vertical origin of the bitmap, measured down from its top row.
    pub bitmap_origin_y: i16,
    /// Index used by hardware text rendering.
    pub hardware_character_index: u16,
    /// Offset of the bitmap into the shared pixel region.
    pub pixels_offset: u32,
}

impl CharacterRecord {
    /// Decodes the [`CharacterRecord`] at `offset` bytes into `bytes`.
    pub fn parse(bytes: &[u8], offset: usize) -> Option<Self> {
        let field = |field_offset: usize| offset + field_offset;

        let record = Self {
            character: BigEndian::read_u16(
                bytes,
                field(offset_of!(raw::FontCharacter, character)),
            )?,
            character_width: BigEndian::read_i16(
                bytes,
                field(offset_of!(raw::FontCharacter, character_width)),
            )?,
            bitmap_width: BigEndian::read_i16(
                bytes,
                field(offset_of!(raw::FontCharacter, bitmap_width)),
            )?,
            bitmap_height: BigEndian::read_i16(
                bytes,
                field(offset_of!(raw::FontCharacter, bitmap_height)),
            )?,
            bitmap_origin_x: BigEndian::read_i16(
                bytes,
                field(offset_of!(raw::FontCharacter, bitmap_origin_x)),
            )?,
            bitmap_origin_y: BigEndian::read_i16(
                bytes,
                field(offset_of!(raw::FontCharacter, bitmap_origin_y)),
            )?,
            hardware_character_index: BigEndian::read_u16(
                bytes,
                field(offset_of!(raw::FontCharacter, hardware_character_index)),
            )?,
            pixels_offset: BigEndian::read_u32(
                bytes,
                field(offset_of!(raw::FontCharacter, pixels_offset)),
            )?,
        };
        Some(record)
    }

    /// Returns the number of pixel bytes the bitmap of this character occupies.
    ///
    /// A bitmap with a non-positive width or height has no pixels.
    pub fn pixel_size(&self) -> usize {
        match (
            usize::try_from(self.bitmap_width),
            usize::try_from(self.bitmap_height),
        ) {
            (Ok(width), Ok(height)) => width * height,
            _ => 0,
        }
    }

    /// Returns the `(ascending, descending)` extents of this character relative to the baseline.
    pub fn vertical_extents(&self) -> (i32, i32) {
        let height = i32::from(self.bitmap_height);
        let descending = height - i32::from(self.bitmap_origin_y);
        let ascending = height - descending;
        (ascending, descending)
    }

    /// Appends the encoded [`CharacterRecord`] to `out`.
    pub fn encode(&self, out: &mut Vec<u8>) {
        BigEndian::write_u16(out, self.character);
        BigEndian::write_i16(out, self.character_width);
        BigEndian::write_i16(out, self.bitmap_width);
        BigEndian::write_i16(out, self.bitmap_height);
        BigEndian::write_i16(out, self.bitmap_origin_x);
        BigEndian::write_i16(out, self.bitmap_origin_y);
        BigEndian::write_u16(out, self.hardware_character_index);
        BigEndian::write_padding(out, 2);
        BigEndian::write_u32(out, self.pixels_offset);
    }
}

/// A single character detached from its font tag: a [`CharacterRecord`] followed by exactly the
/// pixel bytes of its bitmap.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct CharacterFile<'buffer> {
    /// The record of the character. [`CharacterRecord::pixels_offset`] has no meaning outside of
    /// a font tag.
    pub record: CharacterRecord,
    /// The row-major pixel bytes of the bitmap.
    pub pixels: &'buffer [u8],
}

impl<'buffer> CharacterFile<'buffer> {
    /// Decodes a [`CharacterFile`] from the entire contents of `bytes`.
    ///
    /// # Errors
    ///
    /// - [`CharacterFileError::Truncated`]: Returned if `bytes` cannot hold a [`CharacterRecord`].
    /// - [`CharacterFileError::PixelSizeMismatch`]: Returned if the bytes following the record are
    ///   not exactly [`CharacterRecord::pixel_size()`] bytes.
    pub fn parse(bytes: &'buffer [u8]) -> Result<Self, CharacterFileError> {
        let Some(record) = CharacterRecord::parse(bytes, 0) else {
            return Err(CharacterFileError::Truncated { size: bytes.len() });
        };

        let pixels = &bytes[CHARACTER_RECORD_SIZE..];
        if pixels.len() != record.pixel_size() {
            return Err(CharacterFileError::PixelSizeMismatch {
                expected: record.pixel_size(),
                actual: pixels.len(),
            });
        }

        Ok(Self { record, pixels })
    }

    /// Returns the name of the file this [`CharacterFile`] is stored under.
    pub fn file_name(&self) -> String {
        character_file_name(self.record.character)
    }

    /// Returns the encoded [`CharacterFile`].
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(CHARACTER_RECORD_SIZE + self.pixels.len());
        self.record.encode(&mut out);
        out.extend_from_slice(self.pixels);
        out
    }
}

/// Returns the name of the [`CharacterFile`] that stores the character `code`.
pub fn character_file_name(code: u16) -> String {
    format!("{code}.{CHARACTER_FILE_EXTENSION}")
}

/// Various errors that can occur while decoding a [`CharacterFile`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum CharacterFileError {
    /// The file is too small to hold a [`CharacterRecord`].
    Truncated {
        /// The size of the file in bytes.
        size: usize,
    },
    /// The number of pixel bytes does not match the dimensions of the bitmap.
    PixelSizeMismatch {
        /// The size implied by the bitmap dimensions.
        expected: usize,
        /// The number of bytes following the record.
        actual: usize,
    },
}

impl fmt::Display for CharacterFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated { size } => write!(
                f,
                "character file of {size} bytes is smaller than a {CHARACTER_RECORD_SIZE} byte \
                character record"
            ),
            Self::PixelSizeMismatch { expected, actual } => write!(
                f,
                "bitmap dimensions require {expected} pixel bytes but {actual} bytes are present"
            ),
        }
    }
}

impl error::Error for CharacterFileError {}
