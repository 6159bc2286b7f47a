//! Validation and slicing of a complete font tag buffer.
//!
//! A font tag is laid out as:
//!
//! 1. [`TagHeader`]
//! 2. [`FontBase`]
//! 3. Character table entries and their blocks (optional, size accounted only)
//! 4. Style font names (`name_length + 1` bytes per non-empty reference)
//! 5. [`CharacterRecord`] array
//! 6. Pixel region
//!
//! None of the trailing regions are located through pointers, so every offset is derived by
//! adding up the sizes of the regions before it.

use core::{error, fmt};

use crate::{
    character::{CHARACTER_RECORD_SIZE, CharacterRecord},
    font::{FONT_BASE_SIZE, FontBase, REFLEXIVE_SIZE, Reflexive},
    header::{TAG_HEADER_SIZE, TagHeader},
    limits::Limits,
    u32_to_usize, usize_to_u64,
};

/// The size, in bytes, of the fixed-size portion of a font tag.
pub const FIXED_SIZE: usize = TAG_HEADER_SIZE + FONT_BASE_SIZE;

/// A validated font tag.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct FontTag<'buffer> {
    /// The complete font tag.
    buffer: &'buffer [u8],
    /// The decoded [`TagHeader`].
    header: TagHeader,
    /// The decoded [`FontBase`].
    font: FontBase,
    /// Offset of the [`CharacterRecord`] array.
    characters_offset: usize,
    /// Offset of the pixel region.
    pixels_offset: usize,
}

impl<'buffer> FontTag<'buffer> {
    /// Validates `buffer` as a font tag.
    ///
    /// # Errors
    ///
    /// - [`LayoutError::TooSmall`]: Returned if `buffer` cannot hold the fixed-size structures.
    /// - [`LayoutError::NotAFontTag`]: Returned if neither the signature nor the tag group match.
    /// - [`LayoutError::NoCharacters`]: Returned if the tag has no characters.
    /// - [`LayoutError::TooManyCharacters`]: Returned if the tag has more characters than
    ///   [`Limits::max_characters`].
    /// - [`LayoutError::NoPixelData`]: Returned if the pixel region is empty.
    /// - [`LayoutError::CorruptLayout`]: Returned if the size of `buffer` does not match the size
    ///   implied by its structures.
    pub fn parse(buffer: &'buffer [u8], limits: &Limits) -> Result<Self, LayoutError> {
        let too_small = LayoutError::TooSmall {
            size: buffer.len(),
            minimum: FIXED_SIZE,
        };
        if buffer.len() < FIXED_SIZE {
            return Err(too_small);
        }
        let header = TagHeader::parse(buffer).ok_or(too_small)?;
        let font = FontBase::parse(buffer, TAG_HEADER_SIZE).ok_or(too_small)?;

        if !header.is_font_tag() {
            return Err(LayoutError::NotAFontTag {
                tag_group: header.tag_group,
                signature: header.signature,
            });
        }

        let character_count = font.characters.count;
        if character_count == 0 {
            return Err(LayoutError::NoCharacters);
        }
        if character_count > limits.max_characters {
            return Err(LayoutError::TooManyCharacters {
                count: character_count,
                max: limits.max_characters,
            });
        }

        if font.pixels.size == 0 {
            return Err(LayoutError::NoPixelData);
        }

        let actual = usize_to_u64(buffer.len());
        let character_tables_size = character_tables_size(buffer, font.character_tables)?;
        let names_size = font
            .style_fonts
            .iter()
            .fold(0u64, |size, style_font| size.saturating_add(style_font.trailing_size()));

        let characters_offset = usize_to_u64(FIXED_SIZE)
            .saturating_add(character_tables_size)
            .saturating_add(names_size);
        let pixels_offset = characters_offset
            .saturating_add(u64::from(character_count) * usize_to_u64(CHARACTER_RECORD_SIZE));
        let expected = pixels_offset.saturating_add(u64::from(font.pixels.size));
        if expected != actual {
            return Err(LayoutError::CorruptLayout { expected, actual });
        }

        // Both offsets are no larger than the length of `buffer`.
        let corrupt = LayoutError::CorruptLayout { expected, actual };
        let characters_offset = usize::try_from(characters_offset).map_err(|_| corrupt)?;
        let pixels_offset = usize::try_from(pixels_offset).map_err(|_| corrupt)?;

        log::debug!(
            "font tag: {character_count} characters at {characters_offset:#x}, \
            {} pixel bytes at {pixels_offset:#x}, {character_tables_size} bytes of character \
            tables, {names_size} bytes of style font names",
            font.pixels.size
        );

        Ok(Self {
            buffer,
            header,
            font,
            characters_offset,
            pixels_offset,
        })
    }

    /// Returns the [`TagHeader`] of this [`FontTag`].
    pub const fn header(&self) -> &TagHeader {
        &self.header
    }

    /// Returns the [`FontBase`] of this [`FontTag`].
    pub const fn font(&self) -> &FontBase {
        &self.font
    }

    /// Returns the number of [`CharacterRecord`]s in this [`FontTag`].
    pub const fn character_count(&self) -> u32 {
        self.font.characters.count
    }

    /// Returns the offset of the [`CharacterRecord`] array.
    pub const fn characters_offset(&self) -> usize {
        self.characters_offset
    }

    /// Returns the offset of the pixel region.
    pub const fn pixels_offset(&self) -> usize {
        self.pixels_offset
    }

    /// Returns the [`CharacterRecord`] at `index` or `None` if out of bounds.
    pub fn character(&self, index: u32) -> Option<CharacterRecord> {
        if index >= self.character_count() {
            return None;
        }

        let offset = self.characters_offset + u32_to_usize(index) * CHARACTER_RECORD_SIZE;
        CharacterRecord::parse(self.buffer, offset)
    }

    /// Returns an [`Iterator`] over the [`CharacterRecord`]s in stored order.
    pub fn characters(&self) -> impl Iterator<Item = CharacterRecord> + use<'buffer> {
        let tag = *self;
        (0..tag.character_count()).filter_map(move |index| tag.character(index))
    }

    /// Returns the pixel region shared by every character.
    pub fn pixel_region(&self) -> &'buffer [u8] {
        &self.buffer[self.pixels_offset..]
    }
}

/// Returns the number of bytes occupied by the character table entries and their blocks.
fn character_tables_size(buffer: &[u8], tables: Reflexive) -> Result<u64, LayoutError> {
    let actual = usize_to_u64(buffer.len());
    let entries_size = u64::from(tables.count) * usize_to_u64(REFLEXIVE_SIZE);
    let entries_end = usize_to_u64(FIXED_SIZE) + entries_size;
    if entries_end > actual {
        return Err(LayoutError::CorruptLayout {
            expected: entries_end,
            actual,
        });
    }

    let mut size = entries_size;
    for index in 0..u32_to_usize(tables.count) {
        let entry = Reflexive::parse(buffer, FIXED_SIZE + index * REFLEXIVE_SIZE).ok_or(
            LayoutError::CorruptLayout {
                expected: entries_end,
                actual,
            },
        )?;
        size = size.saturating_add(u64::from(entry.count) * 2);
    }

    Ok(size)
}

/// Various errors that can occur while validating a [`FontTag`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum LayoutError {
    /// The buffer is too small to hold the fixed-size structures of a font tag.
    TooSmall {
        /// The size of the buffer.
        size: usize,
        /// The minimum size of a font tag.
        minimum: usize,
    },
    /// Neither the signature nor the tag group identify a font tag.
    NotAFontTag {
        /// The tag group stored in the header.
        tag_group: u32,
        /// The signature stored in the header.
        signature: u32,
    },
    /// The tag contains no characters.
    NoCharacters,
    /// The tag contains more characters than allowed.
    TooManyCharacters {
        /// The number of characters in the tag.
        count: u32,
        /// The maximum number of characters allowed.
        max: u32,
    },
    /// The tag has an empty pixel region.
    NoPixelData,
    /// The size of the buffer does not match the size implied by its structures.
    CorruptLayout {
        /// The size implied by the structures.
        expected: u64,
        /// The size of the buffer.
        actual: u64,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooSmall { size, minimum } => write!(
                f,
                "buffer of {size} bytes is too small to be a font tag (minimum {minimum} bytes)"
            ),
            Self::NotAFontTag {
                tag_group,
                signature,
            } => write!(
                f,
                "not a font tag: tag group {tag_group:08X}, signature {signature:08X}"
            ),
            Self::NoCharacters => write!(f, "font tag has no characters"),
            Self::TooManyCharacters { count, max } => {
                write!(f, "font tag has {count} characters (maximum {max})")
            }
            Self::NoPixelData => write!(f, "font tag has no pixel data"),
            Self::CorruptLayout { expected, actual } => write!(
                f,
                "corrupt font tag: layout requires {expected} bytes but buffer holds {actual} bytes"
            ),
        }
    }
}

impl error::Error for LayoutError {}

#[cfg(test)]
mod test {
    use super::{FIXED_SIZE, FontTag, LayoutError};
    use crate::{
        font::TagReference,
        limits::Limits,
        testing::{RawFontTag, record},
    };

    #[test]
    fn plain_tag_offsets() {
        let mut raw = RawFontTag::new(&[record(65, 2, 2), record(66, 1, 3)], &[1; 7]);
        let bytes = raw.assemble();
        let tag = FontTag::parse(&bytes, &Limits::default()).unwrap();

        assert_eq!(tag.character_count(), 2);
        assert_eq!(tag.characters_offset(), FIXED_SIZE);
        assert_eq!(tag.pixels_offset(), FIXED_SIZE + 40);
        assert_eq!(tag.pixel_region(), &[1; 7]);
        assert_eq!(
            tag.characters().map(|c| c.character).collect::<alloc::vec::Vec<_>>(),
            [65, 66]
        );
        assert_eq!(tag.character(2), None);
    }

    #[test]
    fn trailing_regions_shift_characters() {
        let mut raw = RawFontTag::new(&[record(65, 1, 1)], &[9]);
        raw.tables = alloc::vec![3, 0, 5];
        raw.font.style_fonts[1] = TagReference {
            name_length: 10,
            ..TagReference::NONE
        };
        raw.font.style_fonts[3] = TagReference {
            name_length: 4,
            ..TagReference::NONE
        };
        let bytes = raw.assemble();
        let tag = FontTag::parse(&bytes, &Limits::default()).unwrap();

        let tables = 3 * 12 + (3 + 0 + 5) * 2;
        let names = 11 + 5;
        assert_eq!(tag.characters_offset(), FIXED_SIZE + tables + names);
        assert_eq!(tag.character(0).unwrap().character, 65);
        assert_eq!(tag.pixel_region(), &[9]);
    }

    #[test]
    fn rejects_small_buffers() {
        let bytes = [0; FIXED_SIZE - 1];
        assert_eq!(
            FontTag::parse(&bytes, &Limits::default()),
            Err(LayoutError::TooSmall {
                size: FIXED_SIZE - 1,
                minimum: FIXED_SIZE
            })
        );
    }

    #[test]
    fn rejects_foreign_tags() {
        let mut raw = RawFontTag::new(&[record(65, 1, 1)], &[9]);
        raw.header.signature = 0;
        raw.header.tag_group = 0x6269_746D;
        let bytes = raw.assemble();

        assert_eq!(
            FontTag::parse(&bytes, &Limits::default()),
            Err(LayoutError::NotAFontTag {
                tag_group: 0x6269_746D,
                signature: 0
            })
        );

        // Only one of the two needs to match.
        raw.header.tag_group = crate::header::FONT_TAG_GROUP;
        let bytes = raw.assemble();
        assert!(FontTag::parse(&bytes, &Limits::default()).is_ok());
    }

    #[test]
    fn rejects_empty_tags() {
        let bytes = RawFontTag::new(&[], &[9]).assemble();
        assert_eq!(
            FontTag::parse(&bytes, &Limits::default()),
            Err(LayoutError::NoCharacters)
        );

        let bytes = RawFontTag::new(&[record(65, 0, 0)], &[]).assemble();
        assert_eq!(
            FontTag::parse(&bytes, &Limits::default()),
            Err(LayoutError::NoPixelData)
        );
    }

    #[test]
    fn rejects_too_many_characters() {
        let bytes = RawFontTag::new(&[record(65, 1, 1), record(66, 1, 1)], &[1, 2]).assemble();
        let limits = Limits {
            max_characters: 1,
            ..Limits::default()
        };

        assert_eq!(
            FontTag::parse(&bytes, &limits),
            Err(LayoutError::TooManyCharacters { count: 2, max: 1 })
        );
    }

    #[test]
    fn rejects_size_mismatch() {
        let mut bytes = RawFontTag::new(&[record(65, 2, 2)], &[1; 4]).assemble();
        let expected = bytes.len() as u64;

        bytes.push(0);
        assert_eq!(
            FontTag::parse(&bytes, &Limits::default()),
            Err(LayoutError::CorruptLayout {
                expected,
                actual: expected + 1
            })
        );

        bytes.truncate(bytes.len() - 2);
        assert_eq!(
            FontTag::parse(&bytes, &Limits::default()),
            Err(LayoutError::CorruptLayout {
                expected,
                actual: expected - 1
            })
        );
    }

    #[test]
    fn rejects_character_tables_past_the_end() {
        let mut raw = RawFontTag::new(&[record(65, 1, 1)], &[9]);
        raw.font.character_tables.count = 1000;
        raw.font.characters.count = 1;
        raw.font.pixels.size = 1;
        let bytes = raw.assemble_untouched();

        assert_eq!(
            FontTag::parse(&bytes, &Limits::default()),
            Err(LayoutError::CorruptLayout {
                expected: u64::try_from(FIXED_SIZE + 1000 * 12).unwrap(),
                actual: u64::try_from(bytes.len()).unwrap(),
            })
        );
    }
}
