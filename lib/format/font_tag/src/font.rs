//! The fixed-size body of a font tag and the reference shapes it contains.

use alloc::vec::Vec;
use core::mem::offset_of;

use crate::{encoding::BigEndian, header::FONT_TAG_GROUP, raw};

/// The size, in bytes, of a [`FontBase`].
pub const FONT_BASE_SIZE: usize = size_of::<raw::FontBase>();

/// The size, in bytes, of a [`Reflexive`].
pub const REFLEXIVE_SIZE: usize = size_of::<raw::Reflexive>();

/// The size, in bytes, of a [`TagReference`].
pub const TAG_REFERENCE_SIZE: usize = size_of::<raw::TagReference>();

/// The number of style font slots in a [`FontBase`].
pub const STYLE_FONT_COUNT: usize = 4;

/// The [`TagReference::index`] of a reference that points to no tag.
pub const NULL_TAG_INDEX: u32 = 0xFFFF_FFFF;

/// A count of elements in an array whose bytes lie later in the tag.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct Reflexive {
    /// The number of elements in the array.
    pub count: u32,
}

impl Reflexive {
    /// Decodes the [`Reflexive`] at `offset` bytes into `bytes`.
    pub fn parse(bytes: &[u8], offset: usize) -> Option<Self> {
        let count = BigEndian::read_u32(bytes, offset + offset_of!(raw::Reflexive, count))?;
        Some(Self { count })
    }

    /// Appends the encoded [`Reflexive`] to `out`. Pointers are written as zero.
    pub fn encode(&self, out: &mut Vec<u8>) {
        BigEndian::write_u32(out, self.count);
        BigEndian::write_padding(out, REFLEXIVE_SIZE - size_of::<u32>());
    }
}

/// A reference to another tag, optionally followed by its name in the trailing region.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct TagReference {
    /// The group of the referenced tag.
    pub tag_group: u32,
    /// The length of the referenced tag's name, not counting its NUL terminator.
    pub name_length: u32,
    /// The index of the referenced tag.
    pub index: u32,
}

impl TagReference {
    /// A reference to no font tag.
    pub const NONE: Self = Self {
        tag_group: FONT_TAG_GROUP,
        name_length: 0,
        index: NULL_TAG_INDEX,
    };

    /// Decodes the [`TagReference`] at `offset` bytes into `bytes`.
    pub fn parse(bytes: &[u8], offset: usize) -> Option<Self> {
        let reference = Self {
            tag_group: BigEndian::read_u32(bytes, offset + offset_of!(raw::TagReference, tag_group))?,
            name_length: BigEndian::read_u32(
                bytes,
                offset + offset_of!(raw::TagReference, name_length),
            )?,
            index: BigEndian::read_u32(bytes, offset + offset_of!(raw::TagReference, index))?,
        };
        Some(reference)
    }

    /// Returns the number of bytes the name of this reference occupies in the trailing region.
    pub fn trailing_size(&self) -> u64 {
        if self.name_length == 0 {
            0
        } else {
            u64::from(self.name_length) + 1
        }
    }

    /// Appends the encoded [`TagReference`] to `out`. The name pointer is written as zero.
    pub fn encode(&self, out: &mut Vec<u8>) {
        BigEndian::write_u32(out, self.tag_group);
        BigEndian::write_u32(out, 0);
        BigEndian::write_u32(out, self.name_length);
        BigEndian::write_u32(out, self.index);
    }
}

/// The size of an opaque blob whose bytes lie later in the tag.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct TagData {
    /// The size of the blob in bytes.
    pub size: u32,
}

impl TagData {
    /// Decodes the [`TagData`] at `offset` bytes into `bytes`.
    pub fn parse(bytes: &[u8], offset: usize) -> Option<Self> {
        let size = BigEndian::read_u32(bytes, offset + offset_of!(raw::TagData, size))?;
        Some(Self { size })
    }

    /// Appends the encoded [`TagData`] to `out`. Offsets and pointers are written as zero.
    pub fn encode(&self, out: &mut Vec<u8>) {
        BigEndian::write_u32(out, self.size);
        BigEndian::write_padding(out, size_of::<raw::TagData>() - size_of::<u32>());
    }
}

/// The fixed-size body of a font tag, immediately following the [`TagHeader`][th].
///
/// [th]: crate::header::TagHeader
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct FontBase {
    /// Font flags, not interpreted.
    pub flags: u32,
    /// The distance from the baseline to the top of the tallest character.
    pub ascending_height: i16,
    /// The distance from the baseline to the bottom of the lowest character.
    pub descending_height: i16,
    /// Extra vertical spacing between lines.
    pub leading_height: i16,
    /// Extra horizontal spacing between characters.
    pub leading_width: i16,
    /// The optional character tables.
    pub character_tables: Reflexive,
    /// References to the bold, italic, condensed, and underline variants.
    pub style_fonts: [TagReference; STYLE_FONT_COUNT],
    /// The character record array.
    pub characters: Reflexive,
    /// The shared pixel region.
    pub pixels: TagData,
}

impl FontBase {
    /// Returns the [`FontBase`] of a rebuilt font tag.
    pub fn rebuilt(
        ascending_height: i16,
        descending_height: i16,
        character_count: u32,
        pixels_size: u32,
    ) -> Self {
        Self {
            flags: 0,
            ascending_height,
            descending_height,
            leading_height: 0,
            leading_width: 0,
            character_tables: Reflexive::default(),
            style_fonts: [TagReference::NONE; STYLE_FONT_COUNT],
            characters: Reflexive {
                count: character_count,
            },
            pixels: TagData { size: pixels_size },
        }
    }

    /// Decodes the [`FontBase`] at `offset` bytes into `bytes`.
    ///
    /// Returns `None` if the [`FontBase`] does not fit inside `bytes`.
    pub fn parse(bytes: &[u8], offset: usize) -> Option<Self> {
        if bytes.len() < offset.saturating_add(FONT_BASE_SIZE) {
            return None;
        }

        let field = |field_offset: usize| offset + field_offset;

        let mut style_fonts = [TagReference::NONE; STYLE_FONT_COUNT];
        for (index, style_font) in style_fonts.iter_mut().enumerate() {
            let reference_offset =
                field(offset_of!(raw::FontBase, style_fonts)) + index * TAG_REFERENCE_SIZE;
            *style_font = TagReference::parse(bytes, reference_offset)?;
        }

        let font = Self {
            flags: BigEndian::read_u32(bytes, field(offset_of!(raw::FontBase, flags)))?,
            ascending_height: BigEndian::read_i16(
                bytes,
                field(offset_of!(raw::FontBase, ascending_height)),
            )?,
            descending_height: BigEndian::read_i16(
                bytes,
                field(offset_of!(raw::FontBase, descending_height)),
            )?,
            leading_height: BigEndian::read_i16(
                bytes,
                field(offset_of!(raw::FontBase, leading_height)),
            )?,
            leading_width: BigEndian::read_i16(
                bytes,
                field(offset_of!(raw::FontBase, leading_width)),
            )?,
            character_tables: Reflexive::parse(
                bytes,
                field(offset_of!(raw::FontBase, character_tables)),
            )?,
            style_fonts,
            characters: Reflexive::parse(bytes, field(offset_of!(raw::FontBase, characters)))?,
            pixels: TagData::parse(bytes, field(offset_of!(raw::FontBase, pixels)))?,
        };
        Some(font)
    }

    /// Appends the encoded [`FontBase`] to `out`.
    pub fn encode(&self, out: &mut Vec<u8>) {
        BigEndian::write_u32(out, self.flags);
        BigEndian::write_i16(out, self.ascending_height);
        BigEndian::write_i16(out, self.descending_height);
        BigEndian::write_i16(out, self.leading_height);
        BigEndian::write_i16(out, self.leading_width);
        BigEndian::write_padding(
            out,
            offset_of!(raw::FontBase, character_tables) - offset_of!(raw::FontBase, pad),
        );
        self.character_tables.encode(out);
        for style_font in &self.style_fonts {
            style_font.encode(out);
        }
        self.characters.encode(out);
        self.pixels.encode(out);
    }
}

#[cfg(test)]
mod test {
    use alloc::vec::Vec;

    use super::{FONT_BASE_SIZE, FontBase, NULL_TAG_INDEX, TagReference};
    use crate::header::FONT_TAG_GROUP;

    #[test]
    fn rebuilt_font_base_layout() {
        let mut out = Vec::new();
        FontBase::rebuilt(12, 3, 2, 0x100).encode(&mut out);

        assert_eq!(out.len(), FONT_BASE_SIZE);
        assert_eq!(&out[4..8], &[0, 12, 0, 3]);
        // Empty character tables.
        assert_eq!(&out[48..52], &[0, 0, 0, 0]);
        // First style font slot.
        assert_eq!(&out[60..64], b"font");
        assert_eq!(&out[68..72], &[0, 0, 0, 0]);
        assert_eq!(&out[72..76], &[0xFF, 0xFF, 0xFF, 0xFF]);
        // Characters and pixels.
        assert_eq!(&out[124..128], &[0, 0, 0, 2]);
        assert_eq!(&out[136..140], &[0, 0, 1, 0]);
    }

    #[test]
    fn parse_at_offset() {
        let mut font = FontBase::rebuilt(-4, 9, 7, 21);
        font.flags = 0x8000_0001;
        font.style_fonts[2] = TagReference {
            tag_group: FONT_TAG_GROUP,
            name_length: 11,
            index: NULL_TAG_INDEX,
        };

        let mut out = Vec::from([0xAA; 3]);
        font.encode(&mut out);

        assert_eq!(FontBase::parse(&out, 3), Some(font));
        assert_eq!(FontBase::parse(&out[..out.len() - 1], 3), None);
    }

    #[test]
    fn trailing_size_counts_terminator() {
        assert_eq!(TagReference::NONE.trailing_size(), 0);

        let reference = TagReference {
            name_length: 5,
            ..TagReference::NONE
        };
        assert_eq!(reference.trailing_size(), 6);
    }
}
