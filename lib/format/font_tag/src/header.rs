//! The generic header that prefixes every tag.

use alloc::vec::Vec;
use core::mem::offset_of;

use crate::{encoding::BigEndian, raw};

/// The size, in bytes, of a [`TagHeader`].
pub const TAG_HEADER_SIZE: usize = size_of::<raw::TagHeader>();

/// [`TAG_HEADER_SIZE`] as stored in [`TagHeader::offset`].
#[expect(clippy::cast_possible_truncation, reason = "the header is 64 bytes")]
const TAG_HEADER_OFFSET: u32 = TAG_HEADER_SIZE as u32;

/// The container magic stored in [`TagHeader::signature`] (`'blam'`).
pub const TAG_SIGNATURE: u32 = 0x626C_616D;

/// The tag group of a font tag (`'font'`).
pub const FONT_TAG_GROUP: u32 = 0x666F_6E74;

/// The version written into the header of a rebuilt font tag.
pub const FONT_TAG_VERSION: u16 = 1;

/// The value of [`TagHeader::unused_index`] in every tag.
pub const UNUSED_INDEX: u8 = 255;

/// The decoded header of a tag.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct TagHeader {
    /// The group of the tag. Must be [`FONT_TAG_GROUP`] for a font tag.
    pub tag_group: u32,
    /// Checksum of every byte following the header.
    pub checksum: u32,
    /// Offset of the tag body, which is the size of the header.
    pub offset: u32,
    /// Not interpreted.
    pub size: u32,
    /// Version of the tag group definition.
    pub version: u16,
    /// Always [`UNUSED_INDEX`].
    pub unused_index: u8,
    /// Must be [`TAG_SIGNATURE`].
    pub signature: u32,
}

impl TagHeader {
    /// Returns the header written for a rebuilt font tag whose body has the given `checksum`.
    pub fn font(checksum: u32) -> Self {
        Self {
            tag_group: FONT_TAG_GROUP,
            checksum,
            offset: TAG_HEADER_OFFSET,
            size: 0,
            version: FONT_TAG_VERSION,
            unused_index: UNUSED_INDEX,
            signature: TAG_SIGNATURE,
        }
    }

    /// Decodes the [`TagHeader`] at the start of `bytes`.
    ///
    /// Returns `None` if `bytes` is smaller than [`TAG_HEADER_SIZE`].
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < TAG_HEADER_SIZE {
            return None;
        }

        let header = Self {
            tag_group: BigEndian::read_u32(bytes, offset_of!(raw::TagHeader, tag_group))?,
            checksum: BigEndian::read_u32(bytes, offset_of!(raw::TagHeader, checksum))?,
            offset: BigEndian::read_u32(bytes, offset_of!(raw::TagHeader, offset))?,
            size: BigEndian::read_u32(bytes, offset_of!(raw::TagHeader, size))?,
            version: BigEndian::read_u16(bytes, offset_of!(raw::TagHeader, version))?,
            unused_index: BigEndian::read_u8(bytes, offset_of!(raw::TagHeader, unused_index))?,
            signature: BigEndian::read_u32(bytes, offset_of!(raw::TagHeader, signature))?,
        };
        Some(header)
    }

    /// Returns `true` if the header identifies a font tag.
    ///
    /// A header is only rejected if both the signature and the tag group are wrong.
    pub fn is_font_tag(&self) -> bool {
        self.signature == TAG_SIGNATURE || self.tag_group == FONT_TAG_GROUP
    }

    /// Appends the encoded [`TagHeader`] to `out`.
    pub fn encode(&self, out: &mut Vec<u8>) {
        BigEndian::write_padding(out, offset_of!(raw::TagHeader, tag_group));
        BigEndian::write_u32(out, self.tag_group);
        BigEndian::write_u32(out, self.checksum);
        BigEndian::write_u32(out, self.offset);
        BigEndian::write_u32(out, self.size);
        BigEndian::write_padding(out, 4);
        BigEndian::write_u16(out, self.version);
        BigEndian::write_u8(out, self.unused_index);
        BigEndian::write_padding(out, 1);
        BigEndian::write_u32(out, self.signature);
    }
}
