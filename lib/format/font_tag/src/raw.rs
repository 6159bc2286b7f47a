//! Raw definitions of font tag structures.
//!
//! These definitions describe the on-disk layout only. Field offsets are taken with
//! [`core::mem::offset_of!`] and every value is decoded as big-endian, so the structures are never
//! read or written by reinterpreting bytes in place.
#![expect(missing_docs, reason = "no need to document raw definitions")]

#[repr(C)]
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct TagHeader {
    pub pad1: [u8; 36],
    pub tag_group: u32,
    pub checksum: u32,
    pub offset: u32,
    pub size: u32,
    pub pad2: [u8; 4],
    pub version: u16,
    pub unused_index: u8,
    pub pad3: u8,
    pub signature: u32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Reflexive {
    pub count: u32,
    pub address: u32,
    pub definition: u32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct TagData {
    pub size: u32,
    pub pad: [u8; 4],
    pub file_offset: u32,
    pub address: u32,
    pub definition: u32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct TagReference {
    pub tag_group: u32,
    pub name: u32,
    pub name_length: u32,
    pub index: u32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct FontBase {
    pub flags: u32,
    pub ascending_height: i16,
    pub descending_height: i16,
    pub leading_height: i16,
    pub leading_width: i16,
    pub pad: [u8; 36],
    pub character_tables: Reflexive,
    pub style_fonts: [TagReference; 4],
    pub characters: Reflexive,
    pub pixels: TagData,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct FontCharacter {
    pub character: u16,
    pub character_width: i16,
    pub bitmap_width: i16,
    pub bitmap_height: i16,
    pub bitmap_origin_x: i16,
    pub bitmap_origin_y: i16,
    pub hardware_character_index: u16,
    pub pad: [u8; 2],
    pub pixels_offset: u32,
}

const _: () = assert!(size_of::<TagHeader>() == 64);
const _: () = assert!(size_of::<Reflexive>() == 12);
const _: () = assert!(size_of::<TagData>() == 20);
const _: () = assert!(size_of::<TagReference>() == 16);
const _: () = assert!(size_of::<FontBase>() == 156);
const _: () = assert!(size_of::<FontCharacter>() == 20);
