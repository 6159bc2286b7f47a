//! Byte-level assembly of font tags for tests.

use alloc::vec::Vec;

use crate::{
    character::CharacterRecord,
    font::{FontBase, Reflexive},
    header::TagHeader,
};

/// Returns a [`CharacterRecord`] for `code` with a `width` by `height` bitmap sitting on the
/// baseline.
pub fn record(code: u16, width: i16, height: i16) -> CharacterRecord {
    CharacterRecord {
        character: code,
        character_width: width,
        bitmap_width: width,
        bitmap_height: height,
        bitmap_origin_x: 0,
        bitmap_origin_y: height,
        hardware_character_index: 0,
        pixels_offset: 0,
    }
}

/// The parts of a font tag, assembled in order without any validation.
pub struct RawFontTag {
    pub header: TagHeader,
    pub font: FontBase,
    /// The count of each character table entry.
    pub tables: Vec<u32>,
    pub records: Vec<CharacterRecord>,
    pub pixels: Vec<u8>,
}

impl RawFontTag {
    pub fn new(records: &[CharacterRecord], pixels: &[u8]) -> Self {
        Self {
            header: TagHeader::font(0),
            font: FontBase::rebuilt(1, 1, 0, 0),
            tables: Vec::new(),
            records: records.to_vec(),
            pixels: pixels.to_vec(),
        }
    }

    /// Lays out the bitmaps of `records` back to back, filling each with the low byte of its
    /// character code.
    pub fn packed(records: &[CharacterRecord]) -> Self {
        let mut pixels = Vec::new();
        let records = records
            .iter()
            .map(|record| {
                let mut record = *record;
                record.pixels_offset = u32::try_from(pixels.len()).unwrap();
                pixels.resize(pixels.len() + record.pixel_size(), record.character.to_le_bytes()[0]);
                record
            })
            .collect::<Vec<_>>();

        Self::new(&records, &pixels)
    }

    /// Updates the counts in the [`FontBase`] to match the contents and assembles the tag.
    pub fn assemble(&mut self) -> Vec<u8> {
        self.font.character_tables.count = u32::try_from(self.tables.len()).unwrap();
        self.font.characters.count = u32::try_from(self.records.len()).unwrap();
        self.font.pixels.size = u32::try_from(self.pixels.len()).unwrap();
        self.assemble_untouched()
    }

    /// Assembles the tag exactly as described.
    pub fn assemble_untouched(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.header.encode(&mut out);
        self.font.encode(&mut out);

        for &count in &self.tables {
            Reflexive { count }.encode(&mut out);
        }
        for &count in &self.tables {
            out.resize(out.len() + usize::try_from(count).unwrap() * 2, 0xCC);
        }

        for style_font in &self.font.style_fonts {
            if style_font.name_length != 0 {
                let name_length = usize::try_from(style_font.name_length).unwrap();
                out.resize(out.len() + name_length, b'n');
                out.push(0);
            }
        }

        for record in &self.records {
            record.encode(&mut out);
        }
        out.extend_from_slice(&self.pixels);
        out
    }
}
