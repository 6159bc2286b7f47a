//! Splitting a [`FontTag`] into [`CharacterFile`]s.

use alloc::collections::BTreeSet;
use core::{error, fmt};

use crate::{
    character::{CharacterFile, CharacterRecord},
    layout::FontTag,
    limits::Limits,
    u32_to_usize,
};

impl<'buffer> FontTag<'buffer> {
    /// Returns an [`Iterator`] that produces one [`CharacterFile`] per distinct character code, in
    /// stored order.
    ///
    /// The [`Iterator`] ends after yielding its first error.
    pub fn split(&self, limits: &Limits) -> Split<'buffer> {
        Split {
            tag: *self,
            limits: *limits,
            index: 0,
            seen: BTreeSet::new(),
            summary: SplitSummary::default(),
            finished: false,
        }
    }
}

/// An [`Iterator`] over the [`CharacterFile`]s of a [`FontTag`].
///
/// Only the first record of each character code is produced. Later records with the same code are
/// skipped with a warning.
#[derive(Clone, Debug)]
pub struct Split<'buffer> {
    /// The tag being split.
    tag: FontTag<'buffer>,
    /// Ceilings applied to each character.
    limits: Limits,
    /// The index of the next record to examine.
    index: u32,
    /// Character codes that have already been produced.
    seen: BTreeSet<u16>,
    /// Running totals.
    summary: SplitSummary,
    /// Whether the [`Iterator`] has been exhausted or has failed.
    finished: bool,
}

impl<'buffer> Split<'buffer> {
    /// Returns totals for the [`CharacterFile`]s produced so far.
    pub const fn summary(&self) -> SplitSummary {
        self.summary
    }

    /// Detaches the character described by `record` from the pixel region.
    fn detach(
        &mut self,
        index: u32,
        mut record: CharacterRecord,
    ) -> Result<CharacterFile<'buffer>, SplitError> {
        let size = record.pixel_size();
        if size > self.limits.max_character_bytes {
            return Err(SplitError::CharacterTooLarge {
                code: record.character,
                size,
                max: self.limits.max_character_bytes,
            });
        }

        let pixels = if size == 0 {
            log::warn!("character {} has no pixel data", record.character);
            self.summary.empty += 1;
            &[][..]
        } else {
            let region = self.tag.pixel_region();
            let offset = u32_to_usize(record.pixels_offset);
            offset
                .checked_add(size)
                .and_then(|end| region.get(offset..end))
                .ok_or(SplitError::PixelOutOfBounds {
                    index,
                    code: record.character,
                    offset: record.pixels_offset,
                    size,
                    region_size: region.len(),
                })?
        };

        record.pixels_offset = 0;
        Ok(CharacterFile { record, pixels })
    }
}

impl<'buffer> Iterator for Split<'buffer> {
    type Item = Result<CharacterFile<'buffer>, SplitError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        while let Some(record) = self.tag.character(self.index) {
            let index = self.index;
            self.index += 1;

            if !self.seen.insert(record.character) {
                log::warn!(
                    "skipping duplicate character {} at index {index}",
                    record.character
                );
                self.summary.duplicates += 1;
                continue;
            }

            let result = self.detach(index, record);
            match result {
                Ok(_) => self.summary.characters += 1,
                Err(_) => self.finished = true,
            }
            return Some(result);
        }

        self.finished = true;
        None
    }
}

/// Totals gathered while splitting a [`FontTag`].
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct SplitSummary {
    /// The number of [`CharacterFile`]s produced.
    pub characters: usize,
    /// The number of records skipped because their character code was already produced.
    pub duplicates: usize,
    /// The number of [`CharacterFile`]s produced without pixel data.
    pub empty: usize,
}

/// Various errors that can occur while splitting a [`FontTag`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum SplitError {
    /// The bitmap of a character lies outside of the pixel region.
    PixelOutOfBounds {
        /// The index of the record.
        index: u32,
        /// The character code.
        code: u16,
        /// The offset of the bitmap into the pixel region.
        offset: u32,
        /// The size of the bitmap.
        size: usize,
        /// The size of the pixel region.
        region_size: usize,
    },
    /// The bitmap of a character is larger than [`Limits::max_character_bytes`].
    CharacterTooLarge {
        /// The character code.
        code: u16,
        /// The size of the bitmap.
        size: usize,
        /// The maximum size of a bitmap.
        max: usize,
    },
}

impl fmt::Display for SplitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PixelOutOfBounds {
                index,
                code,
                offset,
                size,
                region_size,
            } => write!(
                f,
                "pixel data for character {code} (index {index}) is out of bounds: {size} bytes \
                at offset {offset} do not fit inside {region_size} bytes of pixel data"
            ),
            Self::CharacterTooLarge { code, size, max } => write!(
                f,
                "pixel data for character {code} is {size} bytes (maximum {max} bytes)"
            ),
        }
    }
}

impl error::Error for SplitError {}

#[cfg(test)]
mod test {
    use alloc::vec::Vec;

    use super::{SplitError, SplitSummary};
    use crate::{
        character::CharacterFile,
        layout::FontTag,
        limits::Limits,
        testing::{RawFontTag, record},
    };

    #[test]
    fn splits_in_stored_order() {
        let bytes = RawFontTag::packed(&[record(65, 2, 2), record(66, 1, 3)]).assemble();
        let tag = FontTag::parse(&bytes, &Limits::default()).unwrap();
        let files = tag
            .split(&Limits::default())
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].record.character, 65);
        assert_eq!(files[0].pixels, &[65; 4]);
        assert_eq!(files[1].record.character, 66);
        assert_eq!(files[1].pixels, &[66; 3]);
        assert!(files.iter().all(|file| file.record.pixels_offset == 0));

        let encoded = files[1].encode();
        assert_eq!(CharacterFile::parse(&encoded), Ok(files[1]));
    }

    #[test]
    fn keeps_first_duplicate() {
        let bytes =
            RawFontTag::packed(&[record(65, 1, 1), record(65, 2, 1), record(66, 1, 1)]).assemble();
        let tag = FontTag::parse(&bytes, &Limits::default()).unwrap();
        let mut split = tag.split(&Limits::default());
        let files = split.by_ref().collect::<Result<Vec<_>, _>>().unwrap();

        assert_eq!(
            files.iter().map(|file| file.record.character).collect::<Vec<_>>(),
            [65, 66]
        );
        assert_eq!(files[0].record.bitmap_width, 1);
        assert_eq!(
            split.summary(),
            SplitSummary {
                characters: 2,
                duplicates: 1,
                empty: 0
            }
        );
    }

    #[test]
    fn empty_bitmaps_are_kept() {
        let bytes = RawFontTag::packed(&[record(32, 0, 12), record(65, 1, 1)]).assemble();
        let tag = FontTag::parse(&bytes, &Limits::default()).unwrap();
        let mut split = tag.split(&Limits::default());
        let files = split.by_ref().collect::<Result<Vec<_>, _>>().unwrap();

        assert_eq!(files[0].record.character, 32);
        assert!(files[0].pixels.is_empty());
        assert_eq!(split.summary().empty, 1);
    }

    #[test]
    fn out_of_bounds_pixels_end_the_split() {
        let mut raw = RawFontTag::packed(&[record(65, 1, 1), record(66, 2, 2), record(67, 1, 1)]);
        raw.records[1].pixels_offset = 3;
        let bytes = raw.assemble();
        let tag = FontTag::parse(&bytes, &Limits::default()).unwrap();
        let mut split = tag.split(&Limits::default());

        assert!(split.next().unwrap().is_ok());
        assert_eq!(
            split.next(),
            Some(Err(SplitError::PixelOutOfBounds {
                index: 1,
                code: 66,
                offset: 3,
                size: 4,
                region_size: 6
            }))
        );
        assert_eq!(split.next(), None);
        assert_eq!(split.summary().characters, 1);
    }

    #[test]
    fn oversized_characters_fail() {
        let bytes = RawFontTag::packed(&[record(65, 4, 4)]).assemble();
        let limits = Limits {
            max_character_bytes: 15,
            ..Limits::default()
        };
        let tag = FontTag::parse(&bytes, &limits).unwrap();

        assert_eq!(
            tag.split(&limits).next(),
            Some(Err(SplitError::CharacterTooLarge {
                code: 65,
                size: 16,
                max: 15
            }))
        );
    }
}
