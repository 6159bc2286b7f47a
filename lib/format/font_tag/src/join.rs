//! Joining [`CharacterFile`]s back into a font tag.

use alloc::{string::String, vec::Vec};
use core::{error, fmt, mem::offset_of};

use crate::{
    character::{
        CHARACTER_FILE_EXTENSION, CHARACTER_RECORD_SIZE, CharacterFile, CharacterFileError,
        CharacterRecord,
    },
    checksum::tag_checksum,
    font::{FONT_BASE_SIZE, FontBase},
    header::{TAG_HEADER_SIZE, TagHeader},
    limits::Limits,
    raw, u32_to_usize,
};

/// Parses the character code out of a [`CharacterFile`] name of the form `<decimal code>.bin`.
///
/// # Errors
///
/// - [`JoinError::BadFileName`]: Returned if `name` is not of the form `<decimal code>.bin`.
/// - [`JoinError::CodeOutOfRange`]: Returned if the code does not fit in 16 bits.
pub fn character_code_from_file_name(name: &str) -> Result<u16, JoinError> {
    let digits = name
        .strip_suffix(CHARACTER_FILE_EXTENSION)
        .and_then(|stem| stem.strip_suffix('.'))
        .filter(|digits| !digits.is_empty() && digits.bytes().all(|byte| byte.is_ascii_digit()))
        .ok_or_else(|| JoinError::BadFileName(String::from(name)))?;

    // Only overflow can fail once every byte is known to be a digit.
    digits
        .parse::<u64>()
        .ok()
        .and_then(|code| u16::try_from(code).ok())
        .ok_or_else(|| JoinError::CodeOutOfRange(String::from(name)))
}

/// Parses every name in `names` with [`character_code_from_file_name()`] and sorts them by
/// ascending character code.
///
/// # Errors
///
/// - [`JoinError::BadFileName`]: Returned if any name is not of the form `<decimal code>.bin`.
/// - [`JoinError::CodeOutOfRange`]: Returned if any code does not fit in 16 bits.
/// - [`JoinError::NoCharacters`]: Returned if `names` is empty.
/// - [`JoinError::DuplicateCode`]: Returned if two names resolve to the same code.
/// - [`JoinError::TooManyCharacters`]: Returned if there are more names than
///   [`Limits::max_characters`].
pub fn sort_character_files<N: AsRef<str>>(
    names: impl IntoIterator<Item = N>,
    limits: &Limits,
) -> Result<Vec<(u16, N)>, JoinError> {
    let mut files = names
        .into_iter()
        .map(|name| Ok((character_code_from_file_name(name.as_ref())?, name)))
        .collect::<Result<Vec<_>, JoinError>>()?;

    if files.is_empty() {
        return Err(JoinError::NoCharacters);
    }

    files.sort_by_key(|(code, _)| *code);

    if let Some(pair) = files.windows(2).find(|pair| pair[0].0 == pair[1].0) {
        return Err(JoinError::DuplicateCode {
            code: pair[0].0,
            first: String::from(pair[0].1.as_ref()),
            second: String::from(pair[1].1.as_ref()),
        });
    }

    if files.len() > u32_to_usize(limits.max_characters) {
        return Err(JoinError::TooManyCharacters {
            count: files.len(),
            max: limits.max_characters,
        });
    }

    Ok(files)
}

/// Incrementally assembles a font tag from [`CharacterFile`]s pushed in ascending code order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontTagBuilder {
    /// Ceilings applied while assembling.
    limits: Limits,
    /// The records pushed so far, with their offsets into `pixels`.
    records: Vec<CharacterRecord>,
    /// The aggregated pixel region.
    pixels: Vec<u8>,
    /// The largest ascending extent seen so far, floored at 1.
    ascending_height: i32,
    /// The largest descending extent seen so far, floored at 1.
    descending_height: i32,
}

impl FontTagBuilder {
    /// Creates an empty [`FontTagBuilder`].
    pub fn new(limits: &Limits) -> Self {
        Self {
            limits: *limits,
            records: Vec::new(),
            pixels: Vec::new(),
            ascending_height: 1,
            descending_height: 1,
        }
    }

    /// Returns the number of characters pushed so far.
    pub fn character_count(&self) -> usize {
        self.records.len()
    }

    /// Appends the [`CharacterFile`] stored in `bytes` as the character `code`.
    ///
    /// If the code stored in the file differs from `code`, `code` wins.
    ///
    /// # Errors
    ///
    /// - [`JoinError::OutOfOrder`]: Returned if `code` is not larger than the previous code.
    /// - [`JoinError::TooManyCharacters`]: Returned if [`Limits::max_characters`] characters have
    ///   already been pushed.
    /// - [`JoinError::TruncatedCharacterFile`]: Returned if `bytes` cannot hold a record.
    /// - [`JoinError::PixelSizeMismatch`]: Returned if the pixel bytes do not match the bitmap
    ///   dimensions.
    /// - [`JoinError::PixelBudgetExceeded`]: Returned if the pixel region would grow past
    ///   [`Limits::max_pixel_bytes`].
    pub fn push(&mut self, code: u16, bytes: &[u8]) -> Result<(), JoinError> {
        if let Some(previous) = self
            .records
            .last()
            .map(|record| record.character)
            .filter(|&previous| previous >= code)
        {
            return Err(JoinError::OutOfOrder { code, previous });
        }

        if self.records.len() >= u32_to_usize(self.limits.max_characters) {
            return Err(JoinError::TooManyCharacters {
                count: self.records.len() + 1,
                max: self.limits.max_characters,
            });
        }

        let file = CharacterFile::parse(bytes).map_err(|error| match error {
            CharacterFileError::Truncated { size } => {
                JoinError::TruncatedCharacterFile { code, size }
            }
            CharacterFileError::PixelSizeMismatch { expected, actual } => {
                JoinError::PixelSizeMismatch {
                    code,
                    expected,
                    actual,
                }
            }
        })?;

        let mut record = file.record;
        if record.character != code {
            log::warn!(
                "character file for {code} contains character {}; using {code}",
                record.character
            );
            record.character = code;
        }

        let budget_exceeded = JoinError::PixelBudgetExceeded {
            code,
            required: self.pixels.len().saturating_add(file.pixels.len()),
            max: self.limits.max_pixel_bytes,
        };
        if self.pixels.len().saturating_add(file.pixels.len()) > self.limits.max_pixel_bytes {
            return Err(budget_exceeded);
        }
        record.pixels_offset = u32::try_from(self.pixels.len()).map_err(|_| budget_exceeded)?;

        if file.pixels.is_empty() {
            log::warn!("character {code} has no pixel data");
        }
        self.pixels.extend_from_slice(file.pixels);

        let (ascending, descending) = record.vertical_extents();
        self.ascending_height = self.ascending_height.max(ascending);
        self.descending_height = self.descending_height.max(descending);

        log::trace!(
            "character {code}: {}x{} at pixel offset {}",
            record.bitmap_width,
            record.bitmap_height,
            record.pixels_offset
        );
        self.records.push(record);
        Ok(())
    }

    /// Encodes the font tag.
    ///
    /// # Errors
    ///
    /// - [`JoinError::NoCharacters`]: Returned if no characters were pushed.
    /// - [`JoinError::PixelBudgetExceeded`]: Returned if the pixel region cannot be described by
    ///   the font tag.
    pub fn finish(self) -> Result<JoinedFontTag, JoinError> {
        let Some(last) = self.records.last() else {
            return Err(JoinError::NoCharacters);
        };

        let character_count =
            u32::try_from(self.records.len()).map_err(|_| JoinError::TooManyCharacters {
                count: self.records.len(),
                max: self.limits.max_characters,
            })?;
        let pixels_size =
            u32::try_from(self.pixels.len()).map_err(|_| JoinError::PixelBudgetExceeded {
                code: last.character,
                required: self.pixels.len(),
                max: self.limits.max_pixel_bytes,
            })?;

        if self.pixels.is_empty() {
            log::warn!("joined font tag has an empty pixel region and cannot be split again");
        }

        let ascending_height = clamp_height(self.ascending_height);
        let descending_height = clamp_height(self.descending_height);

        let mut buffer = Vec::with_capacity(
            TAG_HEADER_SIZE
                + FONT_BASE_SIZE
                + self.records.len() * CHARACTER_RECORD_SIZE
                + self.pixels.len(),
        );
        // The checksum is patched in once the body is complete.
        TagHeader::font(0).encode(&mut buffer);
        FontBase::rebuilt(
            ascending_height,
            descending_height,
            character_count,
            pixels_size,
        )
        .encode(&mut buffer);
        for record in &self.records {
            record.encode(&mut buffer);
        }
        buffer.extend_from_slice(&self.pixels);

        let checksum = tag_checksum(&buffer[TAG_HEADER_SIZE..]);
        let checksum_offset = offset_of!(raw::TagHeader, checksum);
        buffer[checksum_offset..checksum_offset + size_of::<u32>()]
            .copy_from_slice(&checksum.to_be_bytes());

        log::debug!(
            "joined {character_count} characters, {pixels_size} pixel bytes, ascending height \
            {ascending_height}, descending height {descending_height}, checksum {checksum:08X}"
        );

        Ok(JoinedFontTag {
            buffer,
            checksum,
            character_count,
            pixel_bytes: self.pixels.len(),
            ascending_height,
            descending_height,
        })
    }
}

/// Floors `height` at 1 and clamps it to the range of an `i16`.
fn clamp_height(height: i32) -> i16 {
    i16::try_from(height.max(1)).unwrap_or(i16::MAX)
}

/// An encoded font tag produced by [`FontTagBuilder::finish()`].
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct JoinedFontTag {
    /// The complete font tag.
    pub buffer: Vec<u8>,
    /// The checksum stored in the header.
    pub checksum: u32,
    /// The number of characters in the tag.
    pub character_count: u32,
    /// The size of the pixel region.
    pub pixel_bytes: usize,
    /// The ascending height stored in the tag.
    pub ascending_height: i16,
    /// The descending height stored in the tag.
    pub descending_height: i16,
}

/// Various errors that can occur while joining [`CharacterFile`]s into a font tag.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum JoinError {
    /// A file name is not of the form `<decimal code>.bin`.
    BadFileName(String),
    /// A file name holds a code that does not fit in 16 bits.
    CodeOutOfRange(String),
    /// Two file names resolve to the same character code.
    DuplicateCode {
        /// The character code.
        code: u16,
        /// The first file name.
        first: String,
        /// The second file name.
        second: String,
    },
    /// No character files were supplied.
    NoCharacters,
    /// More character files were supplied than allowed.
    TooManyCharacters {
        /// The number of characters supplied.
        count: usize,
        /// The maximum number of characters allowed.
        max: u32,
    },
    /// A character was pushed after a character with a larger or equal code.
    OutOfOrder {
        /// The character code that was pushed.
        code: u16,
        /// The previously pushed character code.
        previous: u16,
    },
    /// A character file is too small to hold a record.
    TruncatedCharacterFile {
        /// The character code.
        code: u16,
        /// The size of the file.
        size: usize,
    },
    /// The pixel bytes of a character file do not match its bitmap dimensions.
    PixelSizeMismatch {
        /// The character code.
        code: u16,
        /// The size implied by the bitmap dimensions.
        expected: usize,
        /// The number of pixel bytes present.
        actual: usize,
    },
    /// The aggregated pixel region would exceed [`Limits::max_pixel_bytes`].
    PixelBudgetExceeded {
        /// The character code whose pixels overflowed the region.
        code: u16,
        /// The size the region would need.
        required: usize,
        /// The maximum size of the region.
        max: usize,
    },
}

impl fmt::Display for JoinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadFileName(name) => write!(
                f,
                "bad file name {name:?}: expected <decimal code>.{CHARACTER_FILE_EXTENSION}"
            ),
            Self::CodeOutOfRange(name) => {
                write!(f, "character code of {name:?} is out of range (0-65535)")
            }
            Self::DuplicateCode {
                code,
                first,
                second,
            } => write!(f, "{first:?} and {second:?} both hold character {code}"),
            Self::NoCharacters => write!(f, "no character files to join"),
            Self::TooManyCharacters { count, max } => {
                write!(f, "{count} characters supplied (maximum {max})")
            }
            Self::OutOfOrder { code, previous } => write!(
                f,
                "character {code} supplied after character {previous}"
            ),
            Self::TruncatedCharacterFile { code, size } => write!(
                f,
                "character file for {code} is {size} bytes, smaller than a \
                {CHARACTER_RECORD_SIZE} byte character record"
            ),
            Self::PixelSizeMismatch {
                code,
                expected,
                actual,
            } => write!(
                f,
                "character file for {code} has {actual} pixel bytes but its bitmap requires \
                {expected}"
            ),
            Self::PixelBudgetExceeded {
                code,
                required,
                max,
            } => write!(
                f,
                "pixel data exceeds {max} bytes at character {code} ({required} bytes required)"
            ),
        }
    }
}

impl error::Error for JoinError {}
