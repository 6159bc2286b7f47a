//! The `font_tag` crate provides an interface for taking font tags apart into per-character files
//! and putting them back together.
//!
//! # Capabilities
//!
//! ## Works in `no_std` environments
//!
//! This crate only requires `alloc`, so the codec can be embedded in tooling that does not have
//! access to a filesystem. Reading and writing files is left to the caller.
//!
//! ## Endian Awareness
//!
//! Font tags are stored big-endian. Every structure is decoded into host-native values on read and
//! re-encoded on write, so no structure is ever reinterpreted in place.
//!
//! ## Layout Validation
//!
//! [`FontTag::parse()`] walks every variable-length region of a tag and rejects any buffer whose
//! size does not exactly match the size implied by its headers.
//!
//! ## Uses no unsafe code
//!
//! This crate contains zero unsafe blocks of code.
#![no_std]

extern crate alloc;

pub mod character;
pub mod checksum;
pub mod encoding;
pub mod font;
pub mod header;
pub mod join;
pub mod layout;
pub mod limits;
pub mod raw;
pub mod split;

#[cfg(test)]
mod testing;

pub use crate::{
    character::{CharacterFile, CharacterRecord},
    join::{FontTagBuilder, JoinError, JoinedFontTag},
    layout::{FontTag, LayoutError},
    limits::Limits,
    split::{Split, SplitError, SplitSummary},
};

/// Safely converts `value` to a `u64` relying on compile time code checking.
#[cfg(any(
    target_pointer_width = "16",
    target_pointer_width = "32",
    target_pointer_width = "64"
))]
const fn usize_to_u64(value: usize) -> u64 {
    value as u64
}

/// Safely converts `value` to a `usize` relying on compile time code checking.
#[cfg(any(target_pointer_width = "32", target_pointer_width = "64"))]
const fn u32_to_usize(value: u32) -> usize {
    value as usize
}
