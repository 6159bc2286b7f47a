//! Command line parsing of [`Limits`] shared by every [`Action`][a].
//!
//! [a]: crate::cli::Action

use clap::{Arg, ArgMatches, value_parser};
use font_tag::Limits;

/// Returns the global arguments that configure [`Limits`].
pub fn limit_args() -> [Arg; 3] {
    let max_characters = Arg::new("max-characters")
        .long("max-characters")
        .env("FONT_TAG_MAX_CHARACTERS")
        .help("Maximum number of characters in a font tag")
        .value_parser(value_parser!(u32).range(1..))
        .default_value("65535")
        .global(true);

    let max_pixel_bytes = Arg::new("max-pixel-bytes")
        .long("max-pixel-bytes")
        .env("FONT_TAG_MAX_PIXEL_BYTES")
        .help("Maximum size of the pixel data of a joined font tag")
        .value_parser(value_parser!(u64).range(1..))
        .default_value("33554432")
        .global(true);

    let max_character_bytes = Arg::new("max-character-bytes")
        .long("max-character-bytes")
        .env("FONT_TAG_MAX_CHARACTER_BYTES")
        .help("Maximum size of the pixel data of a single split character")
        .value_parser(value_parser!(u64).range(1..))
        .default_value("4194304")
        .global(true);

    [max_characters, max_pixel_bytes, max_character_bytes]
}

/// Parses the arguments produced by [`limit_args()`] into [`Limits`].
pub fn parse_limits(matches: &ArgMatches) -> Limits {
    let max_characters = matches
        .get_one::<u32>("max-characters")
        .copied()
        .unwrap_or_else(|| unreachable!("`max-characters` should have a default value"));

    let byte_limit = |name: &str| {
        let value = matches
            .get_one::<u64>(name)
            .copied()
            .unwrap_or_else(|| unreachable!("`{name}` should have a default value"));

        // Limits beyond the address space cannot be reached anyway.
        usize::try_from(value).unwrap_or(usize::MAX)
    };

    Limits {
        max_characters,
        max_pixel_bytes: byte_limit("max-pixel-bytes"),
        max_character_bytes: byte_limit("max-character-bytes"),
    }
}
