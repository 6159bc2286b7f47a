//! Command line parsing and [`Action::Split`][as] construction.
//!
//! [as]: crate::cli::Action::Split

use std::path::PathBuf;

use clap::{Arg, ArgMatches, Command, value_parser};
use font_tag::Limits;

use crate::cli::limits::parse_limits;

/// Description of a font tag to split and where its characters should be written.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct SplitConfig {
    /// The font tag to split.
    pub tag_path: PathBuf,
    /// The directory into which one file per character is written.
    pub output_dir: PathBuf,
    /// Ceilings applied while splitting.
    pub limits: Limits,
}

/// Parses the arguments required to produce a valid [`SplitConfig`].
pub fn parse_arguments(matches: &ArgMatches) -> SplitConfig {
    let tag_path = matches
        .get_one::<PathBuf>("tag-file")
        .cloned()
        .unwrap_or_else(|| unreachable!("`tag-file` is a required argument"));

    let output_dir = matches
        .get_one::<PathBuf>("output-dir")
        .cloned()
        .unwrap_or_else(|| unreachable!("`output-dir` is a required argument"));

    SplitConfig {
        tag_path,
        output_dir,
        limits: parse_limits(matches),
    }
}

/// Returns the command parser for an [`Action::Split`][as].
///
/// [as]: crate::cli::Action::Split
pub fn subcommand_parser() -> Command {
    let tag_file = Arg::new("tag-file")
        .help("The font tag to split")
        .value_parser(value_parser!(PathBuf))
        .required(true);

    let output_dir = Arg::new("output-dir")
        .help("The directory to write `<code>.bin` files into; created if missing")
        .value_parser(value_parser!(PathBuf))
        .required(true);

    Command::new("split")
        .about("Splits a font tag into one file per character")
        .arg(tag_file)
        .arg(output_dir)
}
