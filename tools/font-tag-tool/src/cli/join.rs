//! Command line parsing and [`Action::Join`][aj] construction.
//!
//! [aj]: crate::cli::Action::Join

use std::path::PathBuf;

use clap::{Arg, ArgMatches, Command, value_parser};
use font_tag::Limits;

use crate::cli::limits::parse_limits;

/// Description of a directory of character files and where the joined font tag should be written.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct JoinConfig {
    /// The directory containing only `<code>.bin` files.
    pub input_dir: PathBuf,
    /// The location of the joined font tag.
    pub tag_path: PathBuf,
    /// Ceilings applied while joining.
    pub limits: Limits,
}

/// Parses the arguments required to produce a valid [`JoinConfig`].
pub fn parse_arguments(matches: &ArgMatches) -> JoinConfig {
    let input_dir = matches
        .get_one::<PathBuf>("input-dir")
        .cloned()
        .unwrap_or_else(|| unreachable!("`input-dir` is a required argument"));

    let tag_path = matches
        .get_one::<PathBuf>("tag-file")
        .cloned()
        .unwrap_or_else(|| unreachable!("`tag-file` is a required argument"));

    JoinConfig {
        input_dir,
        tag_path,
        limits: parse_limits(matches),
    }
}

/// Returns the command parser for an [`Action::Join`][aj].
///
/// [aj]: crate::cli::Action::Join
pub fn subcommand_parser() -> Command {
    let input_dir = Arg::new("input-dir")
        .help("The directory containing only `<code>.bin` files")
        .value_parser(value_parser!(PathBuf))
        .required(true);

    let tag_file = Arg::new("tag-file")
        .help("The font tag to write")
        .value_parser(value_parser!(PathBuf))
        .required(true);

    Command::new("join")
        .about("Joins a directory of character files into a font tag")
        .arg(input_dir)
        .arg(tag_file)
}
