//! Command line parsing and [`Action`] construction.

use std::{ffi::OsString, process};

use clap::{Arg, ArgAction, ArgMatches, Command, error::ErrorKind};

use crate::cli::{join::JoinConfig, split::SplitConfig};

pub mod join;
pub mod limits;
pub mod split;

/// The action to carry out.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum Action {
    /// Split a font tag into per-character files.
    Split(SplitConfig),
    /// Join per-character files into a font tag.
    Join(JoinConfig),
}

/// The parsed command line.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Arguments {
    /// The [`Action`] to carry out.
    pub action: Action,
    /// The number of times `--verbose` was given.
    pub verbosity: u8,
}

/// Parses `font-tag`'s arguments to construct [`Arguments`].
///
/// Prints the usage to standard output and exits with status 1 if the arguments are invalid.
pub fn get_arguments() -> Arguments {
    match parse_arguments_from(std::env::args_os()) {
        Ok(arguments) => arguments,
        Err(error) => match error.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => error.exit(),
            _ => {
                print!("{error}");
                process::exit(1);
            }
        },
    }
}

/// Parses `args`, including the binary name, to construct [`Arguments`].
fn parse_arguments_from<I, T>(args: I) -> Result<Arguments, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = command_parser().try_get_matches_from(args)?;

    let Some((subcommand_name, subcommand_matches)) = matches.subcommand() else {
        unreachable!("subcommand is required");
    };
    let action = match subcommand_name {
        "split" => Action::Split(split::parse_arguments(subcommand_matches)),
        "join" => Action::Join(join::parse_arguments(subcommand_matches)),
        _ => unreachable!("unexpected subcommand: {subcommand_name:?}"),
    };

    Ok(Arguments {
        action,
        verbosity: verbosity(subcommand_matches),
    })
}

/// Returns the number of times `--verbose` was given.
fn verbosity(matches: &ArgMatches) -> u8 {
    matches.get_count("verbose")
}

/// Returns the command parser for all [`Action`]s.
fn command_parser() -> Command {
    let verbose = Arg::new("verbose")
        .short('v')
        .long("verbose")
        .help("Log more detail; repeat for more")
        .action(ArgAction::Count)
        .global(true);

    Command::new("font-tag")
        .about("Splits font tags into per-character files and joins them back together")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(verbose)
        .args(limits::limit_args())
        .subcommand(split::subcommand_parser())
        .subcommand(join::subcommand_parser())
        .subcommand_required(true)
        .arg_required_else_help(true)
}
