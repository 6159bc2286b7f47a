//! Tool for splitting font tags into per-character files and joining per-character files back
//! into font tags.

use std::process::ExitCode;

use anyhow::Result;
use log::LevelFilter;

use crate::{
    action::{join::join_font_tag, split::split_font_tag},
    cli::Action,
};

pub mod action;
pub mod cli;

fn main() -> ExitCode {
    let arguments = cli::get_arguments();
    init_logging(arguments.verbosity);

    match run(arguments.action) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

/// Carries out `action`.
fn run(action: Action) -> Result<()> {
    match action {
        Action::Split(config) => {
            let summary = split_font_tag(&config)?;
            log::info!(
                "split {} characters into \"{}\" ({} duplicates skipped, {} without pixel data)",
                summary.characters,
                config.output_dir.display(),
                summary.duplicates,
                summary.empty
            );
        }
        Action::Join(config) => {
            let joined = join_font_tag(&config)?;
            log::info!(
                "joined {} characters ({} pixel bytes) into \"{}\" with checksum {:08X}",
                joined.character_count,
                joined.pixel_bytes,
                config.tag_path.display(),
                joined.checksum
            );
        }
    }

    Ok(())
}

/// Initializes [`env_logger`], honoring `RUST_LOG` and otherwise logging warnings plus one more
/// level of detail per `--verbose`.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .init();
}
