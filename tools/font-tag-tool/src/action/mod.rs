//! Implementations of the [`Action`][action]s.
//!
//! [action]: crate::cli::Action

use std::{
    error, fmt, fs, io,
    path::{Path, PathBuf},
};

pub mod join;
pub mod split;

/// Creates the directory at `path` if it does not already exist.
///
/// # Errors
///
/// - [`DirectoryError::BadOutputDirectory`]: Returned if `path` exists and is not a directory.
/// - [`DirectoryError::CreateFailed`]: Returned if the directory could not be created.
pub fn prepare_output_directory(path: &Path) -> Result<(), DirectoryError> {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_dir() => return Ok(()),
        Ok(_) => return Err(DirectoryError::BadOutputDirectory(path.to_path_buf())),
        Err(error) if error.kind() == io::ErrorKind::NotFound => {}
        Err(error) => {
            return Err(DirectoryError::CreateFailed {
                path: path.to_path_buf(),
                error,
            });
        }
    }

    log::info!("creating output directory {}", path.display());
    fs::create_dir_all(path).map_err(|error| DirectoryError::CreateFailed {
        path: path.to_path_buf(),
        error,
    })
}

/// Various errors that can occur while preparing an output directory.
#[derive(Debug)]
pub enum DirectoryError {
    /// The path exists and is not a directory.
    BadOutputDirectory(PathBuf),
    /// The directory could not be inspected or created.
    CreateFailed {
        /// The path of the directory.
        path: PathBuf,
        /// The underlying error.
        error: io::Error,
    },
}

impl fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadOutputDirectory(path) => {
                write!(f, "{} exists and is not a directory", path.display())
            }
            Self::CreateFailed { path, .. } => {
                write!(f, "failed to create directory {}", path.display())
            }
        }
    }
}

impl error::Error for DirectoryError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::BadOutputDirectory(_) => None,
            Self::CreateFailed { error, .. } => Some(error),
        }
    }
}
