//! Implementation of [`Action::Join`][aj].
//!
//! [aj]: crate::cli::Action::Join

use std::{fs, path::Path};

use anyhow::{Context, Result};
use font_tag::{FontTagBuilder, JoinError, JoinedFontTag, join::sort_character_files};

use crate::cli::join::JoinConfig;

/// Joins the character files in the directory described by `config` into a font tag.
///
/// Nothing is written unless every character file is valid.
///
/// # Errors
///
/// Returns an error if the directory cannot be listed, if any entry is not a valid character
/// file, if a limit is exceeded, or if the font tag cannot be written.
pub fn join_font_tag(config: &JoinConfig) -> Result<JoinedFontTag> {
    let names = list_file_names(&config.input_dir)?;
    let files = sort_character_files(names, &config.limits)
        .with_context(|| format!("failed to join {}", config.input_dir.display()))?;

    let mut builder = FontTagBuilder::new(&config.limits);
    for (code, name) in files {
        let path = config.input_dir.join(&name);
        let bytes =
            fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?;

        builder
            .push(code, &bytes)
            .with_context(|| format!("failed to join {}", path.display()))?;
    }

    let joined = builder
        .finish()
        .with_context(|| format!("failed to join {}", config.input_dir.display()))?;

    fs::write(&config.tag_path, &joined.buffer)
        .with_context(|| format!("failed to write {}", config.tag_path.display()))?;

    Ok(joined)
}

/// Returns the names of every entry in the directory at `path`.
fn list_file_names(path: &Path) -> Result<Vec<String>> {
    let entries =
        fs::read_dir(path).with_context(|| format!("failed to list {}", path.display()))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("failed to list {}", path.display()))?;
        let name = entry.file_name().into_string().map_err(|name| {
            JoinError::BadFileName(name.to_string_lossy().into_owned())
        })?;
        names.push(name);
    }

    Ok(names)
}

#[cfg(test)]
mod test {
    use std::{fs, path::Path};

    use font_tag::{CharacterFile, CharacterRecord, FontTag, JoinError, Limits};

    use super::join_font_tag;
    use crate::cli::join::JoinConfig;

    /// Writes a `width` by `height` character file for `code` into `dir`.
    fn write_character(dir: &Path, code: u16, width: i16, height: i16) {
        let record = CharacterRecord {
            character: code,
            character_width: width,
            bitmap_width: width,
            bitmap_height: height,
            bitmap_origin_y: height,
            ..CharacterRecord::default()
        };
        let pixels = vec![0x80; record.pixel_size()];
        let file = CharacterFile {
            record,
            pixels: &pixels,
        };
        fs::write(dir.join(file.file_name()), file.encode()).unwrap();
    }

    fn config(input_dir: &Path, tag_path: &Path) -> JoinConfig {
        JoinConfig {
            input_dir: input_dir.to_path_buf(),
            tag_path: tag_path.to_path_buf(),
            limits: Limits::default(),
        }
    }

    #[test]
    fn joins_in_code_order() {
        let temp = tempfile::tempdir().unwrap();
        let input_dir = temp.path().join("chars");
        fs::create_dir(&input_dir).unwrap();
        write_character(&input_dir, 66, 2, 2);
        write_character(&input_dir, 65, 1, 3);
        write_character(&input_dir, 90, 3, 1);
        let tag_path = temp.path().join("out.font");

        let joined = join_font_tag(&config(&input_dir, &tag_path)).unwrap();
        let written = fs::read(&tag_path).unwrap();
        assert_eq!(written, joined.buffer);

        let tag = FontTag::parse(&written, &Limits::default()).unwrap();
        let codes = tag
            .characters()
            .map(|record| record.character)
            .collect::<Vec<_>>();
        assert_eq!(codes, [65, 66, 90]);
    }

    #[test]
    fn stray_files_prevent_output() {
        let temp = tempfile::tempdir().unwrap();
        let input_dir = temp.path().join("chars");
        fs::create_dir(&input_dir).unwrap();
        write_character(&input_dir, 65, 1, 1);
        fs::write(input_dir.join("notes.txt"), b"glyph notes").unwrap();
        let tag_path = temp.path().join("out.font");

        let error = join_font_tag(&config(&input_dir, &tag_path)).unwrap_err();
        assert_eq!(
            error.downcast_ref::<JoinError>(),
            Some(&JoinError::BadFileName(String::from("notes.txt")))
        );
        assert!(!tag_path.exists());
    }

    #[test]
    fn invalid_characters_prevent_output() {
        let temp = tempfile::tempdir().unwrap();
        let input_dir = temp.path().join("chars");
        fs::create_dir(&input_dir).unwrap();
        write_character(&input_dir, 65, 1, 1);
        fs::write(input_dir.join("66.bin"), [0; 4]).unwrap();
        let tag_path = temp.path().join("out.font");

        let error = join_font_tag(&config(&input_dir, &tag_path)).unwrap_err();
        assert_eq!(
            error.downcast_ref::<JoinError>(),
            Some(&JoinError::TruncatedCharacterFile { code: 66, size: 4 })
        );
        assert!(!tag_path.exists());
    }
}
