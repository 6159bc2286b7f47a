//! Implementation of [`Action::Split`][as].
//!
//! [as]: crate::cli::Action::Split

use std::fs;

use anyhow::{Context, Result};
use font_tag::{FontTag, SplitSummary};

use crate::{action::prepare_output_directory, cli::split::SplitConfig};

/// Splits the font tag described by `config` into one file per character.
///
/// The tag is fully validated before the output directory is touched. Files written before a
/// character fails are left in place.
///
/// # Errors
///
/// Returns an error if the tag cannot be read or is not a valid font tag, if the output directory
/// cannot be prepared, if a character cannot be detached, or if a character file cannot be
/// written.
pub fn split_font_tag(config: &SplitConfig) -> Result<SplitSummary> {
    let buffer = fs::read(&config.tag_path)
        .with_context(|| format!("failed to read {}", config.tag_path.display()))?;

    let tag = FontTag::parse(&buffer, &config.limits)
        .with_context(|| format!("failed to parse {}", config.tag_path.display()))?;

    prepare_output_directory(&config.output_dir)?;

    let mut split = tag.split(&config.limits);
    for file in split.by_ref() {
        let file =
            file.with_context(|| format!("failed to split {}", config.tag_path.display()))?;

        let path = config.output_dir.join(file.file_name());
        fs::write(&path, file.encode())
            .with_context(|| format!("failed to write {}", path.display()))?;
        log::trace!("wrote {}", path.display());
    }

    Ok(split.summary())
}

#[cfg(test)]
mod test {
    use std::{fs, path::Path};

    use font_tag::{CharacterFile, CharacterRecord, FontTagBuilder, LayoutError, Limits};

    use super::split_font_tag;
    use crate::cli::split::SplitConfig;

    /// Writes a font tag holding a 2 by 2 bitmap for each of `codes` to `path`.
    fn write_tag(path: &Path, codes: &[u16]) -> Vec<u8> {
        let mut builder = FontTagBuilder::new(&Limits::default());
        for &code in codes {
            let record = CharacterRecord {
                character: code,
                bitmap_width: 2,
                bitmap_height: 2,
                bitmap_origin_y: 2,
                ..CharacterRecord::default()
            };
            let pixels = [code.to_le_bytes()[0]; 4];
            let file = CharacterFile {
                record,
                pixels: &pixels,
            };
            builder.push(code, &file.encode()).unwrap();
        }

        let buffer = builder.finish().unwrap().buffer;
        fs::write(path, &buffer).unwrap();
        buffer
    }

    fn config(tag_path: &Path, output_dir: &Path) -> SplitConfig {
        SplitConfig {
            tag_path: tag_path.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            limits: Limits::default(),
        }
    }

    #[test]
    fn writes_one_file_per_character() {
        let temp = tempfile::tempdir().unwrap();
        let tag_path = temp.path().join("in.font");
        write_tag(&tag_path, &[65, 66]);
        let output_dir = temp.path().join("chars");

        let summary = split_font_tag(&config(&tag_path, &output_dir)).unwrap();
        assert_eq!(summary.characters, 2);

        let file = fs::read(output_dir.join("66.bin")).unwrap();
        let parsed = CharacterFile::parse(&file).unwrap();
        assert_eq!(parsed.record.character, 66);
        assert_eq!(parsed.record.pixels_offset, 0);
        assert_eq!(parsed.pixels, &[66; 4]);
        assert!(output_dir.join("65.bin").is_file());
    }

    #[test]
    fn corrupt_tags_write_nothing() {
        let temp = tempfile::tempdir().unwrap();
        let tag_path = temp.path().join("in.font");
        let mut buffer = write_tag(&tag_path, &[65]);
        buffer.push(0);
        fs::write(&tag_path, &buffer).unwrap();
        let output_dir = temp.path().join("chars");

        let error = split_font_tag(&config(&tag_path, &output_dir)).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<LayoutError>(),
            Some(LayoutError::CorruptLayout { .. })
        ));
        assert!(!output_dir.exists());
    }

    #[test]
    fn rejects_file_as_output_directory() {
        let temp = tempfile::tempdir().unwrap();
        let tag_path = temp.path().join("in.font");
        write_tag(&tag_path, &[65]);

        assert!(split_font_tag(&config(&tag_path, &tag_path)).is_err());
    }
}
