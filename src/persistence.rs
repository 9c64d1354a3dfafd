// File: src/persistence.rs
use crate::core::types::Lexicon;
use crate::errors::Result;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// On-disk encoding of a persisted lexicon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Bincode,
    Json,
}

impl Format {
    /// `.json` files are JSON, anything else is a bincode snapshot.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Bincode,
        }
    }
}

/// Where a pruning run with `threshold` stores its result. One file per threshold.
pub fn pruned_lexicon_path(output_dir: &Path, threshold: u64) -> PathBuf {
    output_dir.join(format!("pruned_lexicon_t{}.bin", threshold))
}

/// Writes through a temp file in the target directory and renames it into place,
/// so a failed write never leaves a truncated file at `path`.
fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<&NamedTempFile>) -> Result<()>,
{
    let parent_dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        write(&mut writer)?;
        writer.flush()?;
    }

    temp_file.persist(path)?;
    Ok(())
}

pub fn save_lexicon(lexicon: &Lexicon, path: &Path) -> Result<()> {
    save_as(lexicon, path, Format::from_path(path))
}

/// Serializes any value (lexicon, probability lexicon, summary) in the given format.
pub fn save_as<T: Serialize>(value: &T, path: &Path, format: Format) -> Result<()> {
    write_atomically(path, |writer| {
        match format {
            Format::Bincode => bincode::serialize_into(writer, value)?,
            Format::Json => serde_json::to_writer_pretty(writer, value)?,
        }
        Ok(())
    })?;
    tracing::info!("Stored {} ({:?})", path.display(), format);
    Ok(())
}

/// Loads a lexicon and checks that no word came back with an empty entry.
pub fn load_lexicon(path: &Path) -> Result<Lexicon> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let lexicon: Lexicon = match Format::from_path(path) {
        Format::Bincode => bincode::deserialize_from(reader)?,
        Format::Json => serde_json::from_reader(reader)?,
    };
    lexicon.validate()?;
    tracing::debug!("Loaded {} words from {}", lexicon.len(), path.display());
    Ok(lexicon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LexiconError;

    fn sample() -> Lexicon {
        let mut lexicon = Lexicon::new();
        lexicon.record("walk", "NP", 5);
        lexicon.record("walk", "S", 2);
        lexicon.record("loopt", "(NP → S)", 3);
        lexicon
    }

    #[test]
    fn test_bincode_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.bin");
        save_lexicon(&sample(), &path).unwrap();
        assert_eq!(load_lexicon(&path).unwrap(), sample());
    }

    #[test]
    fn test_json_round_trip_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("lexicon.json");
        save_lexicon(&sample(), &path).unwrap();
        assert_eq!(load_lexicon(&path).unwrap(), sample());
    }

    #[test]
    fn test_load_rejects_empty_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{"walk": {"NP": 1}, "ghost": {}}"#).unwrap();
        assert!(matches!(load_lexicon(&path), Err(LexiconError::InvalidInput(_))));
    }

    #[test]
    fn test_load_missing_file_is_io_failure() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_lexicon(&dir.path().join("missing.bin")).unwrap_err();
        assert!(err.is_io_failure());
    }

    #[test]
    fn test_pruned_path_encodes_threshold() {
        let a = pruned_lexicon_path(Path::new("out"), 4);
        let b = pruned_lexicon_path(Path::new("out"), 9);
        assert_ne!(a, b);
        assert_eq!(a, PathBuf::from("out/pruned_lexicon_t4.bin"));
    }
}
