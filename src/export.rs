//! Writing artifacts to disk.
//!
//! Nothing here runs implicitly: callers create the output directory with
//! [`ensure_output_dir`] before anything is written into it.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Error, Result};

/// Create `dir` and any missing parents. Succeeds if it already exists.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| Error::io(dir, source))?;
    debug!(dir = %dir.display(), "output directory ready");
    Ok(())
}

/// Write `text` to `path` verbatim as UTF-8, creating parent directories.
///
/// This is an identity export of the input, not a re-serialization of parsed
/// questions, so nothing the parser drops is lost here.
pub fn write_text(path: &Path, text: &str) -> Result<()> {
    write_bytes(path, text.as_bytes())?;
    info!(path = %path.display(), bytes = text.len(), "saved raw text");
    Ok(())
}

pub(crate) fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_output_dir(parent)?;
    }
    fs::write(path, bytes).map_err(|source| Error::io(path, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;
    use crate::sample::SAMPLE_TEXT;
    use tempfile::tempdir;

    #[test]
    fn text_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("questions.txt");
        let text = "@title ignored\n\n@question √2 ≈ ?\n@option 1.41\r\n  trailing  \n";

        write_text(&path, text).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), text);
    }

    #[test]
    fn reparse_after_export_is_identical() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sample.txt");

        write_text(&path, SAMPLE_TEXT).unwrap();
        let read_back = fs::read_to_string(&path).unwrap();
        assert_eq!(parse(&read_back), parse(SAMPLE_TEXT));
    }

    #[test]
    fn creates_missing_parents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("out.txt");

        write_text(&path, "@question Q").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn ensure_output_dir_is_idempotent() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("highscore_output");

        ensure_output_dir(&out).unwrap();
        ensure_output_dir(&out).unwrap();
        assert!(out.is_dir());
    }

    #[test]
    fn write_errors_propagate() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "not a directory").unwrap();

        let err = write_text(&blocker.join("out.txt"), "x").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn writing_to_a_directory_fails() {
        let dir = tempdir().unwrap();
        let err = write_text(dir.path(), "x").unwrap_err();
        match err {
            Error::Io { path, .. } => assert_eq!(path, dir.path()),
            other => panic!("unexpected error: {other}"),
        }
    }
}
