//! std::fs による FileSystem 実装
//!
//! エラーメッセージには対象パスを含める。

use crate::error::Error;
use crate::ports::outbound::{EntryKind, FileSystem};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, Error> {
        std::fs::read_to_string(path).map_err(|e| {
            Error::io_msg(format!("Failed to read '{}': {}", path.display(), e))
        })
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), Error> {
        std::fs::write(path, contents).map_err(|e| {
            Error::io_msg(format!("Failed to write '{}': {}", path.display(), e))
        })
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), Error> {
        std::fs::create_dir_all(path).map_err(|e| {
            Error::io_msg(format!("Failed to create directory '{}': {}", path.display(), e))
        })
    }

    fn entry_kind(&self, path: &Path) -> Result<Option<EntryKind>, Error> {
        match std::fs::metadata(path) {
            Ok(m) if m.is_file() => Ok(Some(EntryKind::File)),
            Ok(m) if m.is_dir() => Ok(Some(EntryKind::Dir)),
            Ok(_) => Ok(Some(EntryKind::Other)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::io_msg(format!("Cannot stat '{}': {}", path.display(), e))),
        }
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>, Error> {
        let listing_error =
            |e: std::io::Error| Error::io_msg(format!("Cannot list '{}': {}", path.display(), e));
        std::fs::read_dir(path)
            .map_err(listing_error)?
            .map(|entry| entry.map(|e| e.path()).map_err(listing_error))
            .collect()
    }

    fn open_append(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>, Error> {
        let f = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                Error::io_msg(format!("Failed to open '{}' for append: {}", path.display(), e))
            })?;
        Ok(Box::new(f))
    }
}
