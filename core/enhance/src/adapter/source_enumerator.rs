//! FileSystem ポートで root 配下を再帰的に走査するソース列挙

use crate::domain::{arrange_units, Enumeration, SourceUnit, UnitRules};
use crate::ports::outbound::SourceEnumerator;
use common::error::Error;
use common::ports::outbound::{EntryKind, FileSystem, Log, LogLevel, LogRecord};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct FsSourceEnumerator {
    fs: Arc<dyn FileSystem>,
    log: Arc<dyn Log>,
    rules: UnitRules,
}

impl FsSourceEnumerator {
    pub fn new(fs: Arc<dyn FileSystem>, log: Arc<dyn Log>, rules: UnitRules) -> Self {
        Self { fs, log, rules }
    }

    fn collect(&self, dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), Error> {
        for entry in self.fs.read_dir(dir)? {
            match self.fs.entry_kind(&entry)? {
                Some(EntryKind::Dir) => self.collect(&entry, out)?,
                Some(EntryKind::File) if self.rules.is_candidate(&entry) => out.push(entry),
                _ => {}
            }
        }
        Ok(())
    }
}

impl SourceEnumerator for FsSourceEnumerator {
    fn enumerate(&self, root: &Path) -> Result<Enumeration, Error> {
        if !self.fs.is_dir(root) {
            return Err(Error::invalid_argument(format!(
                "Root '{}' is not a directory",
                root.display()
            )));
        }

        let mut paths = Vec::new();
        self.collect(root, &mut paths)?;
        let mut units = Vec::with_capacity(paths.len());
        let mut skipped = Vec::new();
        for path in paths {
            match self.fs.read_to_string(&path) {
                Ok(text) => units.push(SourceUnit::new(path, text)),
                Err(e) => {
                    let _ = self.log.log(
                        &LogRecord::new(LogLevel::Warn, "adapter", "enumerate", "unreadable source skipped")
                            .field("path", path.display().to_string())
                            .field("error", e.to_string()),
                    );
                    skipped.push((path, e.to_string()));
                }
            }
        }
        skipped.sort();
        let found = units.len();
        let units = arrange_units(root, units, &self.rules)?;
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Debug, "adapter", "enumerate", "source units arranged")
                .field("found", found)
                .field("kept", units.len())
                .field("skipped", skipped.len()),
        );
        Ok(Enumeration { units, skipped })
    }
}
