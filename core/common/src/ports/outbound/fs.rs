//! ファイルシステム Outbound ポート
//!
//! usecase・adapter はこの trait 経由でのみファイルに触れる（テストではメモリ上の実装に差し替える）。

use crate::error::Error;
use std::path::{Path, PathBuf};

/// パスが指すものの種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    /// ソケット・デバイスなど。列挙では無視する。
    Other,
}

pub trait FileSystem: Send + Sync {
    fn read_to_string(&self, path: &Path) -> Result<String, Error>;
    /// 既存の内容を上書きする
    fn write(&self, path: &Path, contents: &str) -> Result<(), Error>;
    fn create_dir_all(&self, path: &Path) -> Result<(), Error>;
    /// 存在しなければ Ok(None)
    fn entry_kind(&self, path: &Path) -> Result<Option<EntryKind>, Error>;
    /// ディレクトリ直下のエントリのフルパス（順序は未定義）
    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>, Error>;
    /// 追記用に開く（無ければ作成）
    fn open_append(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>, Error>;

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.entry_kind(path), Ok(Some(EntryKind::Dir)))
    }

    fn is_file(&self, path: &Path) -> bool {
        matches!(self.entry_kind(path), Ok(Some(EntryKind::File)))
    }
}
