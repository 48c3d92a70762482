//! 共通のドメイン型

use std::path::{Path, PathBuf};

/// ホームディレクトリのパス（設定・ログの置き場所）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeDir(PathBuf);

impl HomeDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// 設定ファイル（config/enhance.json）
    pub fn config_file(&self) -> PathBuf {
        self.0.join("config").join("enhance.json")
    }

    /// ログファイル（logs/enhance.jsonl）
    pub fn log_file(&self) -> PathBuf {
        self.0.join("logs").join("enhance.jsonl")
    }
}

impl AsRef<Path> for HomeDir {
    fn as_ref(&self) -> &Path {
        self.0.as_ref()
    }
}
