//! エラーハンドリング
//!
//! 全クレート共通のエラー型。各バリアントは sysexits に倣った終了コードを持つ。

use std::path::PathBuf;

/// 共通エラー型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// ファイル・標準入出力の失敗
    #[error("{0}")]
    Io(String),
    /// JSON のシリアライズ／パース失敗
    #[error("JSON error: {0}")]
    Json(String),
    /// リモート API の通信・サービスエラー（一時的な失敗として扱う）
    #[error("HTTP error: {0}")]
    Http(String),
    /// 引数不正
    #[error("{0}")]
    InvalidArgument(String),
    /// 設定ファイル・環境変数の不備
    #[error("Configuration error: {0}")]
    Config(String),
    /// その他のシステムエラー
    #[error("{0}")]
    System(String),
    /// リモート呼び出しがリトライ上限に達した
    #[error("Remote request failed after {attempts} attempt(s): {last}")]
    RetriesExhausted { attempts: usize, last: String },
    /// 処理順を決める main ユニットが見つからない
    #[error("No main unit matching '{marker}' found under '{}'", root.display())]
    MissingMainUnit { root: PathBuf, marker: String },
}

impl Error {
    pub fn io_msg(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    pub fn json(msg: impl Into<String>) -> Self {
        Self::Json(msg.into())
    }

    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// 環境変数の不備（Config として扱う）
    pub fn env(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn system(msg: impl Into<String>) -> Self {
        Self::System(msg.into())
    }

    /// プロセスの終了コード
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) => 64,
            Self::MissingMainUnit { .. } => 66,
            Self::Http(_) => 69,
            Self::System(_) => 70,
            Self::Io(_) | Self::Json(_) => 74,
            Self::RetriesExhausted { .. } => 75,
            Self::Config(_) => 78,
        }
    }

    /// 使い方の誤りか（main で Usage を表示する）
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// リトライで回復しうる一時的な失敗か
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}
