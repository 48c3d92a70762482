//! 環境変数解決 Outbound ポート
//!
//! ホームディレクトリ・設定ファイルパス・任意の環境変数を解決する。
//! usecase はこの trait 経由でのみ環境変数にアクセスする。

use crate::domain::HomeDir;
use crate::error::Error;
use std::path::PathBuf;

/// 環境変数解決抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdEnvResolver` やテスト用のモックなど。
pub trait EnvResolver: Send + Sync {
    /// ホームディレクトリを環境変数から解決する
    ///
    /// 優先順位:
    /// 1. ENHANCE_HOME（設定されていれば）
    /// 2. $XDG_CONFIG_HOME/enhance（XDG_CONFIG_HOME が設定されていれば）
    /// 3. $HOME/.config/enhance
    fn resolve_home_dir(&self) -> Result<HomeDir, Error>;

    /// 設定ファイルのパス（$home/config/enhance.json）
    fn resolve_config_path(&self) -> Result<PathBuf, Error> {
        Ok(self.resolve_home_dir()?.config_file())
    }

    /// ログファイルのパス（$home/logs/enhance.jsonl）
    fn resolve_log_path(&self) -> Result<PathBuf, Error> {
        Ok(self.resolve_home_dir()?.log_file())
    }

    /// 任意の環境変数（未設定・空は None）
    fn var(&self, name: &str) -> Option<String>;
}
