//! 子プロセス起動の Outbound ポート
//!
//! 起動・終了確認・診断出力の取得・強制終了だけを公開する。
//! 起動後の待機や判定は呼び出し側（usecase）が行う。

use crate::error::Error;
use std::path::PathBuf;

/// 起動するコマンドライン
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    pub program: String,
    pub args: Vec<String>,
    /// 親の環境に上書きする変数
    pub env: Vec<(String, String)>,
    pub current_dir: Option<PathBuf>,
}

impl LaunchSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
            current_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// ログ・表示用のコマンドライン文字列
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// 起動済みの子プロセス
pub trait ChildProcess: Send {
    /// 終了していれば終了コード（シグナル終了は -1）、実行中なら None
    fn try_wait(&mut self) -> Result<Option<i32>, Error>;

    /// 捕捉した stderr（と stdout）を返す。終了後に呼ぶ。
    fn take_diagnostics(&mut self) -> String;

    /// 強制終了して回収する。既に終了していれば何もしない。
    fn terminate(&mut self) -> Result<(), Error>;
}

/// 子プロセス起動の抽象
///
/// 実装は `common::adapter::StdProcess`（std::process::Command）など。
pub trait Process: Send + Sync {
    fn spawn(&self, spec: &LaunchSpec) -> Result<Box<dyn ChildProcess>, Error>;
}
