//! enhance コマンドの enum（Command Pattern）
//!
//! 改善ループ・雛形生成・ヘルプの分岐を enum で明示する。

use std::path::PathBuf;

/// enhance の実行モード
#[derive(Debug, Clone, PartialEq)]
pub enum EnhanceCommand {
    /// ヘルプ表示
    Help,
    /// JSON マニフェストからプロジェクト構成を書き出す
    Scaffold { manifest: PathBuf, into: PathBuf },
    /// root 配下のソースを 1 ファイルずつ改善する（指示が無ければ対話で尋ねる）
    Enhance {
        root: PathBuf,
        instructions: Option<String>,
    },
}
