//! 単発 LLM 完了の Outbound ポート
//!
//! ターン列（履歴 + 新しい user ターン）を送り、assistant の応答全文を受け取る。

use common::error::Error;
use common::msg::ChatTurn;

/// リモートの補完機能
///
/// 通信・サービスの一時的な失敗は `Error::Http` で返す（ChatSession が再送する）。
pub trait ChatCompletion: Send + Sync {
    fn complete(&self, turns: &[ChatTurn]) -> Result<String, Error>;
}
