//! LLMプロバイダのトレイト定義

use crate::error::Error;
use crate::msg::ChatTurn;
use serde_json::Value;

/// LLMプロバイダのトレイト
///
/// 各プロバイダ（OpenAI 互換、Echo）はこのトレイトを実装する必要があります。
pub trait LlmProvider: Send + Sync {
    /// プロバイダ名を返す
    fn name(&self) -> &str;

    /// リクエストに載せるモデル識別子
    fn model(&self) -> &str;

    /// HTTPリクエストを実行してレスポンスを取得
    ///
    /// # Arguments
    /// * `request_json` - リクエストJSON文字列
    ///
    /// # Returns
    /// * `Ok(String)` - レスポンスJSON文字列
    /// * `Err(Error::Http)` - 通信失敗・非 2xx（一時的な失敗として扱われる）
    fn make_http_request(&self, request_json: &str) -> Result<String, Error>;

    /// レスポンスから assistant テキストを抽出
    ///
    /// # Returns
    /// * `Ok(Option<String>)` - 抽出したテキスト（存在しない場合はNone）
    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error>;

    /// ターン列（古い順、末尾が新しい user ターン）からリクエストペイロードを生成
    fn make_request_payload(&self, turns: &[ChatTurn]) -> Result<Value, Error>;
}
