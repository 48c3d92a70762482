//! Echoプロバイダの実装
//!
//! このプロバイダは実際にLLM APIを呼び出さず、固定の応答を返すだけです。
//! API キー無しでの動作確認やテスト用に使用します。

use crate::error::Error;
use crate::llm::provider::LlmProvider;
use crate::msg::ChatTurn;
use serde_json::{json, Value};

pub const ECHO_REPLY: &str = "[Echo Provider] Request received (no actual LLM call made)";

/// Echoプロバイダ
#[derive(Debug, Default)]
pub struct EchoProvider;

impl EchoProvider {
    /// 新しいEchoプロバイダを作成
    pub fn new() -> Self {
        Self
    }
}

impl LlmProvider for EchoProvider {
    fn name(&self) -> &str {
        "echo"
    }

    fn model(&self) -> &str {
        "echo"
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        // 実際の API 呼び出しは行わない
        let request: Value = serde_json::from_str(request_json)?;
        Ok(json!({ "echo": ECHO_REPLY, "turns": request["turns"] }).to_string())
    }

    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error> {
        let v: Value = serde_json::from_str(response_json)?;
        Ok(v["echo"].as_str().map(|s| s.to_string()))
    }

    fn make_request_payload(&self, turns: &[ChatTurn]) -> Result<Value, Error> {
        Ok(json!({ "turns": turns.len() }))
    }
}
