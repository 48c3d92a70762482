//! LLMドライバーの実装
//!
//! プロバイダに依存しない共通処理（ペイロード生成 → HTTP → テキスト抽出）を提供します。

use crate::error::Error;
use crate::llm::provider::LlmProvider;
use crate::msg::ChatTurn;

/// LLMドライバー
pub struct LlmDriver<P: LlmProvider> {
    provider: P,
}

impl<P: LlmProvider> LlmDriver<P> {
    /// 新しいドライバーを作成
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// ターン列を送信して assistant の応答テキストを取得
    ///
    /// # Returns
    /// * `Ok(String)` - LLMからの応答テキスト
    /// * `Err(Error)` - 通信失敗は `Error::Http`、応答にテキストが無い場合も `Error::Http`
    pub fn complete(&self, turns: &[ChatTurn]) -> Result<String, Error> {
        let payload = self.provider.make_request_payload(turns)?;

        let request_json = serde_json::to_string(&payload)
            .map_err(|e| Error::json(format!("Failed to serialize request: {}", e)))?;

        let response_json = self.provider.make_http_request(&request_json)?;

        // テキスト無しの応答はサービス側の不調として再送対象にする
        let text = self
            .provider
            .parse_response_text(&response_json)?
            .ok_or_else(|| Error::http("No text in response"))?;

        Ok(text)
    }

    /// プロバイダを取得
    pub fn provider(&self) -> &P {
        &self.provider
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    // モックプロバイダ
    struct MockProvider {
        reply: Option<&'static str>,
        http_fails: bool,
        last_request: Mutex<Option<String>>,
    }

    impl MockProvider {
        fn replying(reply: &'static str) -> Self {
            Self {
                reply: Some(reply),
                http_fails: false,
                last_request: Mutex::new(None),
            }
        }
    }

    impl LlmProvider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        fn model(&self) -> &str {
            "mock-model"
        }

        fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
            *self.last_request.lock().unwrap() = Some(request_json.to_string());
            if self.http_fails {
                return Err(Error::http("connection refused"));
            }
            Ok(json!({ "text": self.reply }).to_string())
        }

        fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error> {
            let v: Value = serde_json::from_str(response_json)?;
            Ok(v["text"].as_str().map(|s| s.to_string()))
        }

        fn make_request_payload(&self, turns: &[ChatTurn]) -> Result<Value, Error> {
            Ok(json!({ "count": turns.len() }))
        }
    }

    #[test]
    fn test_llm_driver_new() {
        let driver = LlmDriver::new(MockProvider::replying("x"));
        assert_eq!(driver.provider().name(), "mock");
    }

    #[test]
    fn test_llm_driver_complete() {
        let driver = LlmDriver::new(MockProvider::replying("Hello, world!"));
        let turns = vec![ChatTurn::user("Hi"), ChatTurn::assistant("Hello!"), ChatTurn::user("test")];
        assert_eq!(driver.complete(&turns).unwrap(), "Hello, world!");
        let sent = driver.provider().last_request.lock().unwrap().clone().unwrap();
        assert_eq!(sent, r#"{"count":3}"#);
    }

    #[test]
    fn test_llm_driver_http_error_is_transient() {
        let provider = MockProvider {
            reply: Some("x"),
            http_fails: true,
            last_request: Mutex::new(None),
        };
        let err = LlmDriver::new(provider).complete(&[ChatTurn::user("q")]).unwrap_err();
        assert!(err.is_transient());
    }

    #[test]
    fn test_llm_driver_no_text() {
        let provider = MockProvider {
            reply: None,
            http_fails: false,
            last_request: Mutex::new(None),
        };
        let err = LlmDriver::new(provider).complete(&[ChatTurn::user("q")]).unwrap_err();
        assert_eq!(err, Error::http("No text in response"));
    }
}
