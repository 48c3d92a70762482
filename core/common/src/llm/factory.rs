//! プロバイダファクトリー
//!
//! プロバイダタイプに基づいて適切なプロバイダを作成します。

use crate::error::Error;
use crate::llm::driver::LlmDriver;
use crate::llm::echo::EchoProvider;
use crate::llm::openai_compat::OpenAiCompatProvider;
use crate::llm::provider::LlmProvider;
use crate::msg::ChatTurn;
use serde_json::Value;

/// プロバイダタイプ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderType {
    /// OpenAI Chat Completions 互換 (/chat/completions)
    OpenAi,
    /// Echo（API を呼ばない）
    Echo,
}

impl ProviderType {
    /// 文字列からプロバイダタイプを解析
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "openai" | "gpt" | "openai_compat" => Some(Self::OpenAi),
            "echo" => Some(Self::Echo),
            _ => None,
        }
    }

    /// プロバイダタイプを文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Echo => "echo",
        }
    }
}

/// プロバイダ生成オプション
#[derive(Debug, Clone, Default)]
pub struct ProviderOptions {
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub api_key_env: Option<String>,
    pub temperature: Option<f32>,
}

/// プロバイダのenumラッパー
///
/// 異なるプロバイダタイプを型安全に扱うために使用します。
pub enum AnyProvider {
    OpenAi(OpenAiCompatProvider),
    Echo(EchoProvider),
}

impl LlmProvider for AnyProvider {
    fn name(&self) -> &str {
        match self {
            Self::OpenAi(p) => p.name(),
            Self::Echo(p) => p.name(),
        }
    }

    fn model(&self) -> &str {
        match self {
            Self::OpenAi(p) => p.model(),
            Self::Echo(p) => p.model(),
        }
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        match self {
            Self::OpenAi(p) => p.make_http_request(request_json),
            Self::Echo(p) => p.make_http_request(request_json),
        }
    }

    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error> {
        match self {
            Self::OpenAi(p) => p.parse_response_text(response_json),
            Self::Echo(p) => p.parse_response_text(response_json),
        }
    }

    fn make_request_payload(&self, turns: &[ChatTurn]) -> Result<Value, Error> {
        match self {
            Self::OpenAi(p) => p.make_request_payload(turns),
            Self::Echo(p) => p.make_request_payload(turns),
        }
    }
}

/// プロバイダを作成する
pub fn create_provider(
    provider_type: ProviderType,
    options: ProviderOptions,
) -> Result<AnyProvider, Error> {
    match provider_type {
        ProviderType::OpenAi => {
            let provider = OpenAiCompatProvider::new(
                options.model,
                options.base_url,
                options.api_key_env,
                options.temperature,
            )?;
            Ok(AnyProvider::OpenAi(provider))
        }
        ProviderType::Echo => Ok(AnyProvider::Echo(EchoProvider::new())),
    }
}

/// ドライバーを作成する
pub fn create_driver(
    provider_type: ProviderType,
    options: ProviderOptions,
) -> Result<LlmDriver<AnyProvider>, Error> {
    let provider = create_provider(provider_type, options)?;
    Ok(LlmDriver::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_type_from_str() {
        assert_eq!(ProviderType::from_str("OpenAI"), Some(ProviderType::OpenAi));
        assert_eq!(ProviderType::from_str("gpt"), Some(ProviderType::OpenAi));
        assert_eq!(ProviderType::from_str("echo"), Some(ProviderType::Echo));
        assert_eq!(ProviderType::from_str("gemini"), None);
        assert_eq!(ProviderType::Echo.as_str(), "echo");
    }

    #[test]
    fn test_create_driver_openai_with_model() {
        let options = ProviderOptions {
            model: Some("gpt-4o-mini".to_string()),
            ..Default::default()
        };
        let driver = create_driver(ProviderType::OpenAi, options).unwrap();
        assert_eq!(driver.provider().name(), "openai");
        assert_eq!(driver.provider().model(), "gpt-4o-mini");
    }

    #[test]
    fn test_create_driver_echo() {
        let driver = create_driver(ProviderType::Echo, ProviderOptions::default()).unwrap();
        assert_eq!(driver.provider().name(), "echo");
    }
}
