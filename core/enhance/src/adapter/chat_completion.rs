//! LlmDriver を ChatCompletion ポートとして使うアダプタ

use crate::ports::outbound::ChatCompletion;
use common::error::Error;
use common::llm::{AnyProvider, LlmDriver, LlmProvider};
use common::msg::ChatTurn;
use common::ports::outbound::{Log, LogLevel, LogRecord};
use std::sync::Arc;

pub struct DriverChatCompletion {
    driver: LlmDriver<AnyProvider>,
    log: Arc<dyn Log>,
}

impl DriverChatCompletion {
    pub fn new(driver: LlmDriver<AnyProvider>, log: Arc<dyn Log>) -> Self {
        Self { driver, log }
    }
}

impl ChatCompletion for DriverChatCompletion {
    fn complete(&self, turns: &[ChatTurn]) -> Result<String, Error> {
        let provider = self.driver.provider();
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Debug, "adapter", "llm", "completion request")
                .field("provider", provider.name())
                .field("model", provider.model())
                .field("turns", turns.len()),
        );
        let result = self.driver.complete(turns);
        match &result {
            Ok(text) => {
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Debug, "adapter", "llm", "completion received")
                        .field("chars", text.chars().count()),
                );
            }
            Err(e) => {
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Warn, "adapter", "llm", e.to_string())
                        .field("provider", provider.name()),
                );
            }
        }
        result
    }
}
