//! 構造化ログ Outbound ポート
//!
//! 各レイヤーが JSONL 1 行分のレコードを出す。人間向けの進行表示（stderr）とは別チャネル。

use crate::error::Error;
use serde::Serialize;
use serde_json::{Map, Value};

/// RFC3339 の現在時刻（UTC）
pub fn now_iso8601() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

/// JSONL の 1 行
///
/// `layer` は cli / wiring / usecase / adapter、`kind` は lifecycle / chat / round / verify / error など。
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub ts: String,
    pub level: LogLevel,
    pub layer: &'static str,
    pub kind: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub fields: Map<String, Value>,
}

impl LogRecord {
    pub fn new(
        level: LogLevel,
        layer: &'static str,
        kind: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            ts: now_iso8601(),
            level,
            layer,
            kind,
            message: message.into(),
            fields: Map::new(),
        }
    }

    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }
}

pub trait Log: Send + Sync {
    fn log(&self, record: &LogRecord) -> Result<(), Error>;
}
