//! 実行設定（enhance.json）
//!
//! すべてのキーは省略可能。省略時は既定値を使う。

use crate::domain::attempts::{DEFAULT_CONFIRM_CEILING, DEFAULT_DIAGNOSE_CEILING};
use crate::domain::source_unit::UnitRules;
use common::error::Error;
use common::history::DEFAULT_HISTORY_CAPACITY;
use common::llm::openai_compat::DEFAULT_API_KEY_ENV;
use common::ports::outbound::LaunchSpec;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

/// 引数・環境変数の値に含めるとルートディレクトリに置換される
pub const ROOT_PLACEHOLDER: &str = "{root}";

/// 起動確認の設定
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LaunchSettings {
    pub program: String,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
    /// ルートディレクトリを先頭に追加する PATH 形式の環境変数名
    pub prepend_root_to: Option<String>,
    /// 起動後にクラッシュを待つ猶予（ミリ秒）
    pub grace_ms: u64,
}

impl Default for LaunchSettings {
    fn default() -> Self {
        Self {
            program: "uvicorn".to_string(),
            args: [
                "main:app",
                "--host",
                "0.0.0.0",
                "--port",
                "8000",
                "--app-dir",
                ROOT_PLACEHOLDER,
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            env: BTreeMap::new(),
            prepend_root_to: Some("PYTHONPATH".to_string()),
            grace_ms: 1000,
        }
    }
}

impl LaunchSettings {
    /// ルートを埋め込んだ LaunchSpec を作る
    ///
    /// `current` は prepend_root_to で指定した環境変数の現在値。
    pub fn to_spec(&self, root: &Path, current: Option<String>) -> LaunchSpec {
        let root_str = root.display().to_string();
        let fill = |s: &str| s.replace(ROOT_PLACEHOLDER, &root_str);

        let mut spec = LaunchSpec::new(fill(&self.program));
        for a in &self.args {
            spec = spec.arg(fill(a));
        }
        for (k, v) in &self.env {
            spec = spec.env(k.clone(), fill(v));
        }
        if let Some(var) = &self.prepend_root_to {
            let sep = if cfg!(windows) { ";" } else { ":" };
            let value = match current {
                Some(c) => format!("{}{}{}", root_str, sep, c),
                None => root_str.clone(),
            };
            spec = spec.env(var.clone(), value);
        }
        spec
    }

    pub fn grace(&self) -> Duration {
        Duration::from_millis(self.grace_ms)
    }
}

/// enhance.json のルート
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnhanceSettings {
    /// openai | echo
    pub provider: String,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub api_key_env: Option<String>,
    pub temperature: Option<f32>,
    pub history_capacity: usize,
    pub max_retries: usize,
    pub retry_delay_ms: u64,
    pub confirm_ceiling: usize,
    pub diagnose_ceiling: usize,
    pub source_extension: String,
    pub main_marker: String,
    pub exclude_marker: String,
    pub launch: LaunchSettings,
}

impl Default for EnhanceSettings {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: None,
            base_url: None,
            api_key_env: Some(DEFAULT_API_KEY_ENV.to_string()),
            temperature: None,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            max_retries: 3,
            retry_delay_ms: 1000,
            confirm_ceiling: DEFAULT_CONFIRM_CEILING,
            diagnose_ceiling: DEFAULT_DIAGNOSE_CEILING,
            source_extension: "py".to_string(),
            main_marker: "main".to_string(),
            exclude_marker: "database".to_string(),
            launch: LaunchSettings::default(),
        }
    }
}

impl EnhanceSettings {
    /// JSON 文字列から読み込んで検証する
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let settings: Self = serde_json::from_str(json)
            .map_err(|e| Error::config(format!("Invalid settings: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.max_retries == 0 {
            return Err(Error::config("max_retries must be at least 1"));
        }
        if self.confirm_ceiling == 0 || self.diagnose_ceiling == 0 {
            return Err(Error::config("round ceilings must be at least 1"));
        }
        if self.main_marker.trim().is_empty() {
            return Err(Error::config("main_marker must not be empty"));
        }
        if self.launch.program.trim().is_empty() {
            return Err(Error::config("launch.program must not be empty"));
        }
        let ext = self.source_extension.trim_start_matches('.');
        if ext.is_empty() {
            return Err(Error::config("source_extension must not be empty"));
        }
        Ok(())
    }

    pub fn unit_rules(&self) -> UnitRules {
        UnitRules {
            extension: self.source_extension.trim_start_matches('.').to_string(),
            main_marker: self.main_marker.clone(),
            exclude_marker: self.exclude_marker.clone(),
        }
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}
