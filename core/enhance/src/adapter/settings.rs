//! 設定ファイル（enhance.json）の読み込み

use crate::domain::EnhanceSettings;
use common::error::Error;
use common::ports::outbound::{FileSystem, Log, LogLevel, LogRecord};
use std::path::Path;

/// 設定ファイルを読む。ファイルが無ければ既定値。
pub fn load_settings(
    fs: &dyn FileSystem,
    log: &dyn Log,
    path: &Path,
) -> Result<EnhanceSettings, Error> {
    if fs.entry_kind(path)?.is_none() {
        let _ = log.log(
            &LogRecord::new(LogLevel::Debug, "adapter", "config", "no config file; using defaults")
                .field("path", path.display().to_string()),
        );
        return Ok(EnhanceSettings::default());
    }
    let text = fs.read_to_string(path)?;
    let settings = EnhanceSettings::from_json(&text).map_err(|e| match e {
        Error::Config(msg) => Error::config(format!("{}: {}", path.display(), msg)),
        other => other,
    })?;
    let _ = log.log(
        &LogRecord::new(LogLevel::Debug, "adapter", "config", "config loaded")
            .field("path", path.display().to_string()),
    );
    Ok(settings)
}
