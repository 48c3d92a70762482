//! Outbound ポート: アプリが外界（FS・プロセス・ログ・環境変数）を使うための trait

pub mod env_resolver;
pub mod fs;
pub mod log;
pub mod process;

pub use env_resolver::EnvResolver;
pub use fs::{EntryKind, FileSystem};
pub use log::{now_iso8601, Log, LogLevel, LogRecord};
pub use process::{ChildProcess, LaunchSpec, Process};
