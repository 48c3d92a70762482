//! アダプター（外界の I/O を trait で抽象化した標準実装）
//!
//! usecase は ports::outbound の trait 経由でのみファイル・プロセス・環境変数に触れる。
//! ここには標準実装（Std*）とログ実装を置く。

pub mod file_json_log;
pub mod std_env_resolver;
pub mod std_fs;
pub mod std_process;

pub use crate::ports::outbound::{ChildProcess, FileSystem, LaunchSpec, Process};
pub use file_json_log::{FileJsonLog, NoopLog, StderrLog, TeeLog};
pub use std_env_resolver::StdEnvResolver;
pub use std_fs::StdFileSystem;
pub use std_process::StdProcess;
