//! ソースユニット列挙の Outbound ポート

use crate::domain::Enumeration;
use common::error::Error;
use std::path::Path;

/// root 配下のソースユニットを処理順（main が最後）で返す
///
/// 読めないファイルは失敗にせず `Enumeration::skipped` に回す。
/// main ユニットが無い場合は `Error::MissingMainUnit`。
pub trait SourceEnumerator: Send + Sync {
    fn enumerate(&self, root: &Path) -> Result<Enumeration, Error>;
}
