//! 改善対象のソースユニットと処理順
//!
//! main ユニット（ファイル名に main マーカーを含む）は常に最後に処理する。
//! 永続化層マーカーを含むファイルは対象外。

use common::error::Error;
use std::path::{Path, PathBuf};

/// 1 ファイル分のソース
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    pub path: PathBuf,
    pub text: String,
}

impl SourceUnit {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }
}

/// 列挙結果。読めなかった対象ファイルは理由付きで `skipped` に入る。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enumeration {
    pub units: Vec<SourceUnit>,
    pub skipped: Vec<(PathBuf, String)>,
}

/// 対象ファイルの選別ルール
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitRules {
    /// 拡張子（ドット無し、例: "py"）
    pub extension: String,
    pub main_marker: String,
    pub exclude_marker: String,
}

impl UnitRules {
    fn file_name(path: &Path) -> &str {
        path.file_name().and_then(|n| n.to_str()).unwrap_or("")
    }

    /// 拡張子が一致し、除外マーカーを含まないファイルか
    pub fn is_candidate(&self, path: &Path) -> bool {
        let ext_ok = path
            .extension()
            .and_then(|e| e.to_str())
            .map_or(false, |e| e == self.extension);
        let name = Self::file_name(path);
        ext_ok && (self.exclude_marker.is_empty() || !name.contains(&self.exclude_marker))
    }

    pub fn is_main(&self, path: &Path) -> bool {
        Self::file_name(path).contains(&self.main_marker)
    }
}

/// 処理順に並べる: main 以外をパス順、その後に main。空のファイルは除く。
///
/// main に一致するファイルが複数あればパス順で最初のものを main とし、残りは通常ユニットとして扱う。
/// main が 1 つも無ければ `Error::MissingMainUnit`。
pub fn arrange_units(
    root: &Path,
    mut units: Vec<SourceUnit>,
    rules: &UnitRules,
) -> Result<Vec<SourceUnit>, Error> {
    units.retain(|u| rules.is_candidate(&u.path));
    units.sort_by(|a, b| a.path.cmp(&b.path));

    let main_index = units
        .iter()
        .position(|u| rules.is_main(&u.path))
        .ok_or_else(|| Error::MissingMainUnit {
            root: root.to_path_buf(),
            marker: rules.main_marker.clone(),
        })?;
    let main = units.remove(main_index);
    units.push(main);
    units.retain(|u| !u.text.is_empty());
    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> UnitRules {
        UnitRules {
            extension: "py".to_string(),
            main_marker: "main".to_string(),
            exclude_marker: "database".to_string(),
        }
    }

    fn paths(units: &[SourceUnit]) -> Vec<&str> {
        units.iter().map(|u| u.path.to_str().unwrap()).collect()
    }

    #[test]
    fn test_main_is_last_regardless_of_input_order() {
        let units = vec![
            SourceUnit::new("app_main.py", "<text2>"),
            SourceUnit::new("helpers.py", "<text1>"),
        ];
        let ordered = arrange_units(Path::new("."), units, &rules()).unwrap();
        assert_eq!(paths(&ordered), vec!["helpers.py", "app_main.py"]);
    }

    #[test]
    fn test_excludes_persistence_and_other_extensions() {
        let units = vec![
            SourceUnit::new("app/database.py", "engine = 1"),
            SourceUnit::new("app/README.md", "# hi"),
            SourceUnit::new("app/models.py", "class A: pass"),
            SourceUnit::new("app/main.py", "app = 1"),
        ];
        let ordered = arrange_units(Path::new("app"), units, &rules()).unwrap();
        assert_eq!(paths(&ordered), vec!["app/models.py", "app/main.py"]);
    }

    #[test]
    fn test_empty_files_are_skipped() {
        let units = vec![
            SourceUnit::new("app/__init__.py", ""),
            SourceUnit::new("app/schemas.py", "x = 1"),
            SourceUnit::new("app/main.py", "app = 1"),
        ];
        let ordered = arrange_units(Path::new("app"), units, &rules()).unwrap();
        assert_eq!(paths(&ordered), vec!["app/schemas.py", "app/main.py"]);
    }

    #[test]
    fn test_missing_main_is_fatal() {
        let units = vec![SourceUnit::new("app/models.py", "x")];
        let err = arrange_units(Path::new("app"), units, &rules()).unwrap_err();
        assert!(matches!(err, Error::MissingMainUnit { ref marker, .. } if marker == "main"));
    }

    #[test]
    fn test_excluded_main_does_not_count() {
        let units = vec![
            SourceUnit::new("main_database.py", "x"),
            SourceUnit::new("models.py", "y"),
        ];
        assert!(arrange_units(Path::new("."), units, &rules()).is_err());
    }

    #[test]
    fn test_second_main_match_is_an_ordinary_unit() {
        let units = vec![
            SourceUnit::new("b_main.py", "b"),
            SourceUnit::new("a_main.py", "a"),
            SourceUnit::new("util.py", "u"),
        ];
        let ordered = arrange_units(Path::new("."), units, &rules()).unwrap();
        assert_eq!(paths(&ordered), vec!["b_main.py", "util.py", "a_main.py"]);
    }
}
