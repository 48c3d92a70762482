//! JSON マニフェストからプロジェクト構成を書き出す
//!
//! オブジェクトはディレクトリ、文字列はファイル本文。
//! 本文は共通の先頭インデントと前後の空行を取り除いてから書く。

use common::error::Error;
use common::ports::outbound::{FileSystem, Log, LogLevel, LogRecord};
use serde_json::Value;
use std::path::{Component, Path};
use std::sync::Arc;

pub struct ScaffoldUseCase {
    fs: Arc<dyn FileSystem>,
    log: Arc<dyn Log>,
}

impl ScaffoldUseCase {
    pub fn new(fs: Arc<dyn FileSystem>, log: Arc<dyn Log>) -> Self {
        Self { fs, log }
    }

    /// マニフェストを読み込み、into 配下に書き出したファイル数を返す
    pub fn run(&self, manifest: &Path, into: &Path) -> Result<usize, Error> {
        let text = self.fs.read_to_string(manifest)?;
        let tree: Value = serde_json::from_str(&text).map_err(|e| {
            Error::invalid_argument(format!(
                "Manifest '{}' is not valid JSON: {}",
                manifest.display(),
                e
            ))
        })?;
        if !tree.is_object() {
            return Err(Error::invalid_argument(
                "Manifest root must be a JSON object",
            ));
        }
        self.fs.create_dir_all(into)?;
        let written = self.write_tree(into, &tree)?;
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Info, "usecase", "scaffold", "project structure written")
                .field("into", into.display().to_string())
                .field("files", written),
        );
        Ok(written)
    }

    fn write_tree(&self, base: &Path, node: &Value) -> Result<usize, Error> {
        let Value::Object(entries) = node else {
            return Ok(0);
        };
        let mut written = 0;
        for (name, value) in entries {
            check_entry_name(name)?;
            let path = base.join(name);
            match value {
                Value::Object(_) => {
                    self.fs.create_dir_all(&path)?;
                    written += self.write_tree(&path, value)?;
                }
                Value::String(body) => {
                    self.fs.write(&path, &dedent(body))?;
                    written += 1;
                }
                other => {
                    return Err(Error::invalid_argument(format!(
                        "Manifest entry '{}' must be an object or a string, got {}",
                        name, other
                    )))
                }
            }
        }
        Ok(written)
    }
}

/// マニフェストのキーは 1 階層分の通常の名前だけを許す
fn check_entry_name(name: &str) -> Result<(), Error> {
    let mut comps = Path::new(name).components();
    match (comps.next(), comps.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(Error::invalid_argument(format!(
            "Manifest entry name '{}' must be a plain file or directory name",
            name
        ))),
    }
}

/// 共通の先頭インデントを取り除き、前後の空行を落とす（末尾は改行 1 つ）
pub fn dedent(body: &str) -> String {
    let lines: Vec<&str> = body.lines().collect();
    let start = lines.iter().position(|l| !l.trim().is_empty());
    let end = lines.iter().rposition(|l| !l.trim().is_empty());
    let (Some(start), Some(end)) = (start, end) else {
        return String::new();
    };
    let lines = &lines[start..=end];
    let indent = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);
    let mut out = String::new();
    for l in lines {
        if l.trim().is_empty() {
            out.push('\n');
            continue;
        }
        out.push_str(&l[indent.min(l.len())..]);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::adapter::{NoopLog, StdFileSystem};
    use tempfile::tempdir;

    #[test]
    fn test_dedent() {
        let body = "\n        from x import y\n\n        class A:\n            pass\n        ";
        assert_eq!(dedent(body), "from x import y\n\nclass A:\n    pass\n");
        assert_eq!(dedent("   \n  "), "");
        assert_eq!(dedent("flat"), "flat\n");
    }

    #[test]
    fn test_scaffold_writes_nested_tree() {
        let dir = tempdir().unwrap();
        let manifest = dir.path().join("manifest.json");
        std::fs::write(
            &manifest,
            r##"{"todo_app": {"app": {"__init__.py": "# package", "main.py": "\n    app = 1\n"}, "README.md": "# ToDo"}}"##,
        )
        .unwrap();
        let out = dir.path().join("out");
        let uc = ScaffoldUseCase::new(Arc::new(StdFileSystem), Arc::new(NoopLog));
        assert_eq!(uc.run(&manifest, &out).unwrap(), 3);
        assert_eq!(
            std::fs::read_to_string(out.join("todo_app/app/main.py")).unwrap(),
            "app = 1\n"
        );
        assert_eq!(
            std::fs::read_to_string(out.join("todo_app/README.md")).unwrap(),
            "# ToDo\n"
        );
    }

    #[test]
    fn test_scaffold_rejects_bad_entries() {
        let dir = tempdir().unwrap();
        let uc = ScaffoldUseCase::new(Arc::new(StdFileSystem), Arc::new(NoopLog));
        for body in [r#"["a"]"#, r#"{"a.txt": 3}"#, r#"{"../escape.py": "x"}"#, "not json"] {
            let manifest = dir.path().join("m.json");
            std::fs::write(&manifest, body).unwrap();
            let err = uc.run(&manifest, &dir.path().join("out")).unwrap_err();
            assert!(err.is_usage(), "{} -> {}", body, err);
        }
    }
}
