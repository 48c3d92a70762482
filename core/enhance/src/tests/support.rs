//! シナリオテスト用のスタブ（メモリ FS・台本どおりに応答する LLM / 人間 / プロセス）

use crate::domain::SourceUnit;
use crate::ports::outbound::{ChatCompletion, HumanPrompt};
use common::error::Error;
use common::msg::ChatTurn;
use common::ports::outbound::{ChildProcess, EntryKind, FileSystem, LaunchSpec, Process};
use std::collections::{BTreeMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// メモリ上のファイルシステム。書き込みは順に記録する。
#[derive(Default)]
pub struct MemFs {
    files: Mutex<BTreeMap<PathBuf, String>>,
    writes: Mutex<Vec<(PathBuf, String)>>,
    unreadable: Mutex<Vec<PathBuf>>,
}

impl MemFs {
    pub fn with_files(files: &[(&str, &str)]) -> Self {
        let fs = Self::default();
        {
            let mut map = fs.files.lock().unwrap();
            for (p, t) in files {
                map.insert(PathBuf::from(p), t.to_string());
            }
        }
        fs
    }

    /// 読み込みだけ失敗させる（entry_kind ではファイルとして見える）
    pub fn mark_unreadable(&self, path: &str) {
        self.unreadable.lock().unwrap().push(PathBuf::from(path));
    }

    pub fn content(&self, path: &str) -> Option<String> {
        self.files.lock().unwrap().get(Path::new(path)).cloned()
    }

    pub fn writes(&self) -> Vec<(PathBuf, String)> {
        self.writes.lock().unwrap().clone()
    }

    fn has_children(&self, path: &Path) -> bool {
        self.files
            .lock()
            .unwrap()
            .keys()
            .any(|p| p != path && p.starts_with(path))
    }
}

impl FileSystem for MemFs {
    fn read_to_string(&self, path: &Path) -> Result<String, Error> {
        if self.unreadable.lock().unwrap().iter().any(|p| p == path) {
            return Err(Error::io_msg(format!(
                "Failed to read '{}': stream did not contain valid UTF-8",
                path.display()
            )));
        }
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| Error::io_msg(format!("{}: not found", path.display())))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), Error> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), contents.to_string());
        self.writes
            .lock()
            .unwrap()
            .push((path.to_path_buf(), contents.to_string()));
        Ok(())
    }

    fn create_dir_all(&self, _path: &Path) -> Result<(), Error> {
        Ok(())
    }

    fn entry_kind(&self, path: &Path) -> Result<Option<EntryKind>, Error> {
        if self.files.lock().unwrap().contains_key(path) {
            return Ok(Some(EntryKind::File));
        }
        if self.has_children(path) {
            return Ok(Some(EntryKind::Dir));
        }
        Ok(None)
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>, Error> {
        let files = self.files.lock().unwrap();
        let mut children: Vec<PathBuf> = files
            .keys()
            .filter_map(|p| p.strip_prefix(path).ok())
            .filter_map(|rest| rest.components().next())
            .map(|c| path.join(c.as_os_str()))
            .collect();
        children.dedup();
        Ok(children)
    }

    fn open_append(&self, _path: &Path) -> Result<Box<dyn std::io::Write + Send>, Error> {
        Ok(Box::new(std::io::sink()))
    }
}

/// 台本どおりに応答する LLM。台本が尽きたら既定の応答を返す。
pub struct ScriptedCompletion {
    script: Mutex<VecDeque<Result<String, Error>>>,
    fallback: String,
    requests: Mutex<Vec<Vec<ChatTurn>>>,
}

impl ScriptedCompletion {
    pub fn new(script: Vec<Result<String, Error>>, fallback: &str) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback: fallback.to_string(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn always(reply: &str) -> Self {
        Self::new(Vec::new(), reply)
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<Vec<ChatTurn>> {
        self.requests.lock().unwrap().clone()
    }

    /// 各リクエストの最後の user ターン
    pub fn last_user_texts(&self) -> Vec<String> {
        self.requests()
            .iter()
            .filter_map(|turns| turns.last().map(|t| t.text().to_string()))
            .collect()
    }
}

impl ChatCompletion for ScriptedCompletion {
    fn complete(&self, turns: &[ChatTurn]) -> Result<String, Error> {
        self.requests.lock().unwrap().push(turns.to_vec());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(self.fallback.clone()))
    }
}

/// 台本どおりに答える人間。台本が尽きたら "n"。
#[derive(Default)]
pub struct ScriptedPrompt {
    answers: Mutex<VecDeque<String>>,
    questions: Mutex<Vec<String>>,
    said: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().map(|s| s.to_string()).collect()),
            ..Default::default()
        }
    }

    pub fn questions(&self) -> Vec<String> {
        self.questions.lock().unwrap().clone()
    }

    pub fn said(&self) -> Vec<String> {
        self.said.lock().unwrap().clone()
    }
}

impl HumanPrompt for ScriptedPrompt {
    fn say(&self, text: &str) {
        self.said.lock().unwrap().push(text.to_string());
    }

    fn ask(&self, question: &str) -> Result<String, Error> {
        self.questions.lock().unwrap().push(question.to_string());
        Ok(self
            .answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| "n".to_string()))
    }
}

/// 起動ごとに台本の結果を返すプロセス。None は「猶予後も動作中」、Some(code) は終了済み。
#[derive(Default)]
pub struct ScriptedProcess {
    outcomes: Mutex<VecDeque<Option<i32>>>,
    spawned: Mutex<Vec<LaunchSpec>>,
    terminated: Arc<Mutex<usize>>,
}

impl ScriptedProcess {
    pub fn new(outcomes: Vec<Option<i32>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            ..Default::default()
        }
    }

    pub fn spawn_count(&self) -> usize {
        self.spawned.lock().unwrap().len()
    }

    pub fn terminate_count(&self) -> usize {
        *self.terminated.lock().unwrap()
    }
}

impl Process for ScriptedProcess {
    fn spawn(&self, spec: &LaunchSpec) -> Result<Box<dyn ChildProcess>, Error> {
        self.spawned.lock().unwrap().push(spec.clone());
        let exit = self.outcomes.lock().unwrap().pop_front().unwrap_or(None);
        Ok(Box::new(ScriptedChild {
            exit,
            terminated: Arc::clone(&self.terminated),
        }))
    }
}

struct ScriptedChild {
    exit: Option<i32>,
    terminated: Arc<Mutex<usize>>,
}

impl ChildProcess for ScriptedChild {
    fn try_wait(&mut self) -> Result<Option<i32>, Error> {
        Ok(self.exit)
    }

    fn take_diagnostics(&mut self) -> String {
        match self.exit {
            Some(_) => "ImportError: cannot import name 'Todo'".to_string(),
            None => String::new(),
        }
    }

    fn terminate(&mut self) -> Result<(), Error> {
        *self.terminated.lock().unwrap() += 1;
        Ok(())
    }
}

pub fn unit(path: &str, text: &str) -> SourceUnit {
    SourceUnit::new(path, text)
}
