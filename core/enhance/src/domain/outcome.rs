//! 起動確認の結果とファイルごとの最終結果

use std::path::PathBuf;

/// 1 回の起動確認の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub succeeded: bool,
    pub diagnostic_text: String,
}

impl RunOutcome {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            diagnostic_text: text.into(),
        }
    }

    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            diagnostic_text: text.into(),
        }
    }
}

/// ファイルを諦めた理由
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbandonReason {
    /// 確認ラウンドの上限に達した（何も書き込んでいない）
    ConfirmExhausted,
    /// 診断ラウンドの上限に達した（元の内容に戻した）
    DiagnoseExhausted { last_diagnostic: String },
    /// I/O 等の想定外の失敗
    Failed(String),
}

impl std::fmt::Display for AbandonReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConfirmExhausted => write!(f, "no proposal was accepted"),
            Self::DiagnoseExhausted { last_diagnostic } => {
                write!(f, "application still fails to start: {}", last_diagnostic)
            }
            Self::Failed(msg) => write!(f, "{}", msg),
        }
    }
}

/// 1 ファイルの最終状態（DONE / ABANDONED）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Done { applied_writes: usize },
    Abandoned(AbandonReason),
}

impl FileOutcome {
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done { .. })
    }
}

/// 実行全体の集計
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub done: Vec<PathBuf>,
    pub abandoned: Vec<PathBuf>,
}

impl RunSummary {
    pub fn record(&mut self, path: PathBuf, outcome: &FileOutcome) {
        if outcome.is_done() {
            self.done.push(path);
        } else {
            self.abandoned.push(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_records_by_outcome() {
        let mut s = RunSummary::default();
        s.record(PathBuf::from("a.py"), &FileOutcome::Done { applied_writes: 1 });
        s.record(
            PathBuf::from("b.py"),
            &FileOutcome::Abandoned(AbandonReason::ConfirmExhausted),
        );
        assert_eq!(s.done, vec![PathBuf::from("a.py")]);
        assert_eq!(s.abandoned, vec![PathBuf::from("b.py")]);
    }

    #[test]
    fn test_abandon_reason_display() {
        let r = AbandonReason::DiagnoseExhausted {
            last_diagnostic: "exit code 1".to_string(),
        };
        assert!(r.to_string().ends_with("exit code 1"));
        assert_eq!(AbandonReason::Failed("disk full".to_string()).to_string(), "disk full");
    }
}
