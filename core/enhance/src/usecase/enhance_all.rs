//! root 配下の全ファイルを 1 つずつ改善する
//!
//! 1 ファイルを DONE / ABANDONED まで進めてから次へ進む。
//! あるファイルを諦めても後続は処理する。main ユニットが無い場合だけ全体を中止する。

use crate::domain::{AbandonReason, FileOutcome, RunSummary};
use crate::ports::outbound::{HumanPrompt, SourceEnumerator};
use crate::usecase::chat_session::ChatSession;
use crate::usecase::patch_loop::PatchLoop;
use common::error::Error;
use common::ports::outbound::{Log, LogLevel, LogRecord};
use std::path::Path;
use std::sync::Arc;

pub struct EnhanceUseCase {
    enumerator: Arc<dyn SourceEnumerator>,
    patch_loop: PatchLoop,
    prompt: Arc<dyn HumanPrompt>,
    log: Arc<dyn Log>,
}

impl EnhanceUseCase {
    pub fn new(
        enumerator: Arc<dyn SourceEnumerator>,
        patch_loop: PatchLoop,
        prompt: Arc<dyn HumanPrompt>,
        log: Arc<dyn Log>,
    ) -> Self {
        Self {
            enumerator,
            patch_loop,
            prompt,
            log,
        }
    }

    pub fn run(
        &self,
        session: &mut ChatSession,
        root: &Path,
        instructions: &str,
    ) -> Result<RunSummary, Error> {
        let found = self.enumerator.enumerate(root)?;
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Info, "usecase", "lifecycle", "enumerated sources")
                .field("root", root.display().to_string())
                .field("units", found.units.len())
                .field("skipped", found.skipped.len()),
        );

        let mut summary = RunSummary::default();
        for (path, reason) in &found.skipped {
            self.prompt
                .say(&format!("Skipping {}: {}", path.display(), reason));
            let outcome = FileOutcome::Abandoned(AbandonReason::Failed(reason.clone()));
            self.record_outcome(path, &outcome);
            summary.record(path.clone(), &outcome);
        }

        let units = found.units;
        for unit in &units {
            self.prompt
                .say(&format!("==> Improving {}", unit.path.display()));
            let outcome = match self.patch_loop.run(session, unit, instructions) {
                Ok(o) => o,
                Err(e) => {
                    self.prompt
                        .say(&format!("Skipping {}: {}", unit.path.display(), e));
                    let _ = self.log.log(
                        &LogRecord::new(LogLevel::Error, "usecase", "error", e.to_string())
                            .field("path", unit.path.display().to_string()),
                    );
                    FileOutcome::Abandoned(AbandonReason::Failed(e.to_string()))
                }
            };
            self.record_outcome(&unit.path, &outcome);
            summary.record(unit.path.clone(), &outcome);
        }

        self.prompt.say(&format!(
            "Finished: {} file(s) improved, {} file(s) abandoned.",
            summary.done.len(),
            summary.abandoned.len()
        ));
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Info, "usecase", "lifecycle", "run finished")
                .field("done", summary.done.len())
                .field("abandoned", summary.abandoned.len())
                .field("history_turns", session.history().len()),
        );
        Ok(summary)
    }

    fn record_outcome(&self, path: &Path, outcome: &FileOutcome) {
        let record = match outcome {
            FileOutcome::Done { applied_writes } => {
                LogRecord::new(LogLevel::Info, "usecase", "round", "file done")
                    .field("writes", *applied_writes)
            }
            FileOutcome::Abandoned(reason) => {
                LogRecord::new(LogLevel::Warn, "usecase", "round", "file abandoned")
                    .field("reason", reason.to_string())
            }
        };
        let _ = self.log.log(&record.field("path", path.display().to_string()));
    }
}
