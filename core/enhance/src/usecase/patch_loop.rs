//! Patch-and-Verify ループ: 1 ファイルを DONE か ABANDONED まで進める
//!
//! PROPOSE → CONFIRM →（APPLY → VERIFY → DONE | DIAGNOSE）。
//! 確認ラウンドと診断ラウンドはそれぞれ独立した上限を持ち、ファイルごとに数え直す。

use crate::domain::{
    is_usable, strip_code_fence, AbandonReason, AttemptCounter, FileOutcome, FixRequest,
    ImprovementRequest, RunOutcome, SourceUnit,
};
use crate::ports::outbound::human_prompt::is_accept;
use crate::ports::outbound::HumanPrompt;
use crate::usecase::chat_session::ChatSession;
use crate::usecase::verify::LaunchVerifier;
use common::error::Error;
use common::ports::outbound::{FileSystem, Log, LogLevel, LogRecord};
use std::path::Path;
use std::sync::Arc;

/// 各ラウンドの上限
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ceilings {
    pub confirm: usize,
    pub diagnose: usize,
}

pub struct PatchLoopDeps {
    pub prompt: Arc<dyn HumanPrompt>,
    pub fs: Arc<dyn FileSystem>,
    pub verifier: LaunchVerifier,
    pub log: Arc<dyn Log>,
}

pub struct PatchLoop {
    deps: PatchLoopDeps,
    ceilings: Ceilings,
}

impl PatchLoop {
    pub fn new(deps: PatchLoopDeps, ceilings: Ceilings) -> Self {
        Self { deps, ceilings }
    }

    /// 1 ファイルを処理する
    ///
    /// Err は I/O や対話チャネルの失敗のみ。ラウンド上限到達は `FileOutcome::Abandoned`。
    pub fn run(
        &self,
        session: &mut ChatSession,
        unit: &SourceUnit,
        instructions: &str,
    ) -> Result<FileOutcome, Error> {
        let mut request = ImprovementRequest::new(&unit.path, &unit.text, instructions);

        let accepted = match self.propose_and_confirm(session, &mut request)? {
            Some(text) => text,
            None => {
                self.say(&format!(
                    "No improvement was accepted for {} after {} rounds; leaving it unchanged.",
                    unit.path.display(),
                    self.ceilings.confirm
                ));
                self.record(LogLevel::Warn, "abandoned", &unit.path, "confirm ceiling reached");
                return Ok(FileOutcome::Abandoned(AbandonReason::ConfirmExhausted));
            }
        };

        let mut writes = 0;
        self.apply(&unit.path, &accepted)?;
        writes += 1;
        self.say(&format!("Improvement applied to {}.", unit.path.display()));

        let mut outcome = self.verify();
        let mut applied = accepted;
        let mut rounds = AttemptCounter::new(self.ceilings.diagnose);

        while !outcome.succeeded && rounds.try_consume() {
            self.say(&format!("Error running application: {}", outcome.diagnostic_text));
            let fix_prompt = FixRequest {
                applied_text: &applied,
                diagnostic_text: &outcome.diagnostic_text,
            }
            .prompt();

            let reply = match session.request(&fix_prompt, false) {
                Ok(r) => r,
                Err(e) => {
                    self.say(&format!("Fix request failed: {}", e));
                    self.record(LogLevel::Warn, "diagnose", &unit.path, &e.to_string());
                    continue;
                }
            };

            let proposal = strip_code_fence(&reply);
            if !is_usable(&proposal) {
                self.say("No fix suggested or recognized.");
                self.record(LogLevel::Info, "diagnose", &unit.path, "empty fix proposal");
                continue;
            }

            let answer = self
                .deps
                .prompt
                .ask(&format!("Apply the suggested fix? (y/n):\n{}\n", proposal))?;
            if is_accept(&answer) {
                self.say("Applying suggested fix...");
                self.apply(&unit.path, &proposal)?;
                writes += 1;
                applied = proposal;
                outcome = self.verify();
            } else {
                self.say("Fix not applied.");
                self.record(LogLevel::Info, "diagnose", &unit.path, "fix rejected");
            }
        }

        if outcome.succeeded {
            self.say(&format!(
                "Application improvement for {} done successfully.",
                unit.path.display()
            ));
            self.record(LogLevel::Info, "done", &unit.path, "verified");
            return Ok(FileOutcome::Done {
                applied_writes: writes,
            });
        }

        // 動かないまま諦めるので元の内容に戻す
        self.deps.fs.write(&unit.path, &unit.text)?;
        self.say(&format!(
            "Application improvement for {} failed after several attempts; original content restored.",
            unit.path.display()
        ));
        self.record(LogLevel::Warn, "abandoned", &unit.path, "diagnose ceiling reached");
        Ok(FileOutcome::Abandoned(AbandonReason::DiagnoseExhausted {
            last_diagnostic: outcome.diagnostic_text,
        }))
    }

    /// 承認された提案を返す。上限まで承認されなければ None。
    fn propose_and_confirm(
        &self,
        session: &mut ChatSession,
        request: &mut ImprovementRequest,
    ) -> Result<Option<String>, Error> {
        let mut rounds = AttemptCounter::new(self.ceilings.confirm);
        while rounds.try_consume() {
            let reply = match session.request(&request.prompt(), true) {
                Ok(r) => r,
                Err(e) => {
                    self.say(&format!("Improvement request failed: {}", e));
                    self.record(LogLevel::Warn, "propose", &request.target_path, &e.to_string());
                    continue;
                }
            };

            let proposal = strip_code_fence(&reply);
            if !is_usable(&proposal) {
                self.say("The proposed improvement was empty; asking again.");
                self.record(LogLevel::Info, "propose", &request.target_path, "empty proposal");
                continue;
            }

            let answer = self.deps.prompt.ask(&format!(
                "Apply the following improvement to {}? (type 'y' to apply or state any fixes you'd like to make):\n{}\n",
                request.target_path.display(),
                proposal
            ))?;
            if is_accept(&answer) {
                return Ok(Some(proposal));
            }
            self.say(&format!(
                "Improvement not applied, creating a different improvement now: {}",
                answer.trim()
            ));
            self.record(LogLevel::Info, "confirm", &request.target_path, "proposal rejected");
            request.refine(&answer);
        }
        Ok(None)
    }

    fn apply(&self, path: &Path, text: &str) -> Result<(), Error> {
        self.deps.fs.write(path, text)?;
        self.record(LogLevel::Info, "apply", path, "written");
        Ok(())
    }

    fn verify(&self) -> RunOutcome {
        let outcome = self.deps.verifier.verify();
        if outcome.succeeded {
            self.say("Server started successfully.");
        }
        outcome
    }

    fn say(&self, text: &str) {
        self.deps.prompt.say(text);
    }

    fn record(&self, level: LogLevel, kind: &str, path: &Path, message: &str) {
        let _ = self.deps.log.log(
            &LogRecord::new(level, "usecase", "round", message)
                .field("state", kind)
                .field("path", path.display().to_string()),
        );
    }
}
