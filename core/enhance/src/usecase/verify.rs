//! 起動確認（生存プローブ）
//!
//! 起動 → 猶予時間だけ待つ → 1 回だけ終了状態を確認 → 結果に関係なく終了させる。
//! 常駐させて監視するものではない。

use crate::domain::RunOutcome;
use common::ports::outbound::{LaunchSpec, Log, LogLevel, LogRecord, Process};
use std::sync::Arc;
use std::time::Duration;

pub struct LaunchVerifier {
    process: Arc<dyn Process>,
    log: Arc<dyn Log>,
    spec: LaunchSpec,
    grace: Duration,
}

impl LaunchVerifier {
    pub fn new(
        process: Arc<dyn Process>,
        log: Arc<dyn Log>,
        spec: LaunchSpec,
        grace: Duration,
    ) -> Self {
        Self {
            process,
            log,
            spec,
            grace,
        }
    }

    /// 猶予時間内に終了しなければ成功
    pub fn verify(&self) -> RunOutcome {
        let mut child = match self.process.spawn(&self.spec) {
            Ok(c) => c,
            Err(e) => return self.report(RunOutcome::failure(format!("Unexpected error: {}", e))),
        };

        if !self.grace.is_zero() {
            std::thread::sleep(self.grace);
        }

        let outcome = match child.try_wait() {
            Ok(Some(code)) => RunOutcome::failure(format!(
                "Server failed to start (exit code {}) with error: {}",
                code,
                child.take_diagnostics()
            )),
            Ok(None) => RunOutcome::success("Server started and then closed successfully."),
            Err(e) => RunOutcome::failure(format!("Unexpected error: {}", e)),
        };

        if let Err(e) = child.terminate() {
            let _ = self.log.log(
                &LogRecord::new(LogLevel::Warn, "usecase", "verify", "failed to terminate probe")
                    .field("error", e.to_string()),
            );
        }
        self.report(outcome)
    }

    fn report(&self, outcome: RunOutcome) -> RunOutcome {
        let (level, message) = if outcome.succeeded {
            (LogLevel::Info, "launch succeeded")
        } else {
            (LogLevel::Warn, "launch failed")
        };
        let _ = self.log.log(
            &LogRecord::new(level, "usecase", "verify", message)
                .field("command", self.spec.display())
                .field("diagnostic", outcome.diagnostic_text.clone()),
        );
        outcome
    }
}
