//! ChatSession: 容量付き履歴を持ち、リモート補完への呼び出しをすべて仲介する
//!
//! 一時的な失敗（Error::Http）だけを上限回数まで再送し、上限に達したら
//! `Error::RetriesExhausted` を返す。履歴の変更が唯一の永続的な副作用。

use crate::ports::outbound::ChatCompletion;
use common::error::Error;
use common::history::ChatHistory;
use common::msg::{ChatRole, ChatTurn};
use common::ports::outbound::{Log, LogLevel, LogRecord};
use std::sync::Arc;
use std::time::Duration;

/// 既定の再送上限（初回を含む呼び出し回数）
pub const DEFAULT_MAX_RETRIES: usize = 3;

pub struct ChatSession {
    completion: Arc<dyn ChatCompletion>,
    log: Arc<dyn Log>,
    history: ChatHistory,
    max_retries: usize,
    retry_delay: Duration,
}

impl ChatSession {
    pub fn new(
        completion: Arc<dyn ChatCompletion>,
        log: Arc<dyn Log>,
        history_capacity: usize,
    ) -> Self {
        Self {
            completion,
            log,
            history: ChatHistory::with_capacity(history_capacity),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: Duration::ZERO,
        }
    }

    pub fn with_retry_policy(mut self, max_retries: usize, retry_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_delay = retry_delay;
        self
    }

    pub fn history(&self) -> &ChatHistory {
        &self.history
    }

    /// 履歴に 1 ターン追加する（容量超過分は古い順に捨てる）
    pub fn append_turn(&mut self, role: ChatRole, text: impl Into<String>) {
        self.history.push(ChatTurn::new(role, text));
    }

    /// 新しい user ターンを送り、assistant の応答を返す
    ///
    /// `use_history` が true なら履歴を前置し、成功時に user / assistant の両ターンを履歴に追加する。
    /// false なら単発の問い合わせで、履歴は読みも書きもしない。
    pub fn request(&mut self, text: &str, use_history: bool) -> Result<String, Error> {
        let mut turns = if use_history {
            self.history.to_vec()
        } else {
            Vec::new()
        };
        turns.push(ChatTurn::user(text));

        let mut last_error = String::new();
        for attempt in 1..=self.max_retries {
            let _ = self.log.log(
                &LogRecord::new(LogLevel::Debug, "usecase", "chat", "sending request")
                    .field("attempt", attempt)
                    .field("turns", turns.len())
                    .field("use_history", use_history),
            );
            match self.completion.complete(&turns) {
                Ok(reply) => {
                    if use_history {
                        self.append_turn(ChatRole::User, text);
                        self.append_turn(ChatRole::Assistant, reply.clone());
                    }
                    return Ok(reply);
                }
                Err(e) if e.is_transient() => {
                    let _ = self.log.log(
                        &LogRecord::new(LogLevel::Warn, "usecase", "chat", "request failed")
                            .field("attempt", attempt)
                            .field("error", e.to_string()),
                    );
                    last_error = e.to_string();
                    if attempt < self.max_retries && !self.retry_delay.is_zero() {
                        std::thread::sleep(self.retry_delay);
                    }
                }
                Err(e) => return Err(e),
            }
        }
        Err(Error::RetriesExhausted {
            attempts: self.max_retries,
            last: last_error,
        })
    }
}
