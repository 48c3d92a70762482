//! 人間とのやり取りの CLI 実装
//!
//! usecase は HumanPrompt trait 経由でのみ利用する。進行表示も質問も stderr に出し、
//! stdout はスクリプトから扱いやすいよう空けておく。

use crate::ports::outbound::HumanPrompt;
use common::error::Error;
use std::io::{self, BufRead, Write};

/// CLI で標準エラーに表示し、標準入力から 1 行読む実装
pub struct CliHumanPrompt;

impl CliHumanPrompt {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CliHumanPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl HumanPrompt for CliHumanPrompt {
    fn say(&self, text: &str) {
        eprintln!("{}", text);
    }

    fn ask(&self, question: &str) -> Result<String, Error> {
        eprint!("{}> ", question);
        let _ = io::stderr().flush();

        let mut line = String::new();
        let n = io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| Error::io_msg(e.to_string()))?;
        if n == 0 {
            return Err(Error::io_msg("stdin closed while waiting for an answer"));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// 非対話用: 表示だけ行い、質問には常に "n" を返す（CI 等でブロックしない）
pub struct NonInteractivePrompt;

impl NonInteractivePrompt {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NonInteractivePrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl HumanPrompt for NonInteractivePrompt {
    fn say(&self, text: &str) {
        eprintln!("{}", text);
    }

    fn ask(&self, question: &str) -> Result<String, Error> {
        eprintln!("{}> n (non-interactive)", question);
        Ok("n".to_string())
    }
}
