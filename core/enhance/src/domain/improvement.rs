//! LLM に送る改善依頼・修正依頼

use std::path::PathBuf;

/// 1 ファイル分の改善依頼。永続化しない。
///
/// 人間が提案を却下すると、最初の指示にその直近の返答だけを付けたものが
/// `instruction_text` になる。以前の却下理由は持ち越さない。
/// 元のコード（`original_text`）は却下されても変わらない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImprovementRequest {
    pub target_path: PathBuf,
    pub original_text: String,
    pub instruction_text: String,
    base_instruction: String,
}

impl ImprovementRequest {
    pub fn new(
        target_path: impl Into<PathBuf>,
        original_text: impl Into<String>,
        instruction_text: impl Into<String>,
    ) -> Self {
        let instruction_text = instruction_text.into();
        Self {
            target_path: target_path.into(),
            original_text: original_text.into(),
            base_instruction: instruction_text.clone(),
            instruction_text,
        }
    }

    /// 最初の指示に却下時の返答を付ける。空の返答なら最初の指示に戻す。
    pub fn refine(&mut self, answer: &str) {
        let answer = answer.trim();
        self.instruction_text = if answer.is_empty() {
            self.base_instruction.clone()
        } else {
            format!("{} + {}", self.base_instruction, answer)
        };
    }

    pub fn prompt(&self) -> String {
        format!(
            "These are the improvements I would like to apply: {}\n\n\
             This is the code I would like to improve:\n\n{}\n\n\
             Please return the improved code without any additional explanations, ready to be compiled and run.",
            self.instruction_text, self.original_text
        )
    }
}

/// 起動失敗後の修正依頼（履歴を使わない単発の問い合わせ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixRequest<'a> {
    pub applied_text: &'a str,
    pub diagnostic_text: &'a str,
}

impl FixRequest<'_> {
    pub fn prompt(&self) -> String {
        format!(
            "The following code:\n{}\nfailed with the following output:\n{}\n\n\
             Return only the fixed code without any explanations, ready to be compiled and run.",
            self.applied_text, self.diagnostic_text
        )
    }
}
