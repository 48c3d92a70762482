//! Outbound ポート: アプリが外界（人間・LLM・ソース列挙）を使うための trait
//!
//! ファイル・プロセス・ログのポートは common にある。

pub mod chat_completion;
pub mod human_prompt;
pub mod source_enumerator;

pub use chat_completion::ChatCompletion;
pub use human_prompt::HumanPrompt;
pub use source_enumerator::SourceEnumerator;
