//! アダプター（enhance 固有の Outbound ポートの標準実装）

pub mod chat_completion;
pub mod human_prompt;
pub mod settings;
pub mod source_enumerator;

pub use chat_completion::DriverChatCompletion;
pub use human_prompt::{CliHumanPrompt, NonInteractivePrompt};
pub use settings::load_settings;
pub use source_enumerator::FsSourceEnumerator;
