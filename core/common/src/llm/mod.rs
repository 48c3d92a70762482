//! LLMドライバーとプロバイダの実装
//!
//! このモジュールは、異なるLLMプロバイダ（OpenAI 互換、Echo）で共通する処理を提供します。

pub mod driver;
pub mod echo;
pub mod factory;
pub mod openai_compat;
pub mod provider;

pub use driver::LlmDriver;
pub use factory::{create_driver, create_provider, AnyProvider, ProviderOptions, ProviderType};
pub use provider::LlmProvider;
