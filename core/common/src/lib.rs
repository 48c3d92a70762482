//! enhance 共通ライブラリ
//!
//! 会話履歴・LLM プロバイダ・外界ポートとその標準実装を提供します。

/// エラーハンドリング
pub mod error;

/// 会話ターン
pub mod msg;

/// 容量付き会話履歴
pub mod history;

/// LLMドライバーとプロバイダ
pub mod llm;

/// ドメイン型（Newtype）
pub mod domain;

/// Outbound ポート
pub mod ports;

/// ポートの標準実装
pub mod adapter;
