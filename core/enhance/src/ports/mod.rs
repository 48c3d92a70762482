//! enhance のポート
//!
//! inbound は main から見たアプリの入口、outbound は人間・LLM・ソース列挙への依頼口。

pub mod inbound;
pub mod outbound;
