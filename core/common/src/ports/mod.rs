//! common が定義するポート（outbound のみ。入口はバイナリ側が持つ）

pub mod outbound;
