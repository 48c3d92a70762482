//! ユースケース層（ports 経由でのみ外界に触れる）

pub mod chat_session;
pub mod enhance_all;
pub mod patch_loop;
pub mod scaffold;
pub mod verify;
