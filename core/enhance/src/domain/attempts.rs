//! ラウンド数の上限付きカウンタ
//!
//! 確認ラウンドと診断ラウンドで別々に持ち、ファイルごとに作り直す。

/// 既定の確認ラウンド上限
pub const DEFAULT_CONFIRM_CEILING: usize = 5;
/// 既定の診断ラウンド上限
pub const DEFAULT_DIAGNOSE_CEILING: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptCounter {
    used: usize,
    ceiling: usize,
}

impl AttemptCounter {
    pub fn new(ceiling: usize) -> Self {
        Self { used: 0, ceiling }
    }

    /// 1 ラウンド消費する。上限に達していれば false。
    pub fn try_consume(&mut self) -> bool {
        if self.used >= self.ceiling {
            return false;
        }
        self.used += 1;
        true
    }
}
