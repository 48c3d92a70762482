//! 容量付きの会話履歴（リングバッファ）
//!
//! 容量を超えたら最も古いターンから捨てる。長さが容量を超えることはない。

use crate::msg::ChatTurn;
use std::collections::VecDeque;

/// 既定の履歴容量
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// 会話履歴
#[derive(Debug, Clone)]
pub struct ChatHistory {
    turns: VecDeque<ChatTurn>,
    capacity: usize,
}

impl ChatHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            turns: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// 末尾に追加し、容量超過分を先頭から捨てる
    pub fn push(&mut self, turn: ChatTurn) {
        if self.capacity == 0 {
            return;
        }
        while self.turns.len() >= self.capacity {
            self.turns.pop_front();
        }
        self.turns.push_back(turn);
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatTurn> {
        self.turns.iter()
    }

    /// 古い順のコピー
    pub fn to_vec(&self) -> Vec<ChatTurn> {
        self.turns.iter().cloned().collect()
    }
}

impl Default for ChatHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}
