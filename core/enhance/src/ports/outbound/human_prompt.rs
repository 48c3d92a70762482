//! 人間とのやり取りの Outbound ポート
//!
//! usecase は stdin/stderr に直接触れず、この trait 経由で提示と問い合わせを行う。

use common::error::Error;

/// 人間への提示と 1 行の返答取得
pub trait HumanPrompt: Send + Sync {
    /// 進行状況を表示する
    fn say(&self, text: &str);

    /// 質問を表示し、1 行の返答を返す（返答が来るまでブロックする）
    fn ask(&self, question: &str) -> Result<String, Error>;
}

/// 返答が承認（"y"、大文字小文字・前後空白は無視）か
pub fn is_accept(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}
