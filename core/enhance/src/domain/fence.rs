//! 応答テキストからコードフェンスを取り除く
//!
//! 最初の開きフェンス（``` と任意の言語タグ）の次行から、次の閉じフェンスまでを残す。
//! 閉じフェンスが無ければ末尾まで。開きフェンスが無ければ応答をそのまま返す。

use regex::Regex;
use std::sync::OnceLock;

fn fence_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)```[\w+#.\-]*[ \t]*\r?\n?(.*?)(?:```|\z)").expect("fence regex is valid")
    })
}

/// フェンスの内側だけを返す（フェンスが無い応答は変更しない）
pub fn strip_code_fence(response: &str) -> String {
    match fence_regex().captures(response) {
        Some(caps) => caps
            .get(1)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default(),
        None => response.to_string(),
    }
}

/// フェンス除去後に使える内容が残っているか
pub fn is_usable(stripped: &str) -> bool {
    !stripped.trim().is_empty()
}
