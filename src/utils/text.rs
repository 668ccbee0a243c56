use regex::Regex;
use std::sync::LazyLock;

pub const DEFAULT_MAX_DOCUMENT_LENGTH: usize = 50_000;

/// 文件文字少於此長度視為沒有擷取到內容
pub const MIN_DOCUMENT_LENGTH: usize = 10;

const TRUNCATION_MARKER: &str = "\n\n[Document truncated for processing...]";

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// 清理外部擷取的文件文字：合併空白、移除控制字元、超過上限時截斷
pub fn clean_extracted_text(text: &str, max_length: usize) -> String {
    if text.is_empty() {
        return String::new();
    }

    let collapsed = WHITESPACE_RUN.replace_all(text, " ");
    let mut cleaned: String = collapsed
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect();

    if cleaned.chars().count() > max_length {
        cleaned = cleaned.chars().take(max_length).collect();
        cleaned.push_str(TRUNCATION_MARKER);
    }

    cleaned.trim().to_string()
}

/// 取前 `limit` 個字元（以 char 計，不會切斷 UTF-8）
pub fn excerpt(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
