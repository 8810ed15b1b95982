//! 職種テキストの照合
//!
//! - `fuzzy_match`: 短い打ち間違いを許すあいまい一致
//! - `extract_keywords`: 職種一覧から頻出キーワードを抽出

use regex::Regex;
use std::collections::HashMap;

/// 許容する不一致数
pub const MAX_DIFFERENCES: usize = 2;

/// この長さ以下のトークンは部分一致のみで判定
pub const SHORT_TOKEN_LEN: usize = 3;

/// この長さ以下の単語はキーワードにしない
pub const MIN_KEYWORD_LEN: usize = 2;

/// キーワードに必要な出現回数
pub const MIN_KEYWORD_FREQUENCY: usize = 2;

/// 返すキーワードの上限
pub const MAX_KEYWORDS: usize = 20;

/// あいまい一致
///
/// クエリが空なら常に一致。全体の部分一致で一致しなければ、
/// クエリの単語ごとに候補の単語と位置合わせで比較し、全単語が一致すれば真。
pub fn fuzzy_match(candidate: &str, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }

    let text = candidate.to_lowercase();
    let query = query.to_lowercase();

    if text.contains(&query) {
        return true;
    }

    let words: Vec<&str> = text.split_whitespace().collect();

    query.split_whitespace().all(|token| {
        if text.contains(token) {
            return true;
        }

        let token_len = token.chars().count();
        words.iter().any(|word| {
            if token_len <= SHORT_TOKEN_LEN {
                word.contains(token) || token.contains(word)
            } else {
                within_positional_budget(token, word)
            }
        })
    })
}

/// 先頭から1文字ずつ比較した不一致数と長さの差の合計が許容範囲内か
///
/// 挿入・入れ替えは考慮しない（編集距離ではない）。
fn within_positional_budget(a: &str, b: &str) -> bool {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let length_gap = a.len().abs_diff(b.len());
    if length_gap > MAX_DIFFERENCES {
        return false;
    }

    let mut differences = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        if x != y {
            differences += 1;
            if differences > MAX_DIFFERENCES {
                return false;
            }
        }
    }

    differences + length_gap <= MAX_DIFFERENCES
}

lazy_static::lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"[^A-Za-z0-9_\s]").expect("valid regex");
}

/// 職種一覧から頻出キーワードを抽出
///
/// 出現回数の多い順（同数は初出順）、最大 `MAX_KEYWORDS` 件。
pub fn extract_keywords<I, S>(job_titles: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for title in job_titles {
        let lowered = title.as_ref().to_lowercase();
        let cleaned = NON_WORD.replace_all(&lowered, " ");

        for word in cleaned.split_whitespace() {
            if word.chars().count() <= MIN_KEYWORD_LEN {
                continue;
            }
            let count = counts.entry(word.to_string()).or_insert(0);
            if *count == 0 {
                order.push(word.to_string());
            }
            *count += 1;
        }
    }

    let mut keywords: Vec<(String, usize)> = order
        .into_iter()
        .filter_map(|word| {
            let count = counts[&word];
            (count >= MIN_KEYWORD_FREQUENCY).then_some((word, count))
        })
        .collect();

    // 安定ソートなので同数は初出順のまま
    keywords.sort_by(|a, b| b.1.cmp(&a.1));

    keywords
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|(word, _)| word)
        .collect()
}
