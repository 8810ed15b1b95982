//! エラー型定義

use thiserror::Error;

/// 共通エラー型
///
/// 組織図の構築・検索・絞り込みは失敗しない。
/// レコードの読み込みだけがこのエラーを返す。
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid records: {0}")]
    InvalidRecords(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_records() {
        let error = Error::InvalidRecords("expected an array".to_string());
        assert_eq!(format!("{}", error), "Invalid records: expected an array");
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }
}
