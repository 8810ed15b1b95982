use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrgExplorerError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("未対応のファイル形式です: {0}（xlsx/xls/ods/csv/json に対応）")]
    UnsupportedFormat(String),

    #[error("Excelファイルの読み込みに失敗: {0}")]
    Workbook(String),

    #[error("シートにデータがありません: {0}")]
    EmptySheet(String),

    #[error("必須の列がありません: {0}")]
    MissingColumns(String),

    #[error("階層が深すぎるためJSONに出力できません: {depth}階層（上限 {limit}）")]
    TooDeep { depth: usize, limit: usize },

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] org_explorer_common::Error),
}

pub type Result<T> = std::result::Result<T, OrgExplorerError>;
