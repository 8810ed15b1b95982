//! 社員データ・絞り込み条件の型定義
//!
//! CLIと対話モードで共有される型:
//! - EmployeeRecord: 名簿の1行（正規化済み）
//! - FilterCriteria: 絞り込み条件

use crate::error::{Error, Result};
use crate::hierarchy::EmployeeTree;
use serde::{Deserialize, Serialize};

/// 社員レコード
///
/// `name` が上司参照のキーになる。`manager` が空なら上司なし。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeeRecord {
    pub id: String,
    pub name: String,
    pub department: String,
    pub job_title: String,
    pub manager: String,
    pub office: String,
    pub sap_user: bool,
}

impl EmployeeRecord {
    /// 上司名が設定されているか（空白のみは未設定扱い）
    pub fn has_manager(&self) -> bool {
        !self.manager.trim().is_empty()
    }
}

/// SAPユーザーの三値フィルタ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SapUserFilter {
    #[default]
    #[serde(rename = "all")]
    Any,
    #[serde(rename = "true")]
    Yes,
    #[serde(rename = "false")]
    No,
}

impl SapUserFilter {
    pub fn accepts(&self, sap_user: bool) -> bool {
        match self {
            SapUserFilter::Any => true,
            SapUserFilter::Yes => sap_user,
            SapUserFilter::No => !sap_user,
        }
    }
}

impl std::str::FromStr for SapUserFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "any" | "" => Ok(SapUserFilter::Any),
            "true" | "yes" | "y" => Ok(SapUserFilter::Yes),
            "false" | "no" | "n" => Ok(SapUserFilter::No),
            _ => Err(format!("Unknown SAP user filter: {}. Use all, true, or false", s)),
        }
    }
}

impl std::fmt::Display for SapUserFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SapUserFilter::Any => write!(f, "all"),
            SapUserFilter::Yes => write!(f, "true"),
            SapUserFilter::No => write!(f, "false"),
        }
    }
}

/// 職種フィルタのモード
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobTitleMode {
    /// あいまい一致（`job_title_text`）
    #[default]
    Text,
    /// キーワード全一致（`job_title_keywords`）
    Keywords,
}

/// 絞り込み条件
///
/// 空文字・空リストはワイルドカード。`job_title_mode` に応じて
/// `job_title_text` と `job_title_keywords` のどちらか一方だけが使われる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    pub office: String,
    pub department: String,
    pub manager: String,
    pub sap_user: SapUserFilter,
    pub search_query: String,
    pub job_title_mode: JobTitleMode,
    pub job_title_text: String,
    pub job_title_keywords: Vec<String>,
}

impl FilterCriteria {
    /// いずれかの条件が設定されているか
    pub fn is_active(&self) -> bool {
        !self.office.is_empty()
            || !self.department.is_empty()
            || !self.manager.is_empty()
            || self.sap_user != SapUserFilter::Any
            || !self.search_query.is_empty()
            || !self.job_title_text.is_empty()
            || !self.job_title_keywords.is_empty()
    }

    /// すべての条件をリセット
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// JSON配列から社員レコードを読み込む
///
/// 入れ子の `directReports`（JSON出力の形式）は行きがけ順に展開する。
pub fn parse_records_json(content: &str) -> Result<Vec<EmployeeRecord>> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    if !value.is_array() {
        return Err(Error::InvalidRecords(
            "expected a JSON array of employee records".to_string(),
        ));
    }
    let trees: Vec<EmployeeTree> = serde_json::from_value(value)?;
    Ok(EmployeeTree::flatten(trees))
}
