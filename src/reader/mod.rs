//! 社員名簿の読み込み
//!
//! 拡張子で形式を判定し、正規化済みの社員レコード列を返す。
//! - xlsx / xlsm / xlsb / xls / ods: 先頭シート
//! - csv: 1行目が見出し
//! - json: レコードの配列

pub mod columns;
pub mod csv;
pub mod spreadsheet;

use crate::error::{OrgExplorerError, Result};
use org_explorer_common::{parse_records_json, EmployeeRecord};
use std::path::Path;
use tracing::info;

const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

pub fn load_employees(path: &Path) -> Result<Vec<EmployeeRecord>> {
    if !path.is_file() {
        return Err(OrgExplorerError::FileNotFound(path.display().to_string()));
    }

    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let records = if SPREADSHEET_EXTENSIONS.contains(&extension.as_str()) {
        spreadsheet::read_workbook(path)?
    } else if extension == "csv" {
        csv::read_csv(path)?
    } else if extension == "json" {
        let content = std::fs::read_to_string(path)?;
        parse_records_json(&content)?
    } else {
        return Err(OrgExplorerError::UnsupportedFormat(path.display().to_string()));
    };

    info!(path = %path.display(), employees = records.len(), "社員名簿を読み込み");
    Ok(records)
}
