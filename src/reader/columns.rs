//! 見出し行の解釈と行 → 社員レコードの変換
//!
//! 見出しの表記揺れ（`Job Title` / `jobTitle` / `Job_Title` など）に対応する。
//! 同じ項目の列が複数あれば、左の候補から順に空でない値を採用する。

use crate::error::{OrgExplorerError, Result};
use org_explorer_common::EmployeeRecord;
use tracing::debug;

const NAME_HEADERS: &[&str] = &["Name", "name"];
const DEPARTMENT_HEADERS: &[&str] = &["Department", "department"];
const JOB_TITLE_HEADERS: &[&str] = &["Job Title", "jobTitle", "Job_Title"];
const MANAGER_HEADERS: &[&str] = &["Manager", "manager"];
const OFFICE_HEADERS: &[&str] = &["Office", "office"];
const SAP_USER_HEADERS: &[&str] = &["SAP User", "sapUser", "SAP_User"];

/// 項目ごとの列番号（候補の優先順）
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    name: Vec<usize>,
    department: Vec<usize>,
    job_title: Vec<usize>,
    manager: Vec<usize>,
    office: Vec<usize>,
    sap_user: Vec<usize>,
}

fn locate(header: &[String], variants: &[&str]) -> Vec<usize> {
    variants
        .iter()
        .filter_map(|variant| header.iter().position(|h| h.trim() == *variant))
        .collect()
}

impl ColumnMap {
    /// 見出し行から列を特定する。名前列がなければエラー
    pub fn from_header(header: &[String]) -> Result<Self> {
        let map = Self {
            name: locate(header, NAME_HEADERS),
            department: locate(header, DEPARTMENT_HEADERS),
            job_title: locate(header, JOB_TITLE_HEADERS),
            manager: locate(header, MANAGER_HEADERS),
            office: locate(header, OFFICE_HEADERS),
            sap_user: locate(header, SAP_USER_HEADERS),
        };

        if map.name.is_empty() {
            return Err(OrgExplorerError::MissingColumns(format!(
                "名前の列（{}）が見つかりません",
                NAME_HEADERS.join(" / ")
            )));
        }

        debug!(?map, "見出しを解釈");
        Ok(map)
    }

    fn value(row: &[String], columns: &[usize]) -> String {
        columns
            .iter()
            .filter_map(|&i| row.get(i))
            .find(|v| !v.is_empty())
            .cloned()
            .unwrap_or_default()
    }

    /// データ行をレコードに変換（`index` は0始まりのデータ行番号）
    pub fn record(&self, index: usize, row: &[String]) -> EmployeeRecord {
        EmployeeRecord {
            id: format!("emp_{}", index),
            name: Self::value(row, &self.name),
            department: Self::value(row, &self.department),
            job_title: Self::value(row, &self.job_title),
            manager: Self::value(row, &self.manager),
            office: Self::value(row, &self.office),
            sap_user: Self::value(row, &self.sap_user).to_lowercase() == "true",
        }
    }
}

fn is_blank(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

/// 先頭の空でない行を見出しとして、残りの行をレコードに変換する
pub fn records_from_rows<I>(rows: I, source: &str) -> Result<Vec<EmployeeRecord>>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut rows = rows.into_iter().filter(|row| !is_blank(row));

    let header = rows
        .next()
        .ok_or_else(|| OrgExplorerError::EmptySheet(source.to_string()))?;
    let columns = ColumnMap::from_header(&header)?;

    Ok(rows
        .enumerate()
        .map(|(index, row)| columns.record(index, &row))
        .collect())
}
