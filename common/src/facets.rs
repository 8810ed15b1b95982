//! 絞り込み候補の一覧
//!
//! 事業所・部署・上司の重複なし一覧。絞り込み結果ではなく全レコードから作る。

use crate::types::EmployeeRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetValues {
    pub offices: Vec<String>,
    pub departments: Vec<String>,
    pub managers: Vec<String>,
}

impl FacetValues {
    pub fn from_records(records: &[EmployeeRecord]) -> Self {
        Self {
            offices: distinct(records.iter().map(|r| r.office.as_str())),
            departments: distinct(records.iter().map(|r| r.department.as_str())),
            managers: distinct(records.iter().map(|r| r.manager.as_str())),
        }
    }
}

/// 空文字を除いて昇順に並べる
fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
