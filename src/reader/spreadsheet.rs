//! Excel / ODS 読み込み（先頭シートのみ）

use super::columns::records_from_rows;
use crate::error::{OrgExplorerError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use org_explorer_common::EmployeeRecord;
use std::path::Path;
use tracing::debug;

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

pub fn read_workbook(path: &Path) -> Result<Vec<EmployeeRecord>> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| OrgExplorerError::Workbook(e.to_string()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| OrgExplorerError::EmptySheet(path.display().to_string()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| OrgExplorerError::Workbook(format!("{}: {}", sheet_name, e)))?;

    debug!(sheet = %sheet_name, rows = range.height(), "シートを読み込み");

    let rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<String>>());

    records_from_rows(rows, &sheet_name)
}
