//! Excel出力
//!
//! 1枚目のシートは取り込み時と同じ見出しにしてあるので、出力したファイルを
//! そのまま再読み込みできる。階層の深さと部下数は右端の列に付ける。
//! 2枚目のシートにタイトルと作成日時を書く。

use crate::error::{OrgExplorerError, Result};
use org_explorer_common::Forest;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::path::Path;

const HEADERS: &[&str] = &[
    "Name",
    "Department",
    "Job Title",
    "Manager",
    "Office",
    "SAP User",
    "Level",
    "Direct Reports",
];

const COLUMN_WIDTHS: &[f64] = &[28.0, 20.0, 32.0, 28.0, 16.0, 10.0, 8.0, 14.0];

fn build_workbook(forest: &Forest, title: &str) -> std::result::Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name("Employees")?;

    for (col, (header, width)) in HEADERS.iter().zip(COLUMN_WIDTHS).enumerate() {
        let col = col as u16;
        sheet.write_string_with_format(0, col, *header, &bold)?;
        sheet.set_column_width(col, *width)?;
    }

    for (i, (depth, node)) in forest.walk().enumerate() {
        let row = (i + 1) as u32;
        let record = node.record();
        sheet.write_string(row, 0, &record.name)?;
        sheet.write_string(row, 1, &record.department)?;
        sheet.write_string(row, 2, &record.job_title)?;
        sheet.write_string(row, 3, &record.manager)?;
        sheet.write_string(row, 4, &record.office)?;
        sheet.write_boolean(row, 5, record.sap_user)?;
        sheet.write_number(row, 6, depth as f64)?;
        sheet.write_number(row, 7, node.report_count() as f64)?;
    }

    let info = workbook.add_worksheet();
    info.set_name("Info")?;
    info.write_string_with_format(0, 0, title, &bold)?;
    info.write_string(1, 0, "作成日時")?;
    info.write_string(
        1,
        1,
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    )?;
    info.write_string(2, 0, "社員数")?;
    info.write_number(2, 1, forest.len() as f64)?;
    info.set_column_width(0, 16.0)?;

    Ok(workbook)
}

pub fn generate_excel(forest: &Forest, output_path: &Path, title: &str) -> Result<()> {
    let mut workbook = build_workbook(forest, title)
        .map_err(|e| OrgExplorerError::ExcelGeneration(e.to_string()))?;
    workbook
        .save(output_path)
        .map_err(|e| OrgExplorerError::ExcelGeneration(format!("保存エラー: {}", e)))?;
    Ok(())
}
