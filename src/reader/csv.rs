//! CSV読み込み（ダブルクォート対応）

use super::columns::records_from_rows;
use crate::error::Result;
use org_explorer_common::EmployeeRecord;
use std::path::Path;

pub fn read_csv(path: &Path) -> Result<Vec<EmployeeRecord>> {
    let content = std::fs::read_to_string(path)?;
    parse_csv(&content, &path.display().to_string())
}

pub fn parse_csv(content: &str, source: &str) -> Result<Vec<EmployeeRecord>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let rows = split_records(content).into_iter().map(parse_csv_line);
    records_from_rows(rows, source)
}

/// 行に分割する。ダブルクォート内の改行はフィールドの一部として残す
fn split_records(content: &str) -> Vec<&str> {
    let mut records = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;

    for (i, c) in content.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '\n' if !in_quotes => {
                records.push(content[start..i].trim_end_matches('\r'));
                start = i + 1;
            }
            _ => {}
        }
    }

    if start < content.len() {
        records.push(content[start..].trim_end_matches('\r'));
    }
    records
}

/// CSV行をパース
fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut in_quotes = false;
    let mut field_start = 0;

    for (i, c) in line.char_indices() {
        if c == '"' {
            in_quotes = !in_quotes;
        } else if c == ',' && !in_quotes {
            fields.push(unquote(&line[field_start..i]));
            field_start = i + c.len_utf8();
        }
    }

    // 最後のフィールド
    fields.push(unquote(&line[field_start..]));
    fields
}

fn unquote(s: &str) -> String {
    let s = s.trim();
    if s.starts_with('"') && s.ends_with('"') && s.len() >= 2 {
        s[1..s.len() - 1].replace("\"\"", "\"")
    } else {
        s.to_string()
    }
}
