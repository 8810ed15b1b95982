pub mod excel;

use crate::error::Result;
use crate::render::render_json;
use org_explorer_common::Forest;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Excel,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Excel => "xlsx",
            ExportFormat::Json => "json",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "json" => Ok(ExportFormat::Json),
            _ => Err(format!("Unknown format: {}. Use excel or json", s)),
        }
    }
}

/// 出力先がディレクトリ（または拡張子なし）ならタイトルからファイル名を作る
pub fn output_path_for_format(output: &Path, title: &str, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", title, extension))
    } else {
        output.to_path_buf()
    }
}

/// 組織図をファイルに書き出し、書き出したパスを返す
pub fn export_forest(
    forest: &Forest,
    format: ExportFormat,
    output: &Path,
    title: &str,
) -> Result<PathBuf> {
    let output_path = output_path_for_format(output, title, format.extension());

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    match format {
        ExportFormat::Excel => excel::generate_excel(forest, &output_path, title)?,
        ExportFormat::Json => std::fs::write(&output_path, render_json(forest)?)?,
    }

    Ok(output_path)
}
