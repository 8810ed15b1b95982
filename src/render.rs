//! 組織図の表示
//!
//! テキスト（インデント付きツリー）とJSON（入れ子構造）に対応。

use crate::error::{OrgExplorerError, Result};
use org_explorer_common::{EmployeeNode, Forest};
use serde::{Deserialize, Serialize};

/// 出力形式
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "tree" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// テキスト表示のオプション
#[derive(Clone, Copy, Debug)]
pub struct RenderOptions {
    pub show_details: bool,
    pub indent_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_details: true,
            indent_width: 2,
        }
    }
}

/// 1人分の表示行
pub fn format_employee(node: &EmployeeNode<'_>, options: &RenderOptions) -> String {
    let record = node.record();
    let mut line = if record.name.is_empty() {
        "(名前なし)".to_string()
    } else {
        record.name.clone()
    };

    if !record.job_title.is_empty() {
        line.push_str(" - ");
        line.push_str(&record.job_title);
    }

    if options.show_details {
        let places: Vec<&str> = [record.department.as_str(), record.office.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();
        if !places.is_empty() {
            line.push_str(&format!(" [{}]", places.join(" / ")));
        }
        if record.sap_user {
            line.push_str(" [SAP]");
        }
    }

    let reports = node.report_count();
    if reports > 0 {
        line.push_str(&format!(" (部下{}名)", reports));
    }

    line
}

/// インデント付きツリーを生成
pub fn render_text(forest: &Forest, options: &RenderOptions) -> String {
    let mut out = String::new();
    for (depth, node) in forest.walk() {
        out.push_str(&" ".repeat(depth * options.indent_width));
        out.push_str(&format_employee(&node, options));
        out.push('\n');
    }
    out
}

/// JSONに入れ子で出力できる階層数
pub const MAX_JSON_DEPTH: usize = 500;

/// 入れ子のJSONを生成
pub fn render_json(forest: &Forest) -> Result<String> {
    let depth = forest.walk().map(|(depth, _)| depth + 1).max().unwrap_or(0);
    if depth > MAX_JSON_DEPTH {
        return Err(OrgExplorerError::TooDeep {
            depth,
            limit: MAX_JSON_DEPTH,
        });
    }
    Ok(serde_json::to_string_pretty(&forest.to_trees())?)
}

pub fn render(forest: &Forest, format: OutputFormat, options: &RenderOptions) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(forest, options)),
        OutputFormat::Json => render_json(forest),
    }
}

/// 件数の要約
pub fn summary(forest: &Forest) -> String {
    match forest.len() {
        0 => "該当する社員がいません。条件を見直してください".to_string(),
        n => format!("{}名を表示", n),
    }
}
