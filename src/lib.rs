//! org-explorer
//!
//! 社員名簿（Excel/CSV/JSON）を読み込み、組織図の表示・検索・絞り込み・出力を行う。
//! 組織図の処理そのものは `org_explorer_common` にある。

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod interactive;
pub mod reader;
pub mod render;
