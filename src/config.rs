use crate::error::{OrgExplorerError, Result};
use crate::render::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 設定ファイルの場所を上書きする環境変数
pub const CONFIG_ENV: &str = "ORG_EXPLORER_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 組織図の出力形式
    pub output_format: OutputFormat,
    /// 職種以外（部署・事業所・SAP）も表示する
    pub show_details: bool,
    /// 階層1段あたりのインデント幅
    pub indent_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::Text,
            show_details: true,
            indent_width: 2,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            if !path.trim().is_empty() {
                return Ok(PathBuf::from(path));
            }
        }

        let home = dirs::home_dir()
            .ok_or_else(|| OrgExplorerError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("org-explorer").join("config.json"))
    }
}
