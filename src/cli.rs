use crate::export::ExportFormat;
use crate::render::OutputFormat;
use clap::{Args, Parser, Subcommand};
use org_explorer_common::{FilterCriteria, JobTitleMode, SapUserFilter};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "org-explorer")]
#[command(about = "社員名簿から組織図を構築・検索・絞り込みするツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// 絞り込み条件（各コマンド共通）
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// 検索語（名前・職種・部署の部分一致。上司と配下も表示）
    #[arg(short = 'q', long)]
    pub search: Option<String>,

    /// 事業所（完全一致）
    #[arg(long)]
    pub office: Option<String>,

    /// 部署（完全一致）
    #[arg(long)]
    pub department: Option<String>,

    /// 上司名（完全一致）
    #[arg(long)]
    pub manager: Option<String>,

    /// SAPユーザー (all/true/false)
    #[arg(long, default_value = "all")]
    pub sap_user: SapUserFilter,

    /// 職種（あいまい一致）
    #[arg(short = 'j', long, conflicts_with = "keyword")]
    pub job_title: Option<String>,

    /// 職種キーワード（複数指定で全一致）
    #[arg(short = 'k', long)]
    pub keyword: Vec<String>,
}

impl FilterArgs {
    pub fn to_criteria(&self) -> FilterCriteria {
        let mut criteria = FilterCriteria {
            office: self.office.clone().unwrap_or_default(),
            department: self.department.clone().unwrap_or_default(),
            manager: self.manager.clone().unwrap_or_default(),
            sap_user: self.sap_user,
            search_query: self.search.clone().unwrap_or_default(),
            ..Default::default()
        };

        if self.keyword.is_empty() {
            criteria.job_title_mode = JobTitleMode::Text;
            criteria.job_title_text = self.job_title.clone().unwrap_or_default();
        } else {
            criteria.job_title_mode = JobTitleMode::Keywords;
            criteria.job_title_keywords = self.keyword.clone();
        }

        criteria
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// 組織図を表示
    Tree {
        /// 社員名簿（xlsx/xls/ods/csv/json）
        #[arg(required = true)]
        input: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,

        /// 出力形式 (text/json)。省略時は設定ファイルの値
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// 職種の頻出キーワードを表示
    Keywords {
        /// 社員名簿
        #[arg(required = true)]
        input: PathBuf,
    },

    /// 事業所・部署・上司の一覧を表示
    Facets {
        /// 社員名簿
        #[arg(required = true)]
        input: PathBuf,
    },

    /// 絞り込んだ組織図をファイルに出力
    Export {
        /// 社員名簿
        #[arg(required = true)]
        input: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,

        /// 出力形式 (excel/json)
        #[arg(short, long, default_value = "excel")]
        format: ExportFormat,

        /// 出力ファイル/ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// ドキュメントタイトル
        #[arg(short, long, default_value = "組織図")]
        title: String,
    },

    /// 対話式で組織図を絞り込む
    Explore {
        /// 社員名簿
        #[arg(required = true)]
        input: PathBuf,
    },

    /// 設定を表示/編集
    Config {
        /// 既定の出力形式を設定 (text/json)
        #[arg(long)]
        set_format: Option<OutputFormat>,

        /// 部署・事業所・SAPの表示を切り替え
        #[arg(long)]
        show_details: Option<bool>,

        /// インデント幅を設定
        #[arg(long)]
        indent_width: Option<usize>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
