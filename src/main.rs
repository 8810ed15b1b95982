use anyhow::Context;
use clap::Parser;
use org_explorer::{cli, config, export, interactive, reader, render};
use cli::{Cli, Commands};
use config::Config;
use org_explorer_common::OrgChart;
use render::RenderOptions;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "org_explorer=debug,org_explorer_common=debug"
    } else {
        "org_explorer=info,org_explorer_common=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_chart(input: &Path) -> anyhow::Result<OrgChart> {
    let records = reader::load_employees(input)
        .with_context(|| format!("社員名簿を読み込めません: {}", input.display()))?;
    if records.is_empty() {
        warn!(path = %input.display(), "社員レコードがありません");
    }
    Ok(OrgChart::new(records))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load().context("設定ファイルを読み込めません")?;
    let options = RenderOptions {
        show_details: config.show_details,
        indent_width: config.indent_width,
    };

    match cli.command {
        Commands::Tree { input, filters, format } => {
            let chart = load_chart(&input)?;
            let criteria = filters.to_criteria();
            info!(?criteria, "組織図を表示");

            let view = chart.view(&criteria);
            let format = format.unwrap_or(config.output_format);
            print!("{}", render::render(&view, format, &options)?);

            if format == render::OutputFormat::Text {
                println!("\n{}", render::summary(&view));
            }
        }

        Commands::Keywords { input } => {
            let chart = load_chart(&input)?;
            let keywords = chart.keywords();

            if keywords.is_empty() {
                println!("2回以上出現する職種キーワードがありません");
            } else {
                println!("職種キーワード（出現回数順）:");
                for keyword in keywords {
                    println!("  {}", keyword);
                }
            }
        }

        Commands::Facets { input } => {
            let chart = load_chart(&input)?;
            let facets = chart.facets();

            println!("事業所 ({}):", facets.offices.len());
            for office in &facets.offices {
                println!("  {}", office);
            }
            println!("部署 ({}):", facets.departments.len());
            for department in &facets.departments {
                println!("  {}", department);
            }
            println!("上司 ({}):", facets.managers.len());
            for manager in &facets.managers {
                println!("  {}", manager);
            }
        }

        Commands::Export { input, filters, format, output, title } => {
            println!("📄 org-explorer - エクスポート\n");

            println!("[1/2] 社員名簿を読み込み中...");
            let chart = load_chart(&input)?;
            println!("✔ {}名を読み込み\n", chart.records().len());

            println!("[2/2] 組織図を出力中...");
            let view = chart.view(&filters.to_criteria());
            let output_dir = output.unwrap_or_else(|| std::path::PathBuf::from("."));
            let path = export::export_forest(&view, format, &output_dir, &title)?;
            println!("✔ {}名を出力: {}", view.len(), path.display());

            println!("\n✅ エクスポート完了");
        }

        Commands::Explore { input } => {
            let chart = load_chart(&input)?;
            let criteria = interactive::run_interactive(&chart, &options)?;
            if criteria.is_active() {
                info!(?criteria, "最後の絞り込み条件");
            }
        }

        Commands::Config { set_format, show_details, indent_width, show } => {
            let mut config = config;
            let changed = set_format.is_some() || show_details.is_some() || indent_width.is_some();

            if let Some(format) = set_format {
                config.output_format = format;
            }
            if let Some(show_details) = show_details {
                config.show_details = show_details;
            }
            if let Some(indent_width) = indent_width {
                config.indent_width = indent_width;
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("設定:");
                println!("  出力形式: {}", config.output_format);
                println!("  詳細表示: {}", if config.show_details { "あり" } else { "なし" });
                println!("  インデント幅: {}", config.indent_width);
            }
        }
    }

    Ok(())
}
