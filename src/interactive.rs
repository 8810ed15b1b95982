//! 対話式の組織図閲覧
//!
//! メニューから検索語・事業所・部署・上司・SAP・職種を設定し、
//! そのたびに絞り込んだ組織図を表示する。

use crate::error::{OrgExplorerError, Result};
use crate::render::{render_text, summary, RenderOptions};
use dialoguer::{Input, MultiSelect, Select};
use org_explorer_common::{FilterCriteria, JobTitleMode, OrgChart, SapUserFilter};

const UNSET: &str = "(指定なし)";

/// メニューの操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExploreAction {
    Show,
    Search,
    Office,
    Department,
    Manager,
    SapUser,
    JobTitleText,
    JobTitleKeywords,
    Clear,
    Quit,
}

impl ExploreAction {
    pub const ALL: [ExploreAction; 10] = [
        ExploreAction::Show,
        ExploreAction::Search,
        ExploreAction::Office,
        ExploreAction::Department,
        ExploreAction::Manager,
        ExploreAction::SapUser,
        ExploreAction::JobTitleText,
        ExploreAction::JobTitleKeywords,
        ExploreAction::Clear,
        ExploreAction::Quit,
    ];

    /// 現在の設定値を添えたメニュー表示
    pub fn label(&self, criteria: &FilterCriteria) -> String {
        fn current(value: &str) -> &str {
            if value.is_empty() {
                UNSET
            } else {
                value
            }
        }

        match self {
            ExploreAction::Show => "組織図を表示".to_string(),
            ExploreAction::Search => format!("検索: {}", current(&criteria.search_query)),
            ExploreAction::Office => format!("事業所: {}", current(&criteria.office)),
            ExploreAction::Department => format!("部署: {}", current(&criteria.department)),
            ExploreAction::Manager => format!("上司: {}", current(&criteria.manager)),
            ExploreAction::SapUser => format!("SAPユーザー: {}", criteria.sap_user),
            ExploreAction::JobTitleText => {
                let text = match criteria.job_title_mode {
                    JobTitleMode::Text => current(&criteria.job_title_text),
                    JobTitleMode::Keywords => UNSET,
                };
                format!("職種（あいまい）: {}", text)
            }
            ExploreAction::JobTitleKeywords => {
                let keywords = match criteria.job_title_mode {
                    JobTitleMode::Keywords if !criteria.job_title_keywords.is_empty() => {
                        criteria.job_title_keywords.join(", ")
                    }
                    _ => UNSET.to_string(),
                };
                format!("職種（キーワード）: {}", keywords)
            }
            ExploreAction::Clear => "条件をすべて解除".to_string(),
            ExploreAction::Quit => "終了".to_string(),
        }
    }
}

/// 候補選択の項目（先頭は「指定なし」）と、現在値の位置
pub fn choice_items(values: &[String], current: &str) -> (Vec<String>, usize) {
    let mut items = Vec::with_capacity(values.len() + 1);
    items.push(UNSET.to_string());
    items.extend(values.iter().cloned());

    let selected = values
        .iter()
        .position(|v| v == current)
        .map(|i| i + 1)
        .unwrap_or(0);
    (items, selected)
}

/// 選択結果を条件値に戻す
pub fn choice_value(values: &[String], index: usize) -> String {
    match index {
        0 => String::new(),
        i => values.get(i - 1).cloned().unwrap_or_default(),
    }
}

/// キーワードモードに切り替えて選択を反映（テキスト条件は捨てる）
pub fn set_keywords(criteria: &mut FilterCriteria, keywords: Vec<String>) {
    criteria.job_title_mode = JobTitleMode::Keywords;
    criteria.job_title_text.clear();
    criteria.job_title_keywords = keywords;
}

/// キーワード選択の結果を反映する
///
/// 選べるキーワードがなかった場合は何も選んでいないので、条件を変えない。
pub fn apply_keyword_choice(
    criteria: &mut FilterCriteria,
    available: &[String],
    chosen: Vec<String>,
) {
    if available.is_empty() {
        return;
    }
    set_keywords(criteria, chosen);
}

/// テキストモードに切り替えて入力を反映（キーワードは捨てる）
pub fn set_job_title_text(criteria: &mut FilterCriteria, text: String) {
    criteria.job_title_mode = JobTitleMode::Text;
    criteria.job_title_keywords.clear();
    criteria.job_title_text = text;
}

fn prompt_error(e: dialoguer::Error) -> OrgExplorerError {
    OrgExplorerError::Prompt(e.to_string())
}

fn prompt_text(prompt: &str, initial: &str) -> Result<String> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_error)?;
    Ok(input.trim().to_string())
}

fn prompt_choice(prompt: &str, values: &[String], current: &str) -> Result<String> {
    let (items, selected) = choice_items(values, current);
    let index = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(selected)
        .interact()
        .map_err(prompt_error)?;
    Ok(choice_value(values, index))
}

fn prompt_sap_user(current: SapUserFilter) -> Result<SapUserFilter> {
    let options = [SapUserFilter::Any, SapUserFilter::Yes, SapUserFilter::No];
    let items = ["すべて", "SAPユーザーのみ", "SAPユーザー以外"];
    let selected = options.iter().position(|o| *o == current).unwrap_or(0);
    let index = Select::new()
        .with_prompt("SAPユーザー")
        .items(&items)
        .default(selected)
        .interact()
        .map_err(prompt_error)?;
    Ok(options[index])
}

fn prompt_keywords(keywords: &[String], criteria: &FilterCriteria) -> Result<Vec<String>> {
    if keywords.is_empty() {
        println!("  2回以上出現する職種キーワードがありません");
        return Ok(Vec::new());
    }
    let defaults: Vec<bool> = keywords
        .iter()
        .map(|k| criteria.job_title_keywords.contains(k))
        .collect();
    let chosen = MultiSelect::new()
        .with_prompt("職種キーワード（スペースで選択、Enterで確定）")
        .items(keywords)
        .defaults(&defaults)
        .interact()
        .map_err(prompt_error)?;
    Ok(chosen.into_iter().map(|i| keywords[i].clone()).collect())
}

fn show(chart: &OrgChart, criteria: &FilterCriteria, options: &RenderOptions) {
    let view = chart.view(criteria);
    println!();
    print!("{}", render_text(&view, options));
    println!("\n{}\n", summary(&view));
}

/// 対話式で組織図を絞り込む
pub fn run_interactive(chart: &OrgChart, options: &RenderOptions) -> Result<FilterCriteria> {
    let facets = chart.facets();
    let keywords = chart.keywords();
    let mut criteria = FilterCriteria::default();

    println!("👥 {}名を読み込みました", chart.records().len());
    show(chart, &criteria, options);

    loop {
        let labels: Vec<String> = ExploreAction::ALL
            .iter()
            .map(|a| a.label(&criteria))
            .collect();
        let index = Select::new()
            .with_prompt("操作を選択")
            .items(&labels)
            .default(0)
            .interact()
            .map_err(prompt_error)?;

        match ExploreAction::ALL[index] {
            ExploreAction::Show => {
                show(chart, &criteria, options);
                continue;
            }
            ExploreAction::Search => {
                criteria.search_query = prompt_text("検索語（名前・職種・部署）", &criteria.search_query)?;
            }
            ExploreAction::Office => {
                criteria.office = prompt_choice("事業所", &facets.offices, &criteria.office)?;
            }
            ExploreAction::Department => {
                criteria.department =
                    prompt_choice("部署", &facets.departments, &criteria.department)?;
            }
            ExploreAction::Manager => {
                criteria.manager = prompt_choice("上司", &facets.managers, &criteria.manager)?;
            }
            ExploreAction::SapUser => {
                criteria.sap_user = prompt_sap_user(criteria.sap_user)?;
            }
            ExploreAction::JobTitleText => {
                let text = prompt_text("職種（あいまい一致）", &criteria.job_title_text)?;
                set_job_title_text(&mut criteria, text);
            }
            ExploreAction::JobTitleKeywords => {
                let chosen = prompt_keywords(&keywords, &criteria)?;
                apply_keyword_choice(&mut criteria, &keywords, chosen);
            }
            ExploreAction::Clear => {
                criteria.clear();
                println!("  → 条件を解除しました");
            }
            ExploreAction::Quit => break,
        }

        show(chart, &criteria, options);
    }

    Ok(criteria)
}
