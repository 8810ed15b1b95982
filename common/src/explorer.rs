//! 組織図の閲覧セッション
//!
//! 取り込んだレコードと元の組織図を保持し、条件ごとに表示用の組織図を作る。
//! 検索 → 条件絞り込みの順で適用する。

use crate::facets::FacetValues;
use crate::filter::apply_filters;
use crate::hierarchy::{build_hierarchy, Forest};
use crate::matcher::extract_keywords;
use crate::search::expand_to_hierarchy;
use crate::types::{EmployeeRecord, FilterCriteria};

#[derive(Debug, Clone)]
pub struct OrgChart {
    records: Vec<EmployeeRecord>,
    forest: Forest,
}

impl OrgChart {
    pub fn new(records: Vec<EmployeeRecord>) -> Self {
        let forest = build_hierarchy(&records);
        Self { records, forest }
    }

    pub fn records(&self) -> &[EmployeeRecord] {
        &self.records
    }

    /// 絞り込み前の組織図
    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    /// 条件を適用した組織図
    pub fn view(&self, criteria: &FilterCriteria) -> Forest {
        let searched = expand_to_hierarchy(&self.forest, &self.records, &criteria.search_query);
        apply_filters(&searched, criteria)
    }

    /// 全社員の職種から抽出したキーワード
    pub fn keywords(&self) -> Vec<String> {
        extract_keywords(self.records.iter().map(|r| r.job_title.as_str()))
    }

    pub fn facets(&self) -> FacetValues {
        FacetValues::from_records(&self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SapUserFilter;

    fn emp(name: &str, manager: &str, title: &str, sap_user: bool) -> EmployeeRecord {
        EmployeeRecord {
            id: format!("emp_{}", name),
            name: name.to_string(),
            manager: manager.to_string(),
            job_title: title.to_string(),
            sap_user,
            ..Default::default()
        }
    }

    fn chart() -> OrgChart {
        OrgChart::new(vec![
            emp("Alice", "", "Chief Executive", true),
            emp("Bob", "Alice", "Engineering Manager", false),
            emp("Carol", "Bob", "Software Engineer", true),
            emp("Dan", "Bob", "Software Engineer", false),
            emp("Erin", "Alice", "Finance Manager", true),
        ])
    }

    fn names(forest: &Forest) -> Vec<String> {
        forest.walk().map(|(_, n)| n.name().to_string()).collect()
    }

    #[test]
    fn test_default_view_is_full_chart() {
        let chart = chart();
        assert_eq!(chart.view(&FilterCriteria::default()), *chart.forest());
    }

    #[test]
    fn test_search_then_filter() {
        let chart = chart();
        let criteria = FilterCriteria {
            search_query: "bob".to_string(),
            sap_user: SapUserFilter::Yes,
            ..Default::default()
        };
        // 検索でAlice・Bob・Carol・Danが残り、SAP条件でCarolだけが一致する
        assert_eq!(names(&chart.view(&criteria)), vec!["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn test_keywords_and_facets() {
        let chart = chart();
        assert_eq!(chart.keywords(), vec!["manager", "software", "engineer"]);
        assert_eq!(chart.facets().managers, vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_forest_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Forest>();
        assert_send_sync::<OrgChart>();
    }
}
