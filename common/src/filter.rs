//! 条件による組織図の絞り込み
//!
//! 条件に一致する社員と、一致する部下を持つ上司だけを残す。
//! 一致しない兄弟は付け直さない。

use crate::hierarchy::{Forest, NodeId};
use crate::matcher::fuzzy_match;
use crate::types::{EmployeeRecord, FilterCriteria, JobTitleMode};
use tracing::debug;

/// 社員が条件にすべて一致するか
pub fn matches_criteria(record: &EmployeeRecord, criteria: &FilterCriteria) -> bool {
    let matches_office = criteria.office.is_empty() || record.office == criteria.office;
    let matches_department =
        criteria.department.is_empty() || record.department == criteria.department;
    let matches_manager = criteria.manager.is_empty() || record.manager == criteria.manager;
    let matches_sap_user = criteria.sap_user.accepts(record.sap_user);

    matches_office
        && matches_department
        && matches_manager
        && matches_sap_user
        && matches_job_title(&record.job_title, criteria)
}

fn matches_job_title(job_title: &str, criteria: &FilterCriteria) -> bool {
    match criteria.job_title_mode {
        JobTitleMode::Text if !criteria.job_title_text.trim().is_empty() => {
            fuzzy_match(job_title, &criteria.job_title_text)
        }
        JobTitleMode::Keywords if !criteria.job_title_keywords.is_empty() => {
            let title = job_title.to_lowercase();
            criteria
                .job_title_keywords
                .iter()
                .all(|keyword| title.contains(&keyword.to_lowercase()))
        }
        _ => true,
    }
}

enum Visit {
    Enter(NodeId),
    Exit(NodeId),
}

/// 条件で組織図を絞り込む
///
/// 部下を先に絞り込み、社員自身が一致するか、絞り込み後の部下が1人以上いれば残す。
/// 部下の並び順は変えない。
pub fn apply_filters(forest: &Forest, criteria: &FilterCriteria) -> Forest {
    let n = forest.arena_len();
    let mut reports: Vec<Vec<NodeId>> = vec![Vec::new(); n];
    let mut retained = vec![false; n];
    let mut visited = vec![false; n];
    let mut roots = Vec::new();

    for &root in forest.root_ids() {
        let mut stack = vec![Visit::Enter(root)];

        while let Some(visit) = stack.pop() {
            match visit {
                Visit::Enter(id) => {
                    if std::mem::replace(&mut visited[id.index()], true) {
                        continue;
                    }
                    stack.push(Visit::Exit(id));
                    for &child in forest.reports_of(id).iter().rev() {
                        if !visited[child.index()] {
                            stack.push(Visit::Enter(child));
                        }
                    }
                }
                Visit::Exit(id) => {
                    let kept: Vec<NodeId> = forest
                        .reports_of(id)
                        .iter()
                        .copied()
                        .filter(|child| retained[child.index()])
                        .collect();

                    if !kept.is_empty() || matches_criteria(forest.record(id), criteria) {
                        retained[id.index()] = true;
                        reports[id.index()] = kept;
                    }
                }
            }
        }

        if retained[root.index()] {
            roots.push(root);
        }
    }

    let result = forest.derive(roots, reports);
    debug!(before = forest.len(), after = result.len(), "条件で絞り込み");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::build_hierarchy;
    use crate::types::SapUserFilter;
    use proptest::prelude::*;

    fn emp(name: &str, manager: &str, office: &str, title: &str, sap_user: bool) -> EmployeeRecord {
        EmployeeRecord {
            id: format!("emp_{}", name),
            name: name.to_string(),
            manager: manager.to_string(),
            office: office.to_string(),
            job_title: title.to_string(),
            department: "Ops".to_string(),
            sap_user,
        }
    }

    fn sample() -> Vec<EmployeeRecord> {
        vec![
            emp("Alice", "", "London", "Managing Director", true),
            emp("Bob", "Alice", "Leeds", "Operations Manager", false),
            emp("Carol", "Bob", "Leeds", "Senior Software Engineer", true),
            emp("Dan", "Bob", "London", "Software Engineer", false),
            emp("Erin", "Alice", "London", "Data Analyst", false),
        ]
    }

    fn names(forest: &Forest) -> Vec<String> {
        forest.walk().map(|(_, n)| n.name().to_string()).collect()
    }

    #[test]
    fn test_wildcard_keeps_everything() {
        let forest = build_hierarchy(&sample());
        let result = apply_filters(&forest, &FilterCriteria::default());
        assert_eq!(result, forest);
    }

    #[test]
    fn test_no_match_is_empty() {
        let records = vec![
            emp("A", "", "", "", false),
            emp("B", "A", "", "", false),
            emp("C", "B", "", "", false),
        ];
        let forest = build_hierarchy(&records);
        let criteria = FilterCriteria {
            office: "X".to_string(),
            ..Default::default()
        };
        assert!(apply_filters(&forest, &criteria).is_empty());
    }

    #[test]
    fn test_structural_ancestors_kept() {
        let forest = build_hierarchy(&sample());
        let criteria = FilterCriteria {
            office: "Leeds".to_string(),
            ..Default::default()
        };
        let result = apply_filters(&forest, &criteria);
        // Aliceはロンドンだが、リーズの部下がいるので残る。Dan・Erinは残らない
        assert_eq!(names(&result), vec!["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn test_sap_user_filter() {
        let forest = build_hierarchy(&sample());
        let criteria = FilterCriteria {
            sap_user: SapUserFilter::No,
            ..Default::default()
        };
        let result = apply_filters(&forest, &criteria);
        assert_eq!(names(&result), vec!["Alice", "Bob", "Dan", "Erin"]);
    }

    #[test]
    fn test_job_title_text_uses_fuzzy_match() {
        let forest = build_hierarchy(&sample());
        let criteria = FilterCriteria {
            job_title_text: "enginer".to_string(),
            ..Default::default()
        };
        let result = apply_filters(&forest, &criteria);
        assert_eq!(names(&result), vec!["Alice", "Bob", "Carol", "Dan"]);
    }

    #[test]
    fn test_keywords_require_all() {
        let forest = build_hierarchy(&sample());
        let criteria = FilterCriteria {
            job_title_mode: JobTitleMode::Keywords,
            job_title_keywords: vec!["Software".to_string(), "senior".to_string()],
            job_title_text: "analyst".to_string(),
            ..Default::default()
        };
        let result = apply_filters(&forest, &criteria);
        assert_eq!(names(&result), vec!["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn test_text_ignored_in_keyword_mode_without_selection() {
        let forest = build_hierarchy(&sample());
        let criteria = FilterCriteria {
            job_title_mode: JobTitleMode::Keywords,
            job_title_text: "analyst".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&forest, &criteria), forest);
    }

    #[test]
    fn test_manager_criterion() {
        let forest = build_hierarchy(&sample());
        let criteria = FilterCriteria {
            manager: "Bob".to_string(),
            ..Default::default()
        };
        let result = apply_filters(&forest, &criteria);
        assert_eq!(names(&result), vec!["Alice", "Bob", "Carol", "Dan"]);
        let bob = result.roots().next().unwrap().direct_reports().next().unwrap();
        assert_eq!(bob.report_count(), 2);
    }

    #[test]
    fn test_source_forest_untouched() {
        let forest = build_hierarchy(&sample());
        let criteria = FilterCriteria {
            office: "Leeds".to_string(),
            ..Default::default()
        };
        let first = apply_filters(&forest, &criteria);
        assert_eq!(forest.len(), 5);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let records: Vec<EmployeeRecord> = (0..100_000)
            .map(|i| {
                let manager = if i == 0 { String::new() } else { format!("E{}", i - 1) };
                emp(&format!("E{}", i), &manager, "", "", false)
            })
            .collect();
        let forest = build_hierarchy(&records);
        let criteria = FilterCriteria {
            office: "Nowhere".to_string(),
            ..Default::default()
        };
        assert!(apply_filters(&forest, &criteria).is_empty());
    }

    fn arb_records() -> impl Strategy<Value = Vec<EmployeeRecord>> {
        proptest::collection::vec(
            (0usize..12, 0usize..14, 0usize..3, any::<bool>(), 0usize..4),
            0..40,
        )
        .prop_map(|rows| {
            let titles = ["Software Engineer", "Data Analyst", "Sales Manager", "Intern"];
            rows.into_iter()
                .enumerate()
                .map(|(i, (name, manager, office, sap_user, title))| EmployeeRecord {
                    id: format!("emp_{}", i),
                    name: format!("P{}", name),
                    // 12は存在しない上司、13は上司なし
                    manager: match manager {
                        13 => String::new(),
                        m => format!("P{}", m),
                    },
                    office: ["London", "Leeds", "Paris"][office].to_string(),
                    department: String::new(),
                    job_title: titles[title].to_string(),
                    sap_user,
                })
                .collect()
        })
    }

    fn arb_criteria() -> impl Strategy<Value = FilterCriteria> {
        (0usize..4, 0usize..3, any::<bool>()).prop_map(|(office, sap, keywords)| {
            let mut criteria = FilterCriteria {
                office: ["", "London", "Leeds", "Paris"][office].to_string(),
                sap_user: [SapUserFilter::Any, SapUserFilter::Yes, SapUserFilter::No][sap],
                ..Default::default()
            };
            if keywords {
                criteria.job_title_mode = JobTitleMode::Keywords;
                criteria.job_title_keywords = vec!["engineer".to_string()];
            }
            criteria
        })
    }

    proptest! {
        #[test]
        fn filtering_is_idempotent(records in arb_records(), criteria in arb_criteria()) {
            let forest = build_hierarchy(&records);
            let once = apply_filters(&forest, &criteria);
            let twice = apply_filters(&once, &criteria);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn wildcard_filter_is_identity(records in arb_records()) {
            let forest = build_hierarchy(&records);
            let result = apply_filters(&forest, &FilterCriteria::default());
            prop_assert_eq!(result, forest);
        }

        #[test]
        fn every_retained_node_matches_or_has_reports(
            records in arb_records(),
            criteria in arb_criteria(),
        ) {
            let forest = build_hierarchy(&records);
            let result = apply_filters(&forest, &criteria);
            for (_, node) in result.walk() {
                prop_assert!(node.report_count() > 0 || matches_criteria(node.record(), &criteria));
            }
        }
    }
}
