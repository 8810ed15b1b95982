//! 組織図の全文検索
//!
//! 名前・職種・部署にクエリを含む社員を探し、その上司の連なりと
//! 配下の全社員を残した組織図を返す。

use crate::hierarchy::{name_index, Forest, NodeId};
use crate::types::EmployeeRecord;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// 名前・職種・部署のいずれかにクエリを含むか（大文字小文字を区別しない）
///
/// `query` は小文字化・trim済みであること。
fn contains_query(record: &EmployeeRecord, query: &str) -> bool {
    record.name.to_lowercase().contains(query)
        || record.job_title.to_lowercase().contains(query)
        || record.department.to_lowercase().contains(query)
}

/// 検索で残す社員名の集合を求める
///
/// 一致した社員、その上司を辿った全員、配下の全員を含む。
/// 上司の参照が循環していても、各経路は訪問済みの名前で打ち切る。
pub fn retained_names(all_records: &[EmployeeRecord], query: &str) -> HashSet<String> {
    let query = query.trim().to_lowercase();
    let mut retained: HashSet<String> = HashSet::new();
    if query.is_empty() {
        return retained;
    }

    let index = name_index(all_records);
    let mut reports_by_manager: HashMap<&str, Vec<&str>> = HashMap::new();
    for record in all_records {
        reports_by_manager
            .entry(record.manager.as_str())
            .or_default()
            .push(record.name.as_str());
    }

    let mut expanded: HashSet<&str> = HashSet::new();
    let mut matches = 0usize;

    for record in all_records.iter().filter(|r| contains_query(r, &query)) {
        matches += 1;
        retained.insert(record.name.clone());

        // 上司を辿る
        let mut seen: HashSet<&str> = HashSet::new();
        let mut current = record.manager.as_str();
        while !current.trim().is_empty() && seen.insert(current) {
            retained.insert(current.to_string());
            match index.get(current) {
                Some(&i) => current = all_records[i].manager.as_str(),
                None => break,
            }
        }

        // 配下を辿る
        let mut stack = vec![record.name.as_str()];
        while let Some(name) = stack.pop() {
            if !expanded.insert(name) {
                continue;
            }
            if let Some(reports) = reports_by_manager.get(name) {
                for &report in reports {
                    retained.insert(report.to_string());
                    if !expanded.contains(report) {
                        stack.push(report);
                    }
                }
            }
        }
    }

    debug!(query = %query, matches, retained = retained.len(), "検索対象を抽出");
    retained
}

/// 検索クエリで組織図を絞り込む
///
/// クエリが空なら `forest` をそのまま返す。一致がなければ空のフォレスト。
/// 残すかどうかは `all_records` 全体の上司関係で判定するので、
/// 他の条件で絞り込む前に呼ぶこと。
pub fn expand_to_hierarchy(forest: &Forest, all_records: &[EmployeeRecord], query: &str) -> Forest {
    if query.trim().is_empty() {
        return forest.clone();
    }

    let retained = retained_names(all_records, query);
    if retained.is_empty() {
        return forest.derive_empty();
    }

    prune_by_names(forest, &retained)
}

/// 名前が集合に含まれるノードだけを残す（親が残らなければ子も残らない）
fn prune_by_names(forest: &Forest, retained: &HashSet<String>) -> Forest {
    let keep = |id: NodeId| retained.contains(&forest.record(id).name);

    let mut reports: Vec<Vec<NodeId>> = vec![Vec::new(); forest.arena_len()];
    let mut visited = vec![false; forest.arena_len()];

    let roots: Vec<NodeId> = forest.root_ids().iter().copied().filter(|&id| keep(id)).collect();

    let mut stack: Vec<NodeId> = roots.clone();
    while let Some(id) = stack.pop() {
        if std::mem::replace(&mut visited[id.index()], true) {
            continue;
        }
        let kept: Vec<NodeId> = forest
            .reports_of(id)
            .iter()
            .copied()
            .filter(|&child| keep(child))
            .collect();
        stack.extend(kept.iter().copied().filter(|child| !visited[child.index()]));
        reports[id.index()] = kept;
    }

    forest.derive(roots, reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::build_hierarchy;

    fn emp(name: &str, manager: &str, title: &str, department: &str) -> EmployeeRecord {
        EmployeeRecord {
            id: format!("emp_{}", name),
            name: name.to_string(),
            manager: manager.to_string(),
            job_title: title.to_string(),
            department: department.to_string(),
            ..Default::default()
        }
    }

    fn sample() -> Vec<EmployeeRecord> {
        vec![
            emp("Alice", "", "CEO", "Board"),
            emp("Bob", "Alice", "CTO", "Technology"),
            emp("Carol", "Bob", "Software Engineer", "Technology"),
            emp("Dan", "Carol", "Intern", "Technology"),
            emp("Erin", "Alice", "CFO", "Finance"),
            emp("Frank", "Erin", "Accountant", "Finance"),
        ]
    }

    fn names(forest: &Forest) -> Vec<String> {
        forest.walk().map(|(_, n)| n.name().to_string()).collect()
    }

    #[test]
    fn test_blank_query_returns_forest() {
        let records = sample();
        let forest = build_hierarchy(&records);
        let result = expand_to_hierarchy(&forest, &records, "   ");
        assert_eq!(result, forest);
    }

    #[test]
    fn test_chain_keeps_ancestors() {
        let records = vec![emp("A", "", "", ""), emp("B", "A", "", ""), emp("C", "B", "", "")];
        let forest = build_hierarchy(&records);
        let result = expand_to_hierarchy(&forest, &records, "C");
        assert_eq!(names(&result), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_match_keeps_descendants_and_drops_siblings() {
        let records = sample();
        let forest = build_hierarchy(&records);
        let result = expand_to_hierarchy(&forest, &records, "engineer");
        assert_eq!(names(&result), vec!["Alice", "Bob", "Carol", "Dan"]);
    }

    #[test]
    fn test_department_match() {
        let records = sample();
        let forest = build_hierarchy(&records);
        let result = expand_to_hierarchy(&forest, &records, "FINANCE");
        assert_eq!(names(&result), vec!["Alice", "Erin", "Frank"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let records = sample();
        let forest = build_hierarchy(&records);
        let result = expand_to_hierarchy(&forest, &records, "astronaut");
        assert!(result.is_empty());
        assert_eq!(result.len(), 0);
    }

    #[test]
    fn test_search_does_not_use_fuzzy_matching() {
        let records = sample();
        let forest = build_hierarchy(&records);
        assert!(expand_to_hierarchy(&forest, &records, "enginer").is_empty());
    }

    #[test]
    fn test_two_cycle_terminates() {
        let records = vec![emp("A", "B", "", ""), emp("B", "A", "", ""), emp("Root", "", "", "")];
        let retained = retained_names(&records, "a");
        assert!(retained.contains("A"));
        assert!(retained.contains("B"));

        let forest = build_hierarchy(&records);
        let result = expand_to_hierarchy(&forest, &records, "a");
        assert!(result.is_empty());
    }

    #[test]
    fn test_self_manager_terminates() {
        let records = vec![emp("Solo", "Solo", "Engineer", "")];
        let retained = retained_names(&records, "engineer");
        assert_eq!(retained.len(), 1);
    }

    #[test]
    fn test_unresolved_manager_name_is_retained() {
        let records = vec![emp("A", "Ghost", "Engineer", "")];
        let retained = retained_names(&records, "engineer");
        assert!(retained.contains("Ghost"));

        let forest = build_hierarchy(&records);
        let result = expand_to_hierarchy(&forest, &records, "engineer");
        assert_eq!(names(&result), vec!["A"]);
    }

    #[test]
    fn test_source_forest_untouched() {
        let records = sample();
        let forest = build_hierarchy(&records);
        let before = forest.to_trees();
        let _ = expand_to_hierarchy(&forest, &records, "intern");
        assert_eq!(forest.to_trees(), before);
    }

    #[test]
    fn test_search_on_already_pruned_forest() {
        let records = sample();
        let forest = build_hierarchy(&records);
        let finance = expand_to_hierarchy(&forest, &records, "finance");
        let result = expand_to_hierarchy(&finance, &records, "intern");
        assert_eq!(names(&result), vec!["Alice"]);
    }
}
