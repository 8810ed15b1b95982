//! 組織階層モジュール
//!
//! 社員レコードの上司名から組織図（フォレスト）を構築する。
//!
//! ノードはアリーナ（`Arc<[EmployeeRecord]>`）に格納し、`NodeId` で参照する。
//! 部下リストとルートリストはフォレストごとに持つので、検索・絞り込みは
//! アリーナを共有したまま新しいフォレストを返せる。元の組織図は変更されない。

use crate::types::EmployeeRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// アリーナ内のノード番号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// 組織図のフォレスト
#[derive(Debug, Clone)]
pub struct Forest {
    /// 社員名ごとに1ノード（同名は最後の出現）
    nodes: Arc<[EmployeeRecord]>,
    /// ノードごとの部下リスト（入力順）
    reports: Vec<Vec<NodeId>>,
    roots: Vec<NodeId>,
}

impl Default for Forest {
    fn default() -> Self {
        Self::empty()
    }
}

impl Forest {
    pub fn empty() -> Self {
        Self {
            nodes: Arc::from(Vec::new()),
            reports: Vec::new(),
            roots: Vec::new(),
        }
    }

    /// 同じアリーナを共有する派生フォレストを作る
    pub(crate) fn derive(&self, roots: Vec<NodeId>, reports: Vec<Vec<NodeId>>) -> Self {
        debug_assert_eq!(reports.len(), self.nodes.len());
        Self {
            nodes: Arc::clone(&self.nodes),
            reports,
            roots,
        }
    }

    /// 空のフォレスト（同じアリーナ）
    pub(crate) fn derive_empty(&self) -> Self {
        self.derive(Vec::new(), vec![Vec::new(); self.nodes.len()])
    }

    pub(crate) fn arena_len(&self) -> usize {
        self.nodes.len()
    }

    pub fn root_ids(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn roots(&self) -> impl Iterator<Item = EmployeeNode<'_>> + '_ {
        self.roots.iter().map(move |&id| self.node(id))
    }

    pub fn node(&self, id: NodeId) -> EmployeeNode<'_> {
        EmployeeNode { forest: self, id }
    }

    pub fn record(&self, id: NodeId) -> &EmployeeRecord {
        &self.nodes[id.0]
    }

    pub fn reports_of(&self, id: NodeId) -> &[NodeId] {
        self.reports.get(id.0).map(Vec::as_slice).unwrap_or(&[])
    }

    /// ルートがなければ空
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// ルートから到達できる社員数
    pub fn len(&self) -> usize {
        self.walk().count()
    }

    /// 深さ優先（行きがけ順）で (深さ, ノード) を返す。各ノードは1回だけ
    pub fn walk(&self) -> Walk<'_> {
        let stack = self.roots.iter().rev().map(|&id| (0, id)).collect();
        Walk {
            forest: self,
            stack,
            visited: vec![false; self.nodes.len()],
        }
    }

    /// 入れ子構造に変換（JSON出力用）
    ///
    /// 明示的なスタックで帰りがけに組み立てるので、深い階層でもスタックを消費しない。
    pub fn to_trees(&self) -> Vec<EmployeeTree> {
        enum Visit {
            Enter(NodeId),
            Exit(NodeId, usize),
        }

        let mut visited = vec![false; self.nodes.len()];
        let mut built: Vec<EmployeeTree> = Vec::new();
        let mut stack: Vec<Visit> = self.roots.iter().rev().map(|&id| Visit::Enter(id)).collect();

        while let Some(visit) = stack.pop() {
            match visit {
                Visit::Enter(id) => {
                    if std::mem::replace(&mut visited[id.0], true) {
                        continue;
                    }
                    stack.push(Visit::Exit(id, built.len()));
                    for &child in self.reports_of(id).iter().rev() {
                        if !visited[child.0] {
                            stack.push(Visit::Enter(child));
                        }
                    }
                }
                Visit::Exit(id, first_child) => {
                    let direct_reports = built.split_off(first_child);
                    built.push(EmployeeTree {
                        record: self.record(id).clone(),
                        direct_reports,
                    });
                }
            }
        }

        built
    }
}

/// 行きがけ順の (深さ, レコード) が同じなら等しい
impl PartialEq for Forest {
    fn eq(&self, other: &Self) -> bool {
        self.walk()
            .map(|(depth, node)| (depth, node.record()))
            .eq(other.walk().map(|(depth, node)| (depth, node.record())))
    }
}

/// フォレスト内のノードへの参照
#[derive(Clone, Copy)]
pub struct EmployeeNode<'a> {
    forest: &'a Forest,
    id: NodeId,
}

impl<'a> EmployeeNode<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn record(&self) -> &'a EmployeeRecord {
        self.forest.record(self.id)
    }

    pub fn name(&self) -> &'a str {
        &self.record().name
    }

    pub fn direct_reports(&self) -> impl Iterator<Item = EmployeeNode<'a>> + 'a {
        let forest = self.forest;
        forest.reports_of(self.id).iter().map(move |&id| forest.node(id))
    }

    pub fn report_count(&self) -> usize {
        self.forest.reports_of(self.id).len()
    }
}

impl std::fmt::Debug for EmployeeNode<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmployeeNode")
            .field("id", &self.id)
            .field("name", &self.name())
            .field("reports", &self.report_count())
            .finish()
    }
}

/// 行きがけ順イテレータ
pub struct Walk<'a> {
    forest: &'a Forest,
    stack: Vec<(usize, NodeId)>,
    visited: Vec<bool>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, EmployeeNode<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((depth, id)) = self.stack.pop() {
            if std::mem::replace(&mut self.visited[id.0], true) {
                continue;
            }
            for &child in self.forest.reports_of(id).iter().rev() {
                if !self.visited[child.0] {
                    self.stack.push((depth + 1, child));
                }
            }
            return Some((depth, self.forest.node(id)));
        }
        None
    }
}

/// 入れ子の社員ツリー
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeTree {
    #[serde(flatten)]
    pub record: EmployeeRecord,
    #[serde(default)]
    pub direct_reports: Vec<EmployeeTree>,
}

impl EmployeeTree {
    /// 行きがけ順のレコード列に戻す
    pub fn flatten(trees: Vec<EmployeeTree>) -> Vec<EmployeeRecord> {
        let mut records = Vec::new();
        let mut stack: Vec<EmployeeTree> = trees.into_iter().rev().collect();
        while let Some(mut tree) = stack.pop() {
            stack.extend(std::mem::take(&mut tree.direct_reports).into_iter().rev());
            records.push(std::mem::take(&mut tree.record));
        }
        records
    }
}

// 深いツリーの再帰的な解放を避ける
impl Drop for EmployeeTree {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.direct_reports);
        while let Some(mut tree) = stack.pop() {
            stack.append(&mut tree.direct_reports);
        }
    }
}

/// 社員名 → レコード位置（同名は最後の出現）
pub(crate) fn name_index(records: &[EmployeeRecord]) -> HashMap<&str, usize> {
    let mut index = HashMap::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        index.insert(record.name.as_str(), i);
    }
    index
}

/// レコード列から組織図を構築する
///
/// - 上司名が空、または名簿に存在しない社員はルートになる
/// - 部下の並びは入力順
/// - 同名の社員は最後のレコードだけがノードになる
/// - 自分自身を上司にした社員は自分の部下リストに入り、ルートからは到達できない
///   （2人以上の循環も同様）
pub fn build_hierarchy(records: &[EmployeeRecord]) -> Forest {
    let index = name_index(records);

    let winners: Vec<usize> = (0..records.len())
        .filter(|&i| index.get(records[i].name.as_str()) == Some(&i))
        .collect();

    let mut node_of: Vec<Option<NodeId>> = vec![None; records.len()];
    for (n, &i) in winners.iter().enumerate() {
        node_of[i] = Some(NodeId(n));
    }

    let nodes: Vec<EmployeeRecord> = winners.iter().map(|&i| records[i].clone()).collect();
    let mut reports: Vec<Vec<NodeId>> = vec![Vec::new(); nodes.len()];
    let mut roots = Vec::new();
    let mut dangling = 0usize;

    for (n, &i) in winners.iter().enumerate() {
        let record = &records[i];
        let id = NodeId(n);

        let manager = if record.has_manager() {
            index
                .get(record.manager.as_str())
                .and_then(|&m| node_of[m])
        } else {
            None
        };

        match manager {
            Some(manager) => reports[manager.0].push(id),
            None => {
                if record.has_manager() {
                    dangling += 1;
                }
                roots.push(id);
            }
        }
    }

    debug!(
        records = records.len(),
        nodes = nodes.len(),
        duplicates = records.len() - nodes.len(),
        roots = roots.len(),
        dangling,
        "組織図を構築"
    );

    Forest {
        nodes: Arc::from(nodes),
        reports,
        roots,
    }
}
