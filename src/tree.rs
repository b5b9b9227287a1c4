use std::collections::HashMap;

use crate::model::{DatasetKind, Record};

/// A dataset row and, for filesystems and volumes, its snapshots.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeNode {
    /// Position in the tool output; sorting always starts from this order.
    pub seq: usize,
    pub record: Record,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn leaf(seq: usize, record: Record) -> Self {
        Self {
            seq,
            record,
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.record.name()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DatasetTree {
    pub nodes: Vec<TreeNode>,
}

/// Rows the builder could not place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Snapshots whose filesystem is not part of the same listing. Dropped.
    pub orphans: Vec<String>,
    /// Bookmarks are listed by `-t all` but not shown.
    pub bookmarks: Vec<String>,
}

impl BuildReport {
    pub fn is_clean(&self) -> bool {
        self.orphans.is_empty()
    }
}

impl DatasetTree {
    /// Group `records` (in tool order) into filesystems with snapshot children.
    pub fn build(records: Vec<Record>) -> (Self, BuildReport) {
        let mut report = BuildReport::default();
        let mut nodes: Vec<TreeNode> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut snapshots = Vec::new();

        for (seq, record) in records.into_iter().enumerate() {
            match record.kind {
                DatasetKind::Filesystem | DatasetKind::Volume => {
                    index
                        .entry(record.name().to_string())
                        .or_insert(nodes.len());
                    nodes.push(TreeNode::leaf(seq, record));
                }
                DatasetKind::Snapshot => snapshots.push((seq, record)),
                DatasetKind::Bookmark => report.bookmarks.push(record.name().to_string()),
            }
        }

        for (seq, record) in snapshots {
            let parent = record.parent_name().and_then(|p| index.get(p)).copied();
            match parent {
                Some(i) => nodes[i].children.push(TreeNode::leaf(seq, record)),
                None => {
                    tracing::warn!(snapshot = record.name(), "dropping snapshot without parent");
                    report.orphans.push(record.name().to_string());
                }
            }
        }

        (Self { nodes }, report)
    }

    pub fn dataset_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn snapshot_count(&self) -> usize {
        self.nodes.iter().map(|n| n.children.len()).sum()
    }

    pub fn find(&self, name: &str) -> Option<&TreeNode> {
        self.nodes.iter().find(|n| n.name() == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.nodes.iter().map(TreeNode::name).collect()
    }
}

#[cfg(test)]
#[path = "tests/tree_tests.rs"]
mod tests;
