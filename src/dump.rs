use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::model::{Alignment, ColumnSpec};
use crate::tree::{DatasetTree, TreeNode};

const SNAPSHOT_INDENT: &str = "  ";

/// Plain-text rendering of the tree, one dataset per line with its snapshots
/// indented below it.
pub fn render_text(tree: &DatasetTree, columns: &ColumnSpec) -> String {
    let mut lines: Vec<Vec<String>> = vec![
        columns
            .columns()
            .iter()
            .map(|p| p.as_str().to_uppercase())
            .collect(),
    ];
    for node in &tree.nodes {
        lines.push(row_cells(node, columns, ""));
        for child in &node.children {
            lines.push(row_cells(child, columns, SNAPSHOT_INDENT));
        }
    }

    let widths: Vec<usize> = (0..columns.len())
        .map(|i| {
            lines
                .iter()
                .map(|l| l.get(i).map(|c| c.chars().count()).unwrap_or(0))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for line in &lines {
        let cells: Vec<String> = line
            .iter()
            .zip(columns.columns())
            .zip(&widths)
            .map(|((cell, p), w)| match p.alignment() {
                Alignment::Left => format!("{:<w$}", cell, w = *w),
                Alignment::Right => format!("{:>w$}", cell, w = *w),
            })
            .collect();
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
    }
    out
}

fn row_cells(node: &TreeNode, columns: &ColumnSpec, indent: &str) -> Vec<String> {
    (0..columns.len())
        .map(|i| {
            let display = node
                .record
                .cell(i)
                .map(|c| c.display.as_str())
                .unwrap_or("");
            if i == 0 {
                format!("{}{}", indent, display)
            } else {
                display.to_string()
            }
        })
        .collect()
}

#[derive(Debug, Serialize)]
struct DatasetJson<'a> {
    name: &'a str,
    kind: &'static str,
    properties: BTreeMap<&'a str, &'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    snapshots: Vec<DatasetJson<'a>>,
}

impl<'a> DatasetJson<'a> {
    fn from_node(node: &'a TreeNode, columns: &'a ColumnSpec) -> Self {
        let properties = columns
            .columns()
            .iter()
            .zip(&node.record.cells)
            .skip(1)
            .map(|(p, c)| (p.as_str(), c.raw.as_str()))
            .collect();
        Self {
            name: node.name(),
            kind: node.record.kind.label(),
            properties,
            snapshots: node
                .children
                .iter()
                .map(|c| DatasetJson::from_node(c, columns))
                .collect(),
        }
    }
}

/// JSON rendering with the raw (exact) property values.
pub fn render_json(tree: &DatasetTree, columns: &ColumnSpec) -> Result<String> {
    let nodes: Vec<DatasetJson<'_>> = tree
        .nodes
        .iter()
        .map(|n| DatasetJson::from_node(n, columns))
        .collect();
    serde_json::to_string_pretty(&nodes).context("serialize datasets json")
}
