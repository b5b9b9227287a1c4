use std::cmp::Ordering;

use crate::model::{ColumnSpec, PropertyKind, decode_ratio, decode_size};
use crate::tree::{DatasetTree, TreeNode};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggle(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// Active sort column and direction; `None` means tool order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SortState {
    active: Option<(usize, SortDirection)>,
}

impl SortState {
    /// Header click: the active column flips direction, any other column
    /// becomes active in ascending order.
    pub fn click(&mut self, column: usize) {
        self.active = match self.active {
            Some((c, dir)) if c == column => Some((c, dir.toggle())),
            _ => Some((column, SortDirection::Ascending)),
        };
    }

    pub fn clear(&mut self) {
        self.active = None;
    }

    pub fn column(&self) -> Option<usize> {
        self.active.map(|(c, _)| c)
    }

    pub fn direction(&self) -> Option<SortDirection> {
        self.active.map(|(_, d)| d)
    }

    /// Arrow to draw next to `column`'s header, if it is the sort column.
    pub fn indicator(&self, column: usize) -> Option<&'static str> {
        match self.active {
            Some((c, dir)) if c == column => Some(dir.arrow()),
            _ => None,
        }
    }
}

/// Order two cell texts from the same column.
///
/// Size, timestamp and ratio columns compare decoded magnitudes; values that
/// do not decode (`-`, `none`) sort before every decodable value. Ties fall
/// back to plain string order. Other columns use [`natural_cmp`].
pub fn compare_cells(kind: PropertyKind, a: &str, b: &str) -> Ordering {
    match kind {
        PropertyKind::Size => {
            by_magnitude(decode_size(a), decode_size(b), u64::cmp).then_with(|| a.cmp(b))
        }
        PropertyKind::Timestamp => by_magnitude(
            a.trim().parse::<i64>().ok(),
            b.trim().parse::<i64>().ok(),
            i64::cmp,
        )
        .then_with(|| a.cmp(b)),
        PropertyKind::Ratio => {
            by_magnitude(decode_ratio(a), decode_ratio(b), f64::total_cmp).then_with(|| a.cmp(b))
        }
        PropertyKind::Path | PropertyKind::Flag | PropertyKind::Text => natural_cmp(a, b),
    }
}

/// String order, except that two purely numeric strings compare as numbers
/// and numbers sort before words.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    match (parse_number(a), parse_number(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

fn parse_number(s: &str) -> Option<f64> {
    let t = s.trim();
    if t.is_empty() || !t.chars().all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+')) {
        return None;
    }
    t.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn by_magnitude<T>(a: Option<T>, b: Option<T>, cmp: impl Fn(&T, &T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => cmp(&x, &y),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Re-order the whole tree: top-level nodes among themselves, then each
/// node's snapshots independently. Always starts from tool order, so the
/// descending order is the exact reverse of the ascending one.
pub fn sort_tree(tree: &mut DatasetTree, sort: &SortState, columns: &ColumnSpec) {
    let key = sort
        .active
        .and_then(|(col, dir)| columns.get(col).map(|p| (col, p.kind(), dir)));

    sort_level(&mut tree.nodes, key);
    for node in &mut tree.nodes {
        sort_level(&mut node.children, key);
    }
}

fn sort_level(nodes: &mut [TreeNode], key: Option<(usize, PropertyKind, SortDirection)>) {
    nodes.sort_by_key(|n| n.seq);
    let Some((col, kind, dir)) = key else {
        return;
    };
    nodes.sort_by(|a, b| compare_cells(kind, cell_text(a, col), cell_text(b, col)));
    if dir == SortDirection::Descending {
        nodes.reverse();
    }
}

fn cell_text(node: &TreeNode, col: usize) -> &str {
    node.record.cell(col).map(|c| c.raw.as_str()).unwrap_or("")
}

#[cfg(test)]
#[path = "tests/sort_tests.rs"]
mod tests;
