use std::collections::{BTreeMap, HashSet};

use ratatui::layout::{Alignment as TextAlign, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Cell, Row, Table};

use crate::model::{Alignment, ColumnSpec};
use crate::sort::{SortState, sort_tree};
use crate::tree::{DatasetTree, TreeNode};

use super::super::render_dataset_chrome;

pub(in crate::tui_shell) const COLUMN_SPACING: u16 = 1;

const MIN_WIDTH: u16 = 3;
const MAX_AUTO_WIDTH: u16 = 60;
const MAX_WIDTH: u16 = 200;
const WIDTH_STEP: u16 = 2;
const SNAPSHOT_INDENT: &str = "    ";

/// One line of the flattened tree as currently expanded.
#[derive(Clone, Copy, Debug)]
pub(in crate::tui_shell) struct VisibleRow<'a> {
    pub(in crate::tui_shell) node: &'a TreeNode,
    /// Index of the owning top-level node for snapshots.
    pub(in crate::tui_shell) parent: Option<usize>,
    pub(in crate::tui_shell) top: usize,
    pub(in crate::tui_shell) expanded: bool,
}

#[derive(Debug)]
pub(in crate::tui_shell) struct DatasetsView {
    pub(in crate::tui_shell) updated_at: String,
    pub(in crate::tui_shell) columns: ColumnSpec,
    pub(in crate::tui_shell) tree: DatasetTree,
    pub(in crate::tui_shell) sort: SortState,
    pub(in crate::tui_shell) selected: usize,
    pub(in crate::tui_shell) scroll: usize,
    pub(in crate::tui_shell) header_selected: usize,
    pub(in crate::tui_shell) expanded: HashSet<String>,

    auto_widths: Vec<u16>,
    width_overrides: Vec<Option<u16>>,
}

impl DatasetsView {
    pub(in crate::tui_shell) fn new(
        columns: ColumnSpec,
        sort: SortState,
        saved_widths: &BTreeMap<String, u16>,
    ) -> Self {
        let width_overrides = columns
            .columns()
            .iter()
            .map(|p| {
                saved_widths
                    .get(p.as_str())
                    .map(|w| (*w).clamp(MIN_WIDTH, MAX_WIDTH))
            })
            .collect();
        let auto_widths = vec![MIN_WIDTH; columns.len()];
        Self {
            updated_at: String::new(),
            columns,
            tree: DatasetTree::default(),
            sort,
            selected: 0,
            scroll: 0,
            header_selected: 0,
            expanded: HashSet::new(),
            auto_widths,
            width_overrides,
        }
    }

    /// Swap in a freshly built tree. Expansion and selection follow dataset
    /// names across the swap.
    pub(in crate::tui_shell) fn replace_tree(&mut self, mut tree: DatasetTree, updated_at: String) {
        let keep = self.selected_name();
        sort_tree(&mut tree, &self.sort, &self.columns);
        self.expanded.retain(|name| tree.find(name).is_some());
        self.tree = tree;
        self.updated_at = updated_at;
        self.auto_widths = self.compute_auto_widths();
        self.select_name(keep.as_deref());
    }

    pub(in crate::tui_shell) fn visible_rows(&self) -> Vec<VisibleRow<'_>> {
        let mut rows = Vec::new();
        for (top, node) in self.tree.nodes.iter().enumerate() {
            let expanded = self.expanded.contains(node.name());
            rows.push(VisibleRow {
                node,
                parent: None,
                top,
                expanded,
            });
            if expanded {
                rows.extend(node.children.iter().map(|child| VisibleRow {
                    node: child,
                    parent: Some(top),
                    top,
                    expanded: false,
                }));
            }
        }
        rows
    }

    pub(in crate::tui_shell) fn selected_name(&self) -> Option<String> {
        self.visible_rows()
            .get(self.selected)
            .map(|r| r.node.name().to_string())
    }

    pub(in crate::tui_shell) fn selected_is_dataset(&self) -> bool {
        self.visible_rows()
            .get(self.selected)
            .is_some_and(|r| r.node.record.kind.is_top_level())
    }

    fn select_name(&mut self, name: Option<&str>) {
        let (found, max) = {
            let rows = self.visible_rows();
            let found = name.and_then(|n| rows.iter().position(|r| r.node.name() == n));
            (found, rows.len().saturating_sub(1))
        };
        self.selected = found.unwrap_or(self.selected).min(max);
    }

    fn select_top(&mut self, top: usize) {
        let name = self.tree.nodes.get(top).map(|n| n.name().to_string());
        self.select_name(name.as_deref());
    }

    pub(in crate::tui_shell) fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub(in crate::tui_shell) fn move_down(&mut self) {
        let len = self.visible_rows().len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected + 1).min(len - 1);
    }

    pub(in crate::tui_shell) fn select_row(&mut self, idx: usize) -> bool {
        if idx < self.visible_rows().len() {
            self.selected = idx;
            true
        } else {
            false
        }
    }

    /// Expand or collapse the selected filesystem. On a snapshot row this
    /// collapses the owning filesystem and selects it.
    pub(in crate::tui_shell) fn toggle_expanded(&mut self) {
        let (name, top, parent, has_children) = {
            let rows = self.visible_rows();
            let Some(row) = rows.get(self.selected) else {
                return;
            };
            (
                row.node.name().to_string(),
                row.top,
                row.parent,
                !row.node.children.is_empty(),
            )
        };

        if parent.is_some() {
            if let Some(owner) = self.tree.nodes.get(top) {
                self.expanded.remove(owner.name());
            }
            self.select_top(top);
            return;
        }
        if !has_children {
            return;
        }
        if !self.expanded.remove(&name) {
            self.expanded.insert(name);
        }
    }

    pub(in crate::tui_shell) fn expand_all(&mut self) {
        let keep = self.selected_name();
        for node in &self.tree.nodes {
            if !node.children.is_empty() {
                self.expanded.insert(node.name().to_string());
            }
        }
        self.select_name(keep.as_deref());
    }

    pub(in crate::tui_shell) fn collapse_all(&mut self) {
        let top = self.visible_rows().get(self.selected).map(|r| r.top);
        self.expanded.clear();
        self.selected = top.unwrap_or(0);
    }

    /// Header click: toggle or switch the sort column and re-sort the tree.
    pub(in crate::tui_shell) fn click_header(&mut self, column: usize) {
        if column >= self.columns.len() {
            return;
        }
        self.header_selected = column;
        self.sort.click(column);
        self.resort();
    }

    pub(in crate::tui_shell) fn clear_sort(&mut self) {
        self.sort.clear();
        self.resort();
    }

    fn resort(&mut self) {
        let keep = self.selected_name();
        sort_tree(&mut self.tree, &self.sort, &self.columns);
        self.select_name(keep.as_deref());
    }

    pub(in crate::tui_shell) fn select_column_left(&mut self) {
        self.header_selected = self.header_selected.saturating_sub(1);
    }

    pub(in crate::tui_shell) fn select_column_right(&mut self) {
        let max = self.columns.len().saturating_sub(1);
        self.header_selected = (self.header_selected + 1).min(max);
    }

    pub(in crate::tui_shell) fn column_width(&self, idx: usize) -> u16 {
        self.width_overrides
            .get(idx)
            .copied()
            .flatten()
            .or_else(|| self.auto_widths.get(idx).copied())
            .unwrap_or(MIN_WIDTH)
    }

    pub(in crate::tui_shell) fn widen_column(&mut self) {
        self.resize_column(self.header_selected, WIDTH_STEP as i32);
    }

    pub(in crate::tui_shell) fn narrow_column(&mut self) {
        self.resize_column(self.header_selected, -(WIDTH_STEP as i32));
    }

    fn resize_column(&mut self, idx: usize, delta: i32) {
        let current = self.column_width(idx) as i32;
        let next = (current + delta).clamp(MIN_WIDTH as i32, MAX_WIDTH as i32) as u16;
        if let Some(slot) = self.width_overrides.get_mut(idx) {
            *slot = Some(next);
        }
    }

    /// Effective widths keyed by property name, for the settings file.
    pub(in crate::tui_shell) fn column_widths(&self) -> BTreeMap<String, u16> {
        self.columns
            .columns()
            .iter()
            .enumerate()
            .map(|(i, p)| (p.as_str().to_string(), self.column_width(i)))
            .collect()
    }

    fn compute_auto_widths(&self) -> Vec<u16> {
        self.columns
            .columns()
            .iter()
            .enumerate()
            .map(|(i, p)| {
                // Room for the sort arrow.
                let mut w = p.as_str().chars().count() + 2;
                for node in &self.tree.nodes {
                    w = w.max(cell_text(node, i, 0, false).chars().count());
                    for child in &node.children {
                        w = w.max(cell_text(child, i, 1, false).chars().count());
                    }
                }
                (w as u16).clamp(MIN_WIDTH, MAX_AUTO_WIDTH)
            })
            .collect()
    }

    /// Horizontal extent of each drawn column inside a table `width` cells
    /// wide. Mirrors the `Table` layout, which shrinks columns that do not fit.
    pub(in crate::tui_shell) fn column_areas(&self, width: u16) -> Vec<Rect> {
        let widths = (0..self.columns.len()).map(|i| Constraint::Length(self.column_width(i)));
        Layout::horizontal(widths)
            .flex(Flex::Start)
            .spacing(COLUMN_SPACING)
            .split(Rect::new(0, 0, width, 1))
            .to_vec()
    }

    /// Column under `x`, measured from the left edge of a table `width`
    /// cells wide.
    pub(in crate::tui_shell) fn header_hit(&self, x: u16, width: u16) -> Option<usize> {
        self.column_areas(width)
            .iter()
            .position(|r| r.width > 0 && x >= r.x && x < r.x + r.width)
    }

    /// Whether `x` falls on the expansion marker of the name column.
    pub(in crate::tui_shell) fn marker_hit(&self, x: u16, width: u16) -> bool {
        self.column_areas(width)
            .first()
            .is_some_and(|r| x >= r.x && x < r.x + r.width.min(2))
    }

    /// Keep the selected row inside a body of `height` lines.
    pub(in crate::tui_shell) fn ensure_visible(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + height {
            self.scroll = self.selected + 1 - height;
        }
    }

    pub(in crate::tui_shell) fn render(&self, frame: &mut ratatui::Frame, area: Rect, title: &str) {
        let properties = self
            .columns
            .columns()
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let inner = render_dataset_chrome(frame, title, &properties, &self.updated_at, area);

        let widths: Vec<Constraint> = (0..self.columns.len())
            .map(|i| Constraint::Length(self.column_width(i)))
            .collect();

        let header = Row::new(self.columns.columns().iter().enumerate().map(|(i, p)| {
            let label = match self.sort.indicator(i) {
                Some(arrow) => format!("{} {}", p, arrow),
                None => p.to_string(),
            };
            let mut style = Style::default().add_modifier(Modifier::BOLD);
            if i == self.header_selected {
                style = style.add_modifier(Modifier::REVERSED);
            }
            Cell::from(Line::from(label).alignment(text_align(p.alignment()))).style(style)
        }));

        let body_height = inner.height.saturating_sub(1) as usize;
        let visible = self.visible_rows();
        let mut rows: Vec<Row> = visible
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(body_height)
            .map(|(idx, row)| {
                let depth = usize::from(row.parent.is_some());
                let cells = self.columns.columns().iter().enumerate().map(|(i, p)| {
                    let text = cell_text(row.node, i, depth, row.expanded);
                    Cell::from(Line::from(text).alignment(text_align(p.alignment())))
                });
                let mut style = if depth > 0 {
                    Style::default().fg(Color::Gray)
                } else {
                    Style::default()
                };
                if idx == self.selected {
                    style = style.bg(Color::DarkGray);
                }
                Row::new(cells).style(style)
            })
            .collect();

        if visible.is_empty() {
            rows.push(Row::new(vec![Cell::from("(no datasets)")]));
        }

        let table = Table::new(rows, widths)
            .header(header)
            .column_spacing(COLUMN_SPACING)
            .flex(Flex::Start);
        frame.render_widget(table, inner);
    }
}

fn text_align(a: Alignment) -> TextAlign {
    match a {
        Alignment::Left => TextAlign::Left,
        Alignment::Right => TextAlign::Right,
    }
}

/// Cell text as drawn; the name column carries the tree decoration.
fn cell_text(node: &TreeNode, col: usize, depth: usize, expanded: bool) -> String {
    let display = node
        .record
        .cell(col)
        .map(|c| c.display.as_str())
        .unwrap_or("");
    if col != 0 {
        return display.to_string();
    }
    if depth > 0 {
        return format!("{}{}", SNAPSHOT_INDENT, display);
    }
    let marker = match (node.children.is_empty(), expanded) {
        (true, _) => " ",
        (false, true) => "▾",
        (false, false) => "▸",
    };
    format!("{} {}", marker, display)
}

#[cfg(test)]
#[path = "../../tests/tui_shell/views/datasets_tests.rs"]
mod tests;
