use super::*;
use crate::listing::parse_list_output;

const LISTING: &str = "tank\t3072\tfilesystem\n\
                       tank@a\t1024\tsnapshot\n\
                       tank@b\t0\tsnapshot\n\
                       tank/x\t1024\tfilesystem\n\
                       tank/y\t2048\tfilesystem\n\
                       tank/y@c\t0\tsnapshot\n";

fn view_with(saved: &BTreeMap<String, u16>) -> DatasetsView {
    let columns = ColumnSpec::parse("name,used").expect("parse columns");
    let listing = parse_list_output(LISTING, &columns);
    let (tree, _) = DatasetTree::build(listing.records);
    let mut view = DatasetsView::new(columns, SortState::default(), saved);
    view.replace_tree(tree, String::new());
    view
}

fn view() -> DatasetsView {
    view_with(&BTreeMap::new())
}

fn visible_names(view: &DatasetsView) -> Vec<String> {
    view.visible_rows()
        .iter()
        .map(|r| r.node.name().to_string())
        .collect()
}

#[test]
fn collapsed_by_default() {
    let v = view();
    assert_eq!(visible_names(&v), vec!["tank", "tank/x", "tank/y"]);
    assert!(v.visible_rows().iter().all(|r| !r.expanded));
}

#[test]
fn toggling_shows_snapshots_under_their_filesystem() {
    let mut v = view();
    v.toggle_expanded();
    assert_eq!(
        visible_names(&v),
        vec!["tank", "tank@a", "tank@b", "tank/x", "tank/y"]
    );
    let rows = v.visible_rows();
    assert_eq!(rows[1].parent, Some(0));
    assert!(rows[0].expanded);
}

#[test]
fn toggling_a_snapshot_collapses_its_filesystem() {
    let mut v = view();
    v.toggle_expanded();
    v.move_down();
    v.move_down();
    assert_eq!(v.selected_name().as_deref(), Some("tank@b"));
    assert!(!v.selected_is_dataset());

    v.toggle_expanded();
    assert_eq!(visible_names(&v), vec!["tank", "tank/x", "tank/y"]);
    assert_eq!(v.selected_name().as_deref(), Some("tank"));
}

#[test]
fn filesystem_without_snapshots_does_not_expand() {
    let mut v = view();
    v.move_down();
    v.toggle_expanded();
    assert!(v.expanded.is_empty());
}

#[test]
fn expand_and_collapse_all_keep_the_selection_sensible() {
    let mut v = view();
    v.move_down();
    v.move_down();
    v.expand_all();
    assert_eq!(visible_names(&v).len(), 6);
    assert_eq!(v.selected_name().as_deref(), Some("tank/y"));

    v.move_down();
    assert_eq!(v.selected_name().as_deref(), Some("tank/y@c"));
    v.collapse_all();
    assert_eq!(visible_names(&v).len(), 3);
    assert_eq!(v.selected_name().as_deref(), Some("tank/y"));
}

#[test]
fn selection_is_clamped() {
    let mut v = view();
    v.move_up();
    assert_eq!(v.selected, 0);
    for _ in 0..10 {
        v.move_down();
    }
    assert_eq!(v.selected, 2);
    assert!(!v.select_row(3));
    assert!(v.select_row(1));
    assert_eq!(v.selected_name().as_deref(), Some("tank/x"));
}

#[test]
fn header_hit_skips_spacing() {
    let v = view();
    let name = v.column_width(0);
    let used = v.column_width(1);
    assert_eq!(v.header_hit(0, 200), Some(0));
    assert_eq!(v.header_hit(name - 1, 200), Some(0));
    assert_eq!(v.header_hit(name, 200), None);
    assert_eq!(v.header_hit(name + COLUMN_SPACING, 200), Some(1));
    assert_eq!(v.header_hit(name + COLUMN_SPACING + used, 200), None);
}

#[test]
fn column_areas_shrink_to_the_table_width() {
    let v = view();
    let wide = v.column_areas(200);
    assert_eq!(wide[0].width, v.column_width(0));

    let narrow = v.column_areas(12);
    assert!(narrow.iter().all(|r| r.x + r.width <= 12), "{narrow:?}");
    for (i, area) in narrow.iter().enumerate().filter(|(_, r)| r.width > 0) {
        assert_eq!(v.header_hit(area.x, 12), Some(i));
    }
}

#[test]
fn marker_hit_covers_the_first_two_cells() {
    let v = view();
    assert!(v.marker_hit(0, 200));
    assert!(v.marker_hit(1, 200));
    assert!(!v.marker_hit(2, 200));
}

#[test]
fn auto_width_fits_indented_snapshots() {
    let v = view();
    // "    tank/y@c"
    assert_eq!(v.column_width(0), 12);
    // "used" plus room for the arrow
    assert_eq!(v.column_width(1), 6);
}

#[test]
fn saved_widths_override_and_resizing_clamps() {
    let saved = BTreeMap::from([("used".to_string(), 4u16), ("bogus".to_string(), 90u16)]);
    let mut v = view_with(&saved);
    assert_eq!(v.column_width(1), 4);

    v.header_selected = 1;
    v.narrow_column();
    assert_eq!(v.column_width(1), MIN_WIDTH);
    v.narrow_column();
    assert_eq!(v.column_width(1), MIN_WIDTH);
    v.widen_column();
    assert_eq!(v.column_width(1), MIN_WIDTH + WIDTH_STEP);

    let widths = v.column_widths();
    assert_eq!(widths.len(), 2);
    assert_eq!(widths.get("used").copied(), Some(MIN_WIDTH + WIDTH_STEP));
    assert!(!widths.contains_key("bogus"));
}

#[test]
fn ensure_visible_scrolls_both_ways() {
    let mut v = view();
    v.expand_all();
    v.select_row(5);
    v.ensure_visible(2);
    assert_eq!(v.scroll, 4);

    v.select_row(1);
    v.ensure_visible(2);
    assert_eq!(v.scroll, 1);

    v.ensure_visible(0);
    assert_eq!(v.scroll, 1);
}

#[test]
fn header_click_sorts_and_keeps_selected_dataset() {
    let mut v = view();
    v.select_row(1);
    v.click_header(1);
    assert_eq!(visible_names(&v), vec!["tank/x", "tank/y", "tank"]);
    assert_eq!(v.selected_name().as_deref(), Some("tank/x"));
    assert_eq!(v.header_selected, 1);

    v.click_header(7);
    assert_eq!(v.sort.column(), Some(1));

    v.clear_sort();
    assert_eq!(visible_names(&v), vec!["tank", "tank/x", "tank/y"]);
}

#[test]
fn replace_tree_forgets_vanished_datasets() {
    let mut v = view();
    v.expand_all();
    let columns = v.columns.clone();
    let listing = parse_list_output("tank\t1\tfilesystem\ntank@a\t1\tsnapshot\n", &columns);
    let (tree, _) = DatasetTree::build(listing.records);

    v.replace_tree(tree, "2026-01-01T00:00:00Z".to_string());
    assert_eq!(v.expanded.len(), 1);
    assert!(v.expanded.contains("tank"));
    assert_eq!(v.updated_at, "2026-01-01T00:00:00Z");
}

#[test]
fn name_cell_carries_tree_markers() {
    let v = view();
    let rows = v.visible_rows();
    assert_eq!(cell_text(rows[0].node, 0, 0, false), "▸ tank");
    assert_eq!(cell_text(rows[0].node, 0, 0, true), "▾ tank");
    assert_eq!(cell_text(rows[1].node, 0, 0, false), "  tank/x");
    let snap = &rows[0].node.children[0];
    assert_eq!(cell_text(snap, 0, 1, false), "    tank@a");
    assert_eq!(cell_text(snap, 1, 1, false), "1.00K");
}
