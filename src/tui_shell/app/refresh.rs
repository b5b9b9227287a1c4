use super::*;

impl App {
    /// Ask for a refetch. The event loop runs it after the next draw so the
    /// "refreshing" status is visible while `zfs` runs.
    pub(in crate::tui_shell) fn request_refresh(&mut self) {
        if self.pending_refresh {
            tracing::debug!("refresh already pending, ignoring request");
            return;
        }
        self.pending_refresh = true;
        self.push_output(vec!["refreshing...".to_string()]);
    }

    /// Run the pending fetch, if any. On failure the displayed tree is kept.
    pub(in crate::tui_shell) fn run_pending_refresh(&mut self) {
        if !std::mem::take(&mut self.pending_refresh) {
            return;
        }
        match listing::fetch(self.source.as_ref(), &self.request) {
            Ok(listing) => self.apply_listing(listing),
            Err(err) => {
                tracing::warn!("refresh failed: {}", err);
                self.push_error(format!("refresh failed: {}", err));
            }
        }
    }

    /// Replace the displayed tree with `listing` and report what was skipped.
    pub(in crate::tui_shell) fn apply_listing(&mut self, listing: Listing) {
        let malformed = listing.malformed.len();
        let (tree, report) = DatasetTree::build(listing.records);

        let mut lines = vec![format!(
            "loaded {} datasets, {} snapshots",
            tree.dataset_count(),
            tree.snapshot_count()
        )];
        if !report.bookmarks.is_empty() {
            lines.push(format!("{} bookmarks not shown", report.bookmarks.len()));
        }
        let warn = malformed > 0 || !report.is_clean();
        if malformed > 0 {
            lines.push(format!("skipped {} malformed rows", malformed));
        }
        if !report.is_clean() {
            lines.push(format!(
                "dropped {} snapshots without a listed filesystem: {}",
                report.orphans.len(),
                report.orphans.join(", ")
            ));
        }

        tracing::info!(
            datasets = tree.dataset_count(),
            snapshots = tree.snapshot_count(),
            "tree rebuilt"
        );
        self.view.replace_tree(tree, now_ts());

        if warn {
            self.push_warning(lines);
        } else {
            self.push_output(lines);
        }
    }
}
