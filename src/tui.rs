use std::path::PathBuf;

use anyhow::Result;

use crate::listing::{ListRequest, ListSource, Listing};
use crate::sort::SortState;

pub struct TuiRunOptions {
    pub source: Box<dyn ListSource>,
    pub request: ListRequest,
    /// Result of the startup fetch; the UI only starts once this succeeded.
    pub initial: Listing,
    pub sort: SortState,
    /// Where window and column geometry is persisted. `None` disables it.
    pub settings_path: Option<PathBuf>,
}

pub fn run_with_options(opts: TuiRunOptions) -> Result<()> {
    crate::tui_shell::run_with_options(opts)
}
