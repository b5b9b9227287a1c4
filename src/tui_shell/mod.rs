use anyhow::Result;

mod app;

mod view;
mod views;

use app::fmt_clock;
use view::render_dataset_chrome;

pub fn run_with_options(opts: crate::tui::TuiRunOptions) -> Result<()> {
    app::run(opts)
}
