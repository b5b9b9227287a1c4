pub mod dump;
pub mod listing;
pub mod logging;
pub mod model;
pub mod settings;
pub mod sort;
pub mod tree;
pub mod tui;

mod tui_shell;
