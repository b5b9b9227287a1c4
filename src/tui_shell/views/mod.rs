pub(super) mod datasets;

pub(in crate::tui_shell) use datasets::DatasetsView;
