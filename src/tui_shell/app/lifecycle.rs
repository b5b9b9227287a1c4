use super::*;

impl App {
    pub(in crate::tui_shell) fn new(opts: crate::tui::TuiRunOptions) -> Self {
        let settings = opts
            .settings_path
            .as_deref()
            .map(GuiSettings::load_or_default)
            .unwrap_or_default();

        let view = DatasetsView::new(
            opts.request.columns.clone(),
            opts.sort,
            &settings.column_widths,
        );

        let mut app = App {
            source: opts.source,
            request: opts.request,
            settings_path: opts.settings_path,
            settings,
            view,
            last_result: None,
            pending_refresh: false,
            screen: Rect::default(),
            quit: false,
        };
        app.apply_listing(opts.initial);
        app
    }

    /// Ask the terminal to take the size saved last time. Returns whether a
    /// resize was requested.
    pub(super) fn restore_window_size(&self) -> bool {
        let (Some(w), Some(h)) = (self.settings.width, self.settings.height) else {
            return false;
        };
        if w == 0 || h == 0 {
            return false;
        }
        match execute!(io::stdout(), SetSize(w, h)) {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!("terminal resize not supported: {}", err);
                false
            }
        }
    }

    /// Record the final geometry. Failures are logged, never fatal.
    pub(in crate::tui_shell) fn save_settings(&mut self, size: Option<(u16, u16)>) {
        if let Some((w, h)) = size {
            self.settings.width = Some(w);
            self.settings.height = Some(h);
        }
        self.settings.column_widths = self.view.column_widths();

        let Some(path) = self.settings_path.as_deref() else {
            return;
        };
        if let Err(err) = self.settings.write(path) {
            tracing::warn!("could not save settings: {:#}", err);
        }
    }
}
