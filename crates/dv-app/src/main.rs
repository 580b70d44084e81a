//! Main application entry point

use std::path::PathBuf;
use std::sync::Arc;
use eframe::egui::{self, Context, Pos2, Rect};
use anyhow::Result;
use parking_lot::RwLock;
use tracing::{debug, info};

use dv_core::{AppSettings, FilterContext, FilterSubscriber};
use dv_data::DashboardConfig;
use dv_ui::{FilterPanel, ShellAction, Theme};
use dv_views::{ViewerContext, Viewport};

mod loader;
mod screens;

use loader::{DataRequest, PendingLoad};
use screens::ScreenAction;

/// Requests a repaint whenever the filter state changes
struct RepaintOnFilterChange {
    ctx: Context,
}

impl FilterSubscriber for RepaintOnFilterChange {
    fn on_filter_change(&self, context: &FilterContext) {
        debug!("Filter revision {}", context.revision);
        self.ctx.request_repaint();
    }
}

/// What the central area shows
enum Screen {
    Welcome,
    Loading { label: String },
    Failed { label: String, message: String },
    Dashboard(ViewerContext),
}

/// Main application state
struct DashboardApp {
    /// Dashboard configuration, read once at startup
    config: DashboardConfig,

    /// UI settings shared with the views
    settings: Arc<RwLock<AppSettings>>,

    screen: Screen,

    /// The viewport docking the views
    viewport: Viewport,

    filter_panel: FilterPanel,

    /// Kept alive here; the filter engine only holds a weak reference
    _repaint_subscriber: Option<Arc<RepaintOnFilterChange>>,

    /// Tokio runtime
    runtime: tokio::runtime::Runtime,

    /// Result slot of the load in flight
    pending: PendingLoad,

    /// Id of the newest load request; older results are dropped
    load_id: u64,

    /// Egui context
    egui_ctx: Context,
}

impl DashboardApp {
    fn new(
        cc: &eframe::CreationContext<'_>,
        runtime: tokio::runtime::Runtime,
        config: DashboardConfig,
        initial: Option<DataRequest>,
    ) -> Self {
        let settings = config.settings.clone();
        dv_ui::apply_theme(&cc.egui_ctx, &Theme::from(&settings.theme));

        let mut app = Self {
            config,
            settings: Arc::new(RwLock::new(settings)),
            screen: Screen::Welcome,
            viewport: Viewport::new(),
            filter_panel: FilterPanel::new(),
            _repaint_subscriber: None,
            runtime,
            pending: PendingLoad::default(),
            load_id: 0,
            egui_ctx: cc.egui_ctx.clone(),
        };

        if let Some(request) = initial {
            app.start_load(request);
        }
        app
    }

    /// Load a dataset in the background
    fn start_load(&mut self, request: DataRequest) {
        self.load_id += 1;
        self.screen = Screen::Loading { label: request.label() };

        let ctx = self.egui_ctx.clone();
        loader::spawn_load(
            self.runtime.handle(),
            self.load_id,
            request,
            self.config.loader.clone(),
            self.pending.clone(),
            move || ctx.request_repaint(),
        );
    }

    /// Pick up a finished load, if any
    fn poll_load(&mut self) {
        let Some(outcome) = self.pending.take() else {
            return;
        };
        if outcome.id != self.load_id {
            debug!("Dropping stale result for {}", outcome.label);
            return;
        }

        match outcome.result {
            Ok(store) => {
                let viewer_context = ViewerContext::new(Arc::new(store), self.settings.clone());
                let subscriber = Arc::new(RepaintOnFilterChange { ctx: self.egui_ctx.clone() });
                viewer_context.filter.add_subscriber(subscriber.clone());

                self._repaint_subscriber = Some(subscriber);
                self.viewport = Viewport::new();
                self.filter_panel = FilterPanel::new();
                self.screen = Screen::Dashboard(viewer_context);
            }
            Err(e) => {
                self.screen = Screen::Failed {
                    label: outcome.label,
                    message: e.to_string(),
                };
            }
        }
    }

    fn open_file_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV files", &["csv"])
            .pick_file()
        {
            self.start_load(DataRequest::Csv(path));
        }
    }

    fn handle_dropped_files(&mut self, ctx: &Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if let Some(path) = dropped.into_iter().find_map(|f| f.path) {
            info!("File dropped: {}", path.display());
            self.start_load(DataRequest::Csv(path));
        }
    }

    fn run_action(&mut self, action: ScreenAction) {
        match action {
            ScreenAction::OpenFile => self.open_file_dialog(),
            ScreenAction::LoadDemo => self.start_load(DataRequest::Demo),
        }
    }
}

/// Where this frame's primary click landed, if there was one
fn primary_click(ctx: &Context) -> Option<Pos2> {
    ctx.input(|i| {
        if i.pointer.primary_clicked() {
            i.pointer.interact_pos()
        } else {
            None
        }
    })
}

/// A click outside the year chart: in `band` but outside `root` (the status
/// bar), or inside one of the other views
fn is_outside_chart(pos: Pos2, band: Rect, root: Rect, views: &[Rect]) -> bool {
    (band.contains(pos) && !root.contains(pos)) || views.iter().any(|view| view.contains(pos))
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.poll_load();
        self.handle_dropped_files(ctx);

        // Flush the brush commit coalesced during the previous frame
        if let Screen::Dashboard(viewer_context) = &self.screen {
            viewer_context.controller.lock().on_frame();
        }

        let viewer_context = match &self.screen {
            Screen::Dashboard(viewer_context) => Some(viewer_context),
            _ => None,
        };
        match dv_ui::header_bar(ctx, viewer_context) {
            Some(ShellAction::OpenFile) => self.open_file_dialog(),
            Some(ShellAction::LoadDemo) => self.start_load(DataRequest::Demo),
            None => {}
        }

        let below_header = ctx.available_rect();
        if let Screen::Dashboard(viewer_context) = &self.screen {
            dv_ui::status_bar(ctx, viewer_context);
        }

        let mut action = None;
        match &self.screen {
            Screen::Dashboard(viewer_context) => {
                // Everything left after the header and status bars
                let root = ctx.available_rect();

                if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
                    viewer_context.controller.lock().reset_years();
                }

                egui::SidePanel::left("filter_panel")
                    .resizable(true)
                    .default_width(240.0)
                    .show(ctx, |ui| self.filter_panel.ui(ui, viewer_context));

                egui::CentralPanel::default().show(ctx, |ui| self.viewport.ui(ui, viewer_context));

                if let Some(pos) = primary_click(ctx) {
                    if is_outside_chart(pos, below_header, root, self.viewport.outside_chart()) {
                        debug!("Click outside the year chart");
                        viewer_context.controller.lock().reset_years();
                    }
                }

                if viewer_context.controller.lock().has_pending() {
                    ctx.request_repaint();
                }
            }
            Screen::Welcome => {
                egui::CentralPanel::default().show(ctx, |ui| action = screens::welcome_screen(ui));
            }
            Screen::Loading { label } => {
                egui::CentralPanel::default().show(ctx, |ui| screens::loading_screen(ui, label));
            }
            Screen::Failed { label, message } => {
                egui::CentralPanel::default().show(ctx, |ui| action = screens::error_screen(ui, label, message));
            }
        }

        if let Some(action) = action {
            self.run_action(action);
        }
    }
}

/// Dataset to open at startup: the first argument, else the configured path
fn initial_request(config: &DashboardConfig) -> Option<DataRequest> {
    std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| config.data_path.clone())
        .map(DataRequest::Csv)
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting allegations dashboard");

    let config = DashboardConfig::from_env();
    let initial = initial_request(&config);
    let dark_mode = config.settings.theme.dark_mode;

    // Initialize tokio runtime for background loading
    let runtime = tokio::runtime::Runtime::new()?;

    // Run the app
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([800.0, 600.0]),
        default_theme: if dark_mode { eframe::Theme::Dark } else { eframe::Theme::Light },
        persist_window: false,
        ..Default::default()
    };

    eframe::run_native(
        "Allegations Dashboard",
        options,
        Box::new(move |cc| Box::new(DashboardApp::new(cc, runtime, config, initial))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outside_chart_clicks() {
        let below_header = Rect::from_min_max(Pos2::new(0.0, 30.0), Pos2::new(1000.0, 800.0));
        let root = Rect::from_min_max(Pos2::new(0.0, 30.0), Pos2::new(1000.0, 770.0));
        let views = [
            Rect::from_min_max(Pos2::new(250.0, 450.0), Pos2::new(700.0, 770.0)),
            Rect::from_min_max(Pos2::new(700.0, 450.0), Pos2::new(1000.0, 770.0)),
        ];

        // Status bar
        assert!(is_outside_chart(Pos2::new(500.0, 790.0), below_header, root, &views));
        // Disposition bars and details
        assert!(is_outside_chart(Pos2::new(400.0, 600.0), below_header, root, &views));
        assert!(is_outside_chart(Pos2::new(900.0, 600.0), below_header, root, &views));
        // Timeline and filter panel
        assert!(!is_outside_chart(Pos2::new(500.0, 200.0), below_header, root, &views));
        assert!(!is_outside_chart(Pos2::new(100.0, 600.0), below_header, root, &views));
        // Header bar
        assert!(!is_outside_chart(Pos2::new(500.0, 10.0), below_header, root, &views));
    }
}
