use egui::{Context, TopBottomPanel};
use dv_views::{format_count, ViewerContext};

/// Actions requested from the header bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellAction {
    OpenFile,
    LoadDemo,
}

/// Render the header bar. Returns the action the user picked, if any.
pub fn header_bar(ctx: &Context, viewer_context: Option<&ViewerContext>) -> Option<ShellAction> {
    let mut action = None;

    TopBottomPanel::top("header_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Open CSV...").clicked() {
                    action = Some(ShellAction::OpenFile);
                    ui.close_menu();
                }

                if ui.button("Load Demo Data").clicked() {
                    action = Some(ShellAction::LoadDemo);
                    ui.close_menu();
                }

                ui.separator();

                if ui.button("Exit").clicked() {
                    ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.separator();
            ui.strong("Allegations Dashboard");

            // Right-aligned source name
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if let Some(viewer_ctx) = viewer_context {
                    ui.label(viewer_ctx.store.source_name());
                }
            });
        });
    });

    action
}

/// Render the status bar with selection and dataset figures
pub fn status_bar(ctx: &Context, viewer_context: &ViewerContext) {
    TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let snapshot = viewer_context.snapshot();
            let store = &viewer_context.store;

            ui.label(format!(
                "{} of {} allegations selected",
                format_count(snapshot.total()),
                format_count(store.len())
            ));
            ui.separator();
            ui.label(format!("Data years {}", store.extent()));

            if store.skipped_rows() > 0 {
                ui.separator();
                ui.label(
                    egui::RichText::new(format!("{} row(s) without a valid year skipped", format_count(store.skipped_rows())))
                        .color(crate::theme::error_color()),
                );
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let commits = viewer_context.controller.lock().commit_count();
                ui.label(
                    egui::RichText::new(format!("revision {} · {} range commits", viewer_context.filter.revision(), commits))
                        .weak()
                        .small(),
                );
            });
        });
    });
}
