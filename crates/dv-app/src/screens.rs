//! Full-window screens shown when no dataset is on display

use eframe::egui::{self, RichText, Ui};

/// Choice made on a screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenAction {
    OpenFile,
    LoadDemo,
}

fn source_buttons(ui: &mut Ui, open_label: &str) -> Option<ScreenAction> {
    let mut action = None;
    ui.horizontal(|ui| {
        if ui
            .button(RichText::new(open_label).size(16.0))
            .on_hover_text("Load a CSV export of allegations")
            .clicked()
        {
            action = Some(ScreenAction::OpenFile);
        }

        if ui
            .button(RichText::new("Demo Data").size(16.0))
            .on_hover_text("Explore a generated dataset")
            .clicked()
        {
            action = Some(ScreenAction::LoadDemo);
        }
    });
    action
}

/// Show welcome screen
pub fn welcome_screen(ui: &mut Ui) -> Option<ScreenAction> {
    let mut action = None;
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.25);

        ui.heading(RichText::new("Allegations Dashboard").size(36.0).strong());
        ui.add_space(10.0);
        ui.label(
            RichText::new("Filter complaints by year and allegation type across linked views")
                .size(16.0)
                .color(egui::Color32::from_gray(180)),
        );

        ui.add_space(30.0);
        action = source_buttons(ui, "Open File");

        ui.add_space(30.0);
        ui.label(
            RichText::new("Tip: drag and drop a CSV file here")
                .size(12.0)
                .color(egui::Color32::from_gray(120)),
        );
    });
    action
}

pub fn loading_screen(ui: &mut Ui, label: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.4);
        ui.spinner();
        ui.label(format!("Loading {}…", label));
    });
}

/// Blocking error screen for a failed load
pub fn error_screen(ui: &mut Ui, label: &str, message: &str) -> Option<ScreenAction> {
    let mut action = None;
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.3);
        ui.heading(format!("Could not load {}", label));
        ui.add_space(10.0);
        ui.label(RichText::new(message).color(dv_ui::theme::error_color()));
        ui.add_space(20.0);
        action = source_buttons(ui, "Open Another File");
    });
    action
}
