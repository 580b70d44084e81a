//! Filter panel: category checkboxes, bulk actions and the year slider

use egui::{RichText, Rounding, Sense, Ui, Vec2};
use tracing::debug;
use dv_core::Category;
use dv_views::{category_color, ViewerContext};

use crate::range_slider::RangeSlider;

/// Side panel holding every filter control
#[derive(Debug, Default)]
pub struct FilterPanel {
    slider: RangeSlider,
}

impl FilterPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ui(&mut self, ui: &mut Ui, ctx: &ViewerContext) {
        ui.heading("Filters");
        ui.add_space(4.0);

        ui.horizontal(|ui| {
            if ui.button("Select All").clicked() {
                ctx.controller.lock().select_all();
            }
            if ui.button("Select None").clicked() {
                ctx.controller.lock().select_none();
            }
            if ui
                .button("Reset")
                .on_hover_text("Full year range and every category")
                .clicked()
            {
                ctx.controller.lock().reset_all();
            }
        });

        ui.add_space(6.0);
        ui.label(RichText::new("Allegation type").strong());

        // Read every frame so programmatic changes show up immediately
        let state = ctx.filter.state();
        for category in Category::ALL {
            ui.horizontal(|ui| {
                let (swatch, _) = ui.allocate_exact_size(Vec2::splat(10.0), Sense::hover());
                ui.painter().rect_filled(swatch, Rounding::same(2.0), category_color(category));

                let mut enabled = state.is_enabled(category);
                if ui.checkbox(&mut enabled, category.label()).changed() {
                    debug!("{} {}", category, if enabled { "enabled" } else { "disabled" });
                    ctx.controller.lock().set_category_enabled(category, enabled);
                }
            });
        }

        ui.add_space(10.0);
        ui.label(RichText::new("Years").strong());

        let mut controller = ctx.controller.lock();
        self.slider.ui(ui, &mut controller);
        let readout = controller.readout();
        drop(controller);

        let label = if readout == ctx.filter.extent() {
            format!("{} (all years)", readout)
        } else {
            readout.to_string()
        };
        ui.label(RichText::new(label).monospace());
    }
}
