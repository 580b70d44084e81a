use egui::{Rounding, Sense, Ui, Vec2};
use dv_core::{Category, CategorySet};

use crate::colors::category_color;

/// One swatch and label per category. Disabled categories are drawn faded.
pub fn legend_ui(ui: &mut Ui, enabled: CategorySet) {
    ui.horizontal_wrapped(|ui| {
        for category in Category::ALL {
            let active = enabled.contains(category);
            let color = if active {
                category_color(category)
            } else {
                category_color(category).gamma_multiply(0.3)
            };

            let (rect, _) = ui.allocate_exact_size(Vec2::splat(12.0), Sense::hover());
            ui.painter().rect_filled(rect, Rounding::same(2.0), color);

            let label = egui::RichText::new(category.label());
            ui.label(if active { label } else { label.weak() });
            ui.add_space(8.0);
        }
    });
}
