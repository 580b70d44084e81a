//! Horizontal bar chart of the most common board dispositions

use egui::{Align2, RichText, Ui};
use egui_plot::{Bar, BarChart, Plot, PlotPoint, Text};

use crate::colors::disposition_color;
use crate::format::format_count;
use crate::{empty_state, SpaceView, SpaceViewId, ViewerContext};

/// Bar chart configuration
#[derive(Debug, Clone)]
pub struct DispositionConfig {
    /// Whether to show grid
    pub show_grid: bool,

    /// Bar width factor (0.0 to 1.0)
    pub bar_width: f64,
}

impl Default for DispositionConfig {
    fn default() -> Self {
        Self {
            show_grid: true,
            bar_width: 0.5,
        }
    }
}

/// Ranked disposition counts for the current selection
pub struct DispositionView {
    title: String,
    pub config: DispositionConfig,
}

impl DispositionView {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            config: DispositionConfig::default(),
        }
    }
}

/// Plot row of the bar with rank `rank`, the first rank on top
fn bar_position(rank: usize, bars: usize) -> f64 {
    (bars - 1 - rank) as f64
}

impl SpaceView for DispositionView {
    fn id(&self) -> SpaceViewId {
        SpaceViewId::Dispositions
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) {
        let snapshot = ctx.snapshot();
        let ranking = &snapshot.dispositions;
        if ranking.is_empty() {
            empty_state(ui);
            return;
        }

        let max_count = ranking.iter().map(|(_, count)| *count).max().unwrap_or(0) as f64;
        let bar_width = self.config.bar_width;

        let plot = Plot::new("disposition_bars")
            .show_grid(self.config.show_grid)
            .show_axes([true, false])
            .show_x(false)
            .show_y(false)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .include_x(0.0)
            // Room for the count labels past the longest bar
            .include_x(max_count * 1.2)
            .include_y(-0.5)
            .include_y(ranking.len() as f64);

        plot.show(ui, |plot_ui| {
            let bars: Vec<Bar> = ranking
                .iter()
                .enumerate()
                .map(|(rank, (label, count))| {
                    Bar::new(bar_position(rank, ranking.len()), *count as f64)
                        .width(bar_width)
                        .name(label)
                        .fill(disposition_color(label, rank))
                })
                .collect();
            plot_ui.bar_chart(BarChart::new(bars).horizontal());

            for (rank, (label, count)) in ranking.iter().enumerate() {
                let y = bar_position(rank, ranking.len());
                plot_ui.text(
                    Text::new(PlotPoint::new(0.0, y + bar_width / 2.0), RichText::new(label).small())
                        .anchor(Align2::LEFT_BOTTOM),
                );
                plot_ui.text(
                    Text::new(PlotPoint::new(*count as f64, y), format!(" {}", format_count(*count)))
                        .anchor(Align2::LEFT_CENTER),
                );
            }
        });
    }
}
