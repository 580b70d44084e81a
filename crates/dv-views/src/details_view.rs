//! Text summary of the current selection

use egui::{RichText, Ui};
use dv_core::SelectionSummary;

use crate::colors::category_color;
use crate::format::{format_count, format_percent};
use crate::{empty_state, SpaceView, SpaceViewId, ViewerContext};

/// Headline sentence for a selection
fn headline(summary: &SelectionSummary) -> String {
    let noun = if summary.total == 1 { "allegation" } else { "allegations" };
    format!("{} {} in {}.", format_count(summary.total), noun, summary.year_range)
}

/// Peak year line, if the selection has any records
fn peak_line(summary: &SelectionSummary) -> Option<String> {
    summary.peak_year.map(|peak| {
        format!(
            "Peak year in range: {} ({}; {} of selection)",
            peak.year,
            format_count(peak.count),
            format_percent(peak.share)
        )
    })
}

/// Totals, leading categories and the busiest year
pub struct DetailsView {
    title: String,
}

impl DetailsView {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into() }
    }
}

impl SpaceView for DetailsView {
    fn id(&self) -> SpaceViewId {
        SpaceViewId::Details
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) {
        let snapshot = ctx.snapshot();
        let summary = &snapshot.summary;
        if snapshot.is_empty() {
            empty_state(ui);
            return;
        }

        ui.heading(headline(summary));
        ui.add_space(6.0);

        egui::Grid::new("details_categories")
            .num_columns(3)
            .striped(true)
            .show(ui, |ui| {
                for share in summary.top_categories() {
                    ui.label(RichText::new(share.category.label()).color(category_color(share.category)));
                    ui.label(format_count(share.count));
                    ui.label(format_percent(share.share));
                    ui.end_row();
                }
            });

        if let Some(line) = peak_line(summary) {
            ui.add_space(6.0);
            ui.label(line);
        }

        let store = &ctx.store;
        ui.add_space(6.0);
        ui.label(
            RichText::new(format!(
                "{} of {} records from {}",
                format_count(snapshot.total()),
                format_count(store.len()),
                store.source_name()
            ))
            .weak()
            .small(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dv_core::{Category, CategorySet, Disposition, FilterState, Record, YearRange};

    fn records() -> Vec<Record> {
        let exonerated = Disposition::normalize(Some("Exonerated"));
        [(2001, Category::Force), (2001, Category::Force), (2002, Category::Discourtesy), (2003, Category::Force)]
            .into_iter()
            .map(|(year, category)| Record::new(year, category, exonerated.clone(), None))
            .collect()
    }

    #[test]
    fn test_headline_and_peak() {
        let records = records();
        let rows: Vec<&Record> = records.iter().collect();
        let state = FilterState {
            year_range: YearRange::new(2000, 2005),
            enabled_categories: CategorySet::all(),
        };
        let summary = dv_core::summarize(&rows, &state);

        assert_eq!(headline(&summary), "4 allegations in 2000–2005.");
        assert_eq!(
            peak_line(&summary).as_deref(),
            Some("Peak year in range: 2001 (2; 50.0% of selection)")
        );
    }

    #[test]
    fn test_empty_summary_has_no_peak() {
        let state = FilterState::full(YearRange::new(1985, 2020));
        let summary = dv_core::summarize(&[], &state);
        assert_eq!(headline(&summary), "0 allegations in 1985–2020.");
        assert_eq!(peak_line(&summary), None);
    }
}
