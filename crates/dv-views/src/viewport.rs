//! Viewport - docks the dashboard views
//! Based on Rerun's re_viewport

use std::collections::HashMap;
use egui::{Rect, Ui};
use egui_dock::{DockArea, DockState, NodeIndex, TabViewer};

use crate::{DetailsView, DispositionView, SpaceView, SpaceViewId, TimelineView, ViewerContext};

/// The main viewport: timeline on top, disposition bars and details below
pub struct Viewport {
    dock_state: DockState<SpaceViewId>,
    space_views: HashMap<SpaceViewId, Box<dyn SpaceView>>,

    /// Content areas of the views outside the year chart, as of the last frame
    outside_chart: Vec<Rect>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    pub fn new() -> Self {
        let views: Vec<Box<dyn SpaceView>> = vec![
            Box::new(TimelineView::new("Allegations by Year")),
            Box::new(DispositionView::new("Board Dispositions")),
            Box::new(DetailsView::new("Details")),
        ];

        let mut dock_state = DockState::new(vec![SpaceViewId::Timeline]);
        let surface = dock_state.main_surface_mut();
        let [_, bottom] = surface.split_below(NodeIndex::root(), 0.55, vec![SpaceViewId::Dispositions]);
        surface.split_right(bottom, 0.6, vec![SpaceViewId::Details]);

        Self {
            dock_state,
            space_views: views.into_iter().map(|v| (v.id(), v)).collect(),
            outside_chart: Vec::new(),
        }
    }

    /// Screen areas drawn by views other than the timeline during the last
    /// call to [`Viewport::ui`]
    pub fn outside_chart(&self) -> &[Rect] {
        &self.outside_chart
    }

    /// Draw the viewport
    pub fn ui(&mut self, ui: &mut Ui, viewer_context: &ViewerContext) {
        let available_rect = ui.available_rect_before_wrap();
        self.outside_chart.clear();

        ui.allocate_ui(available_rect.size(), |ui| {
            DockArea::new(&mut self.dock_state)
                .show_close_buttons(false)
                .draggable_tabs(true)
                .show_tab_name_on_hover(true)
                .show_inside(ui, &mut ViewportTabViewer {
                    space_views: &mut self.space_views,
                    viewer_context,
                    outside_chart: &mut self.outside_chart,
                });
        });
    }
}

/// Tab viewer for egui_dock
struct ViewportTabViewer<'a> {
    space_views: &'a mut HashMap<SpaceViewId, Box<dyn SpaceView>>,
    viewer_context: &'a ViewerContext,
    outside_chart: &'a mut Vec<Rect>,
}

impl<'a> TabViewer for ViewportTabViewer<'a> {
    type Tab = SpaceViewId;

    fn title(&mut self, tab: &mut Self::Tab) -> egui::WidgetText {
        match self.space_views.get(tab) {
            Some(view) => view.display_name().into(),
            None => "Unknown".into(),
        }
    }

    fn ui(&mut self, ui: &mut Ui, tab: &mut Self::Tab) {
        if tab.is_outside_chart() {
            self.outside_chart.push(ui.max_rect());
        }
        if let Some(view) = self.space_views.get_mut(tab) {
            view.ui(self.viewer_context, ui);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use parking_lot::RwLock;
    use dv_core::AppSettings;
    use dv_data::DemoSource;

    #[test]
    fn test_only_the_timeline_is_the_chart() {
        assert!(!SpaceViewId::Timeline.is_outside_chart());
        assert!(SpaceViewId::Dispositions.is_outside_chart());
        assert!(SpaceViewId::Details.is_outside_chart());
    }

    #[test]
    fn test_views_below_the_timeline_are_recorded() {
        let store = Arc::new(DemoSource::default().load().unwrap());
        let viewer_context = ViewerContext::new(store, Arc::new(RwLock::new(AppSettings::default())));
        let mut viewport = Viewport::new();

        let ctx = egui::Context::default();
        let input = egui::RawInput {
            screen_rect: Some(Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(1200.0, 800.0))),
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| viewport.ui(ui, &viewer_context));
        });

        let zones = viewport.outside_chart();
        assert_eq!(zones.len(), 2);
        // The timeline fills the top of the dock
        assert!(zones.iter().all(|zone| zone.top() > 200.0));
    }
}
