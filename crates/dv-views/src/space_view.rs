//! Space view abstraction - base trait for the dockable dashboard views

use egui::Ui;

use crate::ViewerContext;

/// Identifies a view inside the dock layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpaceViewId {
    Timeline,
    Dispositions,
    Details,
}

impl SpaceViewId {
    /// Views whose area counts as outside the year chart. A click there
    /// resets the year range.
    pub fn is_outside_chart(&self) -> bool {
        !matches!(self, SpaceViewId::Timeline)
    }
}

/// Base trait for the dashboard views
pub trait SpaceView: Send + Sync {
    /// Get the unique ID of this view
    fn id(&self) -> SpaceViewId;

    /// Get the display name
    fn display_name(&self) -> &str;

    /// Draw the whole view from the current selection
    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui);
}
