//! Views of the allegations dashboard

mod colors;
mod details_view;
mod disposition_view;
mod format;
mod legend;
mod space_view;
mod timeline_view;
mod viewport;

pub use colors::{category_color, disposition_color};
pub use details_view::DetailsView;
pub use disposition_view::{DispositionConfig, DispositionView};
pub use format::{format_count, format_percent};
pub use legend::legend_ui;
pub use space_view::{SpaceView, SpaceViewId};
pub use timeline_view::{TimelineConfig, TimelineView};
pub use viewport::Viewport;

use std::sync::Arc;
use parking_lot::{Mutex, RwLock};
use tracing::debug;
use dv_core::{
    AppSettings, FilterEngine, RangeSelectionController, RecordStore, SelectionSnapshot,
};

/// Shown by every view when the filters match nothing
pub const EMPTY_SELECTION_MESSAGE: &str = "No allegations in this selection.";

/// Derived data for one filter revision and bar limit
struct CachedSnapshot {
    revision: u64,
    top_dispositions: usize,
    snapshot: Arc<SelectionSnapshot>,
}

/// Context passed to views during rendering
#[derive(Clone)]
pub struct ViewerContext {
    /// Loaded dataset
    pub store: Arc<RecordStore>,

    /// Filter state shared by every view
    pub filter: Arc<FilterEngine>,

    /// Only writer of the year range
    pub controller: Arc<Mutex<RangeSelectionController>>,

    /// UI settings
    pub settings: Arc<RwLock<AppSettings>>,

    snapshot: Arc<RwLock<Option<CachedSnapshot>>>,
}

impl ViewerContext {
    /// Build the filter state for a freshly loaded store: full extent, every
    /// category enabled
    pub fn new(store: Arc<RecordStore>, settings: Arc<RwLock<AppSettings>>) -> Self {
        let filter = Arc::new(FilterEngine::new(store.extent()));
        let controller = Arc::new(Mutex::new(RangeSelectionController::new(filter.clone())));

        Self {
            store,
            filter,
            controller,
            settings,
            snapshot: Arc::new(RwLock::new(None)),
        }
    }

    /// Derived data for the current filter revision. Recomputed at most once
    /// per revision no matter how many views ask.
    pub fn snapshot(&self) -> Arc<SelectionSnapshot> {
        let context = self.filter.get_context();
        let top_dispositions = self.settings.read().top_dispositions;

        if let Some(cached) = self.snapshot.read().as_ref() {
            if cached.revision == context.revision && cached.top_dispositions == top_dispositions {
                return cached.snapshot.clone();
            }
        }

        let snapshot = Arc::new(SelectionSnapshot::compute(&self.store, context, top_dispositions));
        debug!(
            "Recomputed selection for revision {}: {} of {} records",
            context.revision,
            snapshot.total(),
            self.store.len()
        );
        *self.snapshot.write() = Some(CachedSnapshot {
            revision: context.revision,
            top_dispositions,
            snapshot: snapshot.clone(),
        });
        snapshot
    }
}

/// Centered placeholder used by views with nothing to draw
pub(crate) fn empty_state(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.label(egui::RichText::new(EMPTY_SELECTION_MESSAGE).weak());
    });
}
