//! Range-selection controller
//!
//! Two widgets edit the same year range: a dual-thumb slider and a brush drawn
//! over the timeline. The controller is the only writer of the year range. It
//! previews continuous input cheaply, commits on release (slider) or at most
//! once per frame (brush), and repaints both widgets after every commit with a
//! latch set so the widgets' echoes are not taken as user input.

use std::sync::Arc;
use tracing::{debug, info, trace};

use super::coalesce::FrameCoalescer;
use crate::filter::FilterEngine;
use crate::record::{Category, CategorySet, YearRange};

/// Input coming from one of the two range widgets
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlEvent {
    /// A slider thumb is being dragged
    SliderInput { start: i32, end: i32 },
    /// A slider thumb was released
    SliderChange { start: i32, end: i32 },
    /// The brush is being dragged. Selection is in chart x units (years).
    BrushMove(Option<(f64, f64)>),
    /// The brush drag ended. `None` means the brush was cleared.
    BrushEnd(Option<(f64, f64)>),
}

/// Positions of the two slider thumbs. The thumbs may cross while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderState {
    pub start: i32,
    pub end: i32,
}

impl SliderState {
    fn clamped(start: i32, end: i32, extent: YearRange) -> Self {
        Self {
            start: start.clamp(extent.lo(), extent.hi()),
            end: end.clamp(extent.lo(), extent.hi()),
        }
    }

    /// Ordered range shown next to the slider
    pub fn readout(&self) -> YearRange {
        YearRange::new(self.start, self.end)
    }

    /// Selected segment of the track as fractions of the extent
    pub fn fill(&self, extent: YearRange) -> (f32, f32) {
        let span = (extent.hi() - extent.lo()) as f32;
        if span <= 0.0 {
            return (0.0, 1.0);
        }
        let range = self.readout();
        (
            (range.lo() - extent.lo()) as f32 / span,
            (range.hi() - extent.lo()) as f32 / span,
        )
    }
}

impl From<YearRange> for SliderState {
    fn from(range: YearRange) -> Self {
        Self { start: range.lo(), end: range.hi() }
    }
}

/// Brush rectangle over the timeline, in chart x units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BrushState {
    selection: Option<(f64, f64)>,
}

impl BrushState {
    pub fn selection(&self) -> Option<(f64, f64)> {
        self.selection
    }

    pub fn is_active(&self) -> bool {
        self.selection.is_some()
    }

    /// Move the brush. Like the widget it models, the brush reports the
    /// move as an end-of-gesture event even when the move was programmatic.
    fn move_to(&mut self, selection: Option<(f64, f64)>) -> ControlEvent {
        self.selection = selection;
        ControlEvent::BrushEnd(selection)
    }
}

/// Year range covered by a brush selection: bounds rounded to the nearest
/// year and clamped to the extent
fn brush_years(x0: f64, x1: f64, extent: YearRange) -> YearRange {
    YearRange::new(x0.round() as i32, x1.round() as i32).clamp_to(extent)
}

/// Single owner of year-range writes, see the module docs
pub struct RangeSelectionController {
    filter: Arc<FilterEngine>,
    slider: SliderState,
    brush: BrushState,
    /// Set while both widgets are repainted from the filter state
    programmatic: bool,
    pending: FrameCoalescer<YearRange>,
    commits: u64,
}

impl RangeSelectionController {
    pub fn new(filter: Arc<FilterEngine>) -> Self {
        let slider = SliderState::from(filter.year_range());
        let mut controller = Self {
            filter,
            slider,
            brush: BrushState::default(),
            programmatic: false,
            pending: FrameCoalescer::new(),
            commits: 0,
        };
        controller.sync_controls();
        controller
    }

    pub fn filter(&self) -> &Arc<FilterEngine> {
        &self.filter
    }

    pub fn slider(&self) -> SliderState {
        self.slider
    }

    pub fn brush(&self) -> BrushState {
        self.brush
    }

    /// Range shown by the slider readout, including uncommitted previews
    pub fn readout(&self) -> YearRange {
        self.slider.readout()
    }

    /// Number of writes made to the filter state's year range
    pub fn commit_count(&self) -> u64 {
        self.commits
    }

    /// Whether a brush commit is waiting for the next frame
    pub fn has_pending(&self) -> bool {
        self.pending.is_pending()
    }

    /// Handle user input from either widget
    pub fn handle(&mut self, event: ControlEvent) {
        if self.programmatic {
            trace!("Ignoring echoed control event {:?}", event);
            return;
        }

        let extent = self.filter.extent();
        match event {
            ControlEvent::SliderInput { start, end } => {
                self.slider = SliderState::clamped(start, end, extent);
            }
            ControlEvent::SliderChange { start, end } => {
                self.slider = SliderState::clamped(start, end, extent);
                self.commit(self.slider.readout());
            }
            ControlEvent::BrushMove(Some((x0, x1))) => {
                let candidate = brush_years(x0, x1, extent);
                self.brush.selection = Some((x0, x1));
                self.slider = SliderState::from(candidate);
                if self.pending.request(candidate) {
                    trace!("Brush commit for {} superseded a pending one", candidate);
                }
            }
            ControlEvent::BrushMove(None) | ControlEvent::BrushEnd(None) => {
                self.pending.cancel();
                self.commit(extent);
            }
            ControlEvent::BrushEnd(Some((x0, x1))) => {
                self.pending.cancel();
                self.commit(brush_years(x0, x1, extent));
            }
        }
    }

    /// Per-frame tick: flush the pending brush commit, if any.
    /// Returns true when the filter state was written.
    pub fn on_frame(&mut self) -> bool {
        match self.pending.take() {
            Some(candidate) if candidate != self.filter.year_range() => {
                self.commit(candidate);
                true
            }
            _ => false,
        }
    }

    /// Local reset: full year range and no brush; categories are kept
    pub fn reset_years(&mut self) {
        self.pending.cancel();
        let extent = self.filter.extent();
        info!("Resetting year range to {}", extent);
        self.commit(extent);
    }

    /// Global reset: full year range and every category enabled
    pub fn reset_all(&mut self) {
        self.reset_years();
        info!("Re-enabling all categories");
        self.filter.set_categories(CategorySet::all());
    }

    pub fn select_all(&self) {
        self.filter.set_categories(CategorySet::all());
    }

    pub fn select_none(&self) {
        self.filter.set_categories(CategorySet::empty());
    }

    pub fn set_category_enabled(&self, category: Category, enabled: bool) {
        let mut categories = self.filter.categories();
        categories.set(category, enabled);
        self.filter.set_categories(categories);
    }

    fn commit(&mut self, candidate: YearRange) {
        self.commits += 1;
        let applied = self.filter.set_year_range(candidate.lo(), candidate.hi());
        debug!("Committed year range {}", applied);
        self.sync_controls();
    }

    /// Repaint both widgets from the filter state
    fn sync_controls(&mut self) {
        let range = self.filter.year_range();
        let extent = self.filter.extent();

        self.programmatic = true;
        self.slider = SliderState::from(range);
        let selection = (range != extent).then(|| (f64::from(range.lo()), f64::from(range.hi())));
        let echo = self.brush.move_to(selection);
        self.handle(echo);
        self.programmatic = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{FilterContext, FilterState, FilterSubscriber};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingSubscriber {
        calls: AtomicUsize,
    }

    impl FilterSubscriber for CountingSubscriber {
        fn on_filter_change(&self, _context: &FilterContext) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn controller() -> RangeSelectionController {
        let engine = Arc::new(FilterEngine::new(YearRange::new(1985, 2020)));
        RangeSelectionController::new(engine)
    }

    #[test]
    fn test_initial_controls_mirror_full_extent() {
        let controller = controller();
        assert_eq!(controller.slider(), SliderState { start: 1985, end: 2020 });
        assert!(!controller.brush().is_active());
        assert_eq!(controller.commit_count(), 0);
    }

    #[test]
    fn test_slider_input_only_previews() {
        let mut controller = controller();
        controller.handle(ControlEvent::SliderInput { start: 1995, end: 2001 });

        assert_eq!(controller.readout(), YearRange::new(1995, 2001));
        assert_eq!(controller.filter().year_range(), YearRange::new(1985, 2020));
        assert_eq!(controller.commit_count(), 0);
    }

    #[test]
    fn test_slider_change_commits_once_and_repaints_brush() {
        let mut controller = controller();
        let subscriber = Arc::new(CountingSubscriber::default());
        controller.filter().add_subscriber(subscriber.clone());

        controller.handle(ControlEvent::SliderChange { start: 2010, end: 2000 });

        assert_eq!(controller.filter().year_range(), YearRange::new(2000, 2010));
        assert_eq!(controller.commit_count(), 1);
        assert_eq!(subscriber.calls.load(Ordering::SeqCst), 1);
        assert_eq!(controller.brush().selection(), Some((2000.0, 2010.0)));
        assert_eq!(controller.slider(), SliderState { start: 2000, end: 2010 });
    }

    #[test]
    fn test_brush_moves_are_coalesced_per_frame() {
        let mut controller = controller();
        controller.handle(ControlEvent::BrushMove(Some((1990.2, 1995.0))));
        controller.handle(ControlEvent::BrushMove(Some((1990.2, 1999.4))));
        controller.handle(ControlEvent::BrushMove(Some((1990.2, 2003.6))));

        // Preview is immediate, the commit waits for the frame tick
        assert_eq!(controller.readout(), YearRange::new(1990, 2004));
        assert_eq!(controller.commit_count(), 0);
        assert!(controller.has_pending());

        assert!(controller.on_frame());
        assert_eq!(controller.filter().year_range(), YearRange::new(1990, 2004));
        assert_eq!(controller.commit_count(), 1);

        assert!(!controller.on_frame());
        assert_eq!(controller.commit_count(), 1);
    }

    #[test]
    fn test_brush_end_commits_immediately() {
        let mut controller = controller();
        controller.handle(ControlEvent::BrushMove(Some((1986.0, 1990.0))));
        controller.handle(ControlEvent::BrushEnd(Some((1986.0, 1992.0))));

        assert!(!controller.has_pending());
        assert_eq!(controller.filter().year_range(), YearRange::new(1986, 1992));
        assert_eq!(controller.commit_count(), 1);
    }

    #[test]
    fn test_brush_clamps_to_extent() {
        let mut controller = controller();
        controller.handle(ControlEvent::BrushEnd(Some((1970.0, 1988.7))));
        assert_eq!(controller.filter().year_range(), YearRange::new(1985, 1989));
    }

    #[test]
    fn test_cleared_brush_resets_years() {
        let mut controller = controller();
        controller.handle(ControlEvent::BrushEnd(Some((1990.0, 2000.0))));
        controller.handle(ControlEvent::BrushEnd(None));

        assert_eq!(controller.filter().year_range(), YearRange::new(1985, 2020));
        assert!(!controller.brush().is_active());
    }

    #[test]
    fn test_echo_is_suppressed_by_latch() {
        let mut controller = controller();
        for (i, end) in [1995, 2000, 2005].into_iter().enumerate() {
            controller.handle(ControlEvent::SliderChange { start: 1990, end });
            assert_eq!(controller.commit_count(), i as u64 + 1);
        }
        assert!(!controller.programmatic);
    }

    #[test]
    fn test_reset_years_keeps_categories() {
        let mut controller = controller();
        controller.set_category_enabled(Category::Force, false);
        controller.handle(ControlEvent::SliderChange { start: 1990, end: 1991 });

        controller.reset_years();

        let state = controller.filter().state();
        assert_eq!(state.year_range, YearRange::new(1985, 2020));
        assert!(!state.enabled_categories.contains(Category::Force));
        assert!(!controller.brush().is_active());
    }

    #[test]
    fn test_reset_all_restores_initial_state() {
        let mut controller = controller();
        controller.select_none();
        controller.set_category_enabled(Category::Discourtesy, true);
        controller.handle(ControlEvent::BrushMove(Some((2001.0, 2007.0))));
        controller.on_frame();
        controller.handle(ControlEvent::SliderChange { start: 2015, end: 1999 });

        controller.reset_all();

        let extent = controller.filter().extent();
        assert_eq!(controller.filter().state(), FilterState::full(extent));
        assert_eq!(controller.slider(), SliderState::from(extent));
        assert!(!controller.brush().is_active());
    }

    #[test]
    fn test_slider_fill_fractions() {
        let extent = YearRange::new(2000, 2010);
        let slider = SliderState { start: 2008, end: 2002 };
        let (start, end) = slider.fill(extent);
        assert!((start - 0.2).abs() < 1e-6);
        assert!((end - 0.8).abs() < 1e-6);
    }
}
