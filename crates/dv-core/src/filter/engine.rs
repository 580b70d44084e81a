//! Filter engine implementation

use super::{FilterContext, FilterState, FilterSubscriber};
use crate::record::{CategorySet, YearRange};
use std::sync::{Arc, Weak};
use parking_lot::RwLock;
use tracing::debug;

/// Filter state stored internally
#[derive(Debug, Clone)]
struct EngineState {
    filter: FilterState,
    extent: YearRange,
    revision: u64,
}

/// Observable owner of the [`FilterState`].
///
/// The state can only change through [`FilterEngine::set_year_range`] and
/// [`FilterEngine::set_categories`]. Every effective change bumps the revision
/// and notifies subscribers.
pub struct FilterEngine {
    state: Arc<RwLock<EngineState>>,
    subscribers: Arc<RwLock<Vec<Weak<dyn FilterSubscriber>>>>,
}

impl FilterEngine {
    /// Create an engine for a dataset covering `extent`, with nothing filtered out
    pub fn new(extent: YearRange) -> Self {
        let state = EngineState {
            filter: FilterState::full(extent),
            extent,
            revision: 0,
        };

        Self {
            state: Arc::new(RwLock::new(state)),
            subscribers: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Set the year range. Bounds given out of order are swapped and both are
    /// clamped into the global extent. Returns the range actually applied.
    pub fn set_year_range(&self, lo: i32, hi: i32) -> YearRange {
        let mut state = self.state.write();
        let range = YearRange::new(lo, hi).clamp_to(state.extent);

        if state.filter.year_range == range {
            return range;
        }

        state.filter.year_range = range;
        state.revision += 1;
        debug!("Year range set to {} (revision {})", range, state.revision);

        drop(state);
        self.notify_subscribers();
        range
    }

    /// Replace the set of enabled categories
    pub fn set_categories(&self, categories: CategorySet) {
        let mut state = self.state.write();

        if state.filter.enabled_categories == categories {
            return;
        }

        state.filter.enabled_categories = categories;
        state.revision += 1;
        debug!("Categories set to {:?} (revision {})", categories, state.revision);

        drop(state);
        self.notify_subscribers();
    }

    /// Current filter state
    pub fn state(&self) -> FilterState {
        self.state.read().filter
    }

    pub fn year_range(&self) -> YearRange {
        self.state.read().filter.year_range
    }

    pub fn categories(&self) -> CategorySet {
        self.state.read().filter.enabled_categories
    }

    /// Global year extent the engine was created with
    pub fn extent(&self) -> YearRange {
        self.state.read().extent
    }

    pub fn revision(&self) -> u64 {
        self.state.read().revision
    }

    /// Get current filter context
    pub fn get_context(&self) -> FilterContext {
        let state = self.state.read();
        FilterContext {
            state: state.filter,
            extent: state.extent,
            revision: state.revision,
        }
    }

    /// Add a subscriber. Only a weak reference is kept.
    pub fn add_subscriber(&self, subscriber: Arc<dyn FilterSubscriber>) {
        let mut subscribers = self.subscribers.write();
        subscribers.push(Arc::downgrade(&subscriber));
    }

    /// Notify all subscribers of a filter change
    fn notify_subscribers(&self) {
        let context = self.get_context();
        let mut subscribers = self.subscribers.write();

        // Remove any dead weak references
        subscribers.retain(|weak| weak.strong_count() > 0);

        for weak in subscribers.iter() {
            if let Some(subscriber) = weak.upgrade() {
                subscriber.on_filter_change(&context);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Category;
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

    fn engine() -> FilterEngine {
        FilterEngine::new(YearRange::new(1985, 2020))
    }

    #[test]
    fn test_initial_state_is_unfiltered() {
        let engine = engine();
        let state = engine.state();
        assert_eq!(state.year_range, YearRange::new(1985, 2020));
        assert!(state.enabled_categories.is_all());
        assert_eq!(engine.revision(), 0);
    }

    #[test]
    fn test_set_year_range_swaps_bounds() {
        let engine = engine();
        let applied = engine.set_year_range(2010, 2000);
        assert_eq!((applied.lo(), applied.hi()), (2000, 2010));
        assert_eq!(engine.year_range(), applied);
    }

    #[test]
    fn test_set_year_range_clamps_to_extent() {
        let engine = engine();
        let applied = engine.set_year_range(1900, 2100);
        assert_eq!(applied, engine.extent());
    }

    #[test]
    fn test_subscribers_notified_only_on_change() {
        let engine = engine();
        let subscriber = Arc::new(CountingSubscriber::default());
        engine.add_subscriber(subscriber.clone());

        engine.set_year_range(1990, 1995);
        engine.set_year_range(1990, 1995);
        engine.set_categories(CategorySet::from_iter([Category::Force]));
        engine.set_categories(CategorySet::from_iter([Category::Force]));

        assert_eq!(subscriber.calls.load(Ordering::SeqCst), 2);
        assert_eq!(engine.revision(), 2);
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let engine = engine();
        let subscriber = Arc::new(CountingSubscriber::default());
        engine.add_subscriber(subscriber.clone());
        drop(subscriber);

        engine.set_categories(CategorySet::empty());
        assert_eq!(engine.subscribers.read().len(), 0);
    }
}
