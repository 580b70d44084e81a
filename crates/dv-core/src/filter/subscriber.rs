//! Filter subscriber trait

use super::FilterContext;

/// Trait for components that need to respond to filter changes
pub trait FilterSubscriber: Send + Sync {
    /// Called after the year range or category selection changed
    fn on_filter_change(&self, context: &FilterContext);
}
