//! Synchronization of the range widgets with the filter state

mod coalesce;
mod controller;

pub use coalesce::FrameCoalescer;
pub use controller::{BrushState, ControlEvent, RangeSelectionController, SliderState};
