//! User interface components for the allegations dashboard
//!
//! This crate provides the egui-based controls around the views: the
//! filter panel with its year range slider, the header and status bars,
//! and the theme.

pub mod filter_panel;
pub mod range_slider;
pub mod shell;
pub mod theme;

/// Re-export commonly used types
pub use filter_panel::FilterPanel;
pub use range_slider::RangeSlider;
pub use shell::{header_bar, status_bar, ShellAction};
pub use theme::{apply_theme, Theme};
