//! Dual-thumb year range slider
//!
//! The thumbs move independently and may cross; the readout always shows the
//! ordered range. Dragging previews through the controller, releasing
//! commits.

use egui::{Color32, Pos2, Rect, Response, Rounding, Sense, Stroke, Ui, Vec2};
use dv_core::sync::SliderState;
use dv_core::{ControlEvent, LinearScale, RangeSelectionController, YearRange};

use crate::theme::accent_color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Thumb {
    Start,
    End,
}

impl Thumb {
    /// Thumb positions after moving this thumb to `year`
    fn moved(self, slider: SliderState, year: i32) -> (i32, i32) {
        match self {
            Thumb::Start => (year, slider.end),
            Thumb::End => (slider.start, year),
        }
    }
}

/// Thumb closest to `px`. When both thumbs sit on the same spot the
/// pointer side decides, so overlapping thumbs can still be pulled apart.
fn nearest_thumb(px: f32, start_px: f32, end_px: f32) -> Thumb {
    let (to_start, to_end) = ((px - start_px).abs(), (px - end_px).abs());
    if to_start < to_end {
        Thumb::Start
    } else if to_end < to_start {
        Thumb::End
    } else if px < start_px.min(end_px) {
        if start_px <= end_px { Thumb::Start } else { Thumb::End }
    } else if start_px <= end_px {
        Thumb::End
    } else {
        Thumb::Start
    }
}

/// Whole year under screen x, clamped into the extent
fn year_at(scale: &LinearScale, px: f32, extent: YearRange) -> i32 {
    (scale.invert(px).round() as i32).clamp(extent.lo(), extent.hi())
}

/// Slider configuration
#[derive(Debug, Clone)]
pub struct RangeSliderConfig {
    pub height: f32,
    pub thumb_radius: f32,
    pub track_height: f32,
}

impl Default for RangeSliderConfig {
    fn default() -> Self {
        Self {
            height: 24.0,
            thumb_radius: 7.0,
            track_height: 4.0,
        }
    }
}

/// Year range slider widget
#[derive(Debug, Default)]
pub struct RangeSlider {
    pub config: RangeSliderConfig,
    active: Option<Thumb>,
}

impl RangeSlider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ui(&mut self, ui: &mut Ui, controller: &mut RangeSelectionController) -> Response {
        let extent = controller.filter().extent();
        let desired = Vec2::new(ui.available_width().max(4.0 * self.config.thumb_radius), self.config.height);
        let (rect, response) = ui.allocate_exact_size(desired, Sense::click_and_drag());
        let track = rect.shrink2(Vec2::new(self.config.thumb_radius, 0.0));
        let scale = LinearScale::new(
            (f64::from(extent.lo()), f64::from(extent.hi())),
            (track.left(), track.right()),
        );
        let thumb_px = |year: i32| scale.apply(f64::from(year));

        let slider = controller.slider();
        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.active = Some(nearest_thumb(pos.x, thumb_px(slider.start), thumb_px(slider.end)));
            }
        }

        if response.dragged() {
            if let (Some(thumb), Some(pos)) = (self.active, response.interact_pointer_pos()) {
                let (start, end) = thumb.moved(slider, year_at(&scale, pos.x, extent));
                if (start, end) != (slider.start, slider.end) {
                    controller.handle(ControlEvent::SliderInput { start, end });
                }
            }
        }

        if response.drag_released() {
            if self.active.take().is_some() {
                let SliderState { start, end } = controller.slider();
                controller.handle(ControlEvent::SliderChange { start, end });
            }
        } else if response.clicked() && self.active.is_none() {
            if let Some(pos) = response.interact_pointer_pos() {
                let thumb = nearest_thumb(pos.x, thumb_px(slider.start), thumb_px(slider.end));
                let (start, end) = thumb.moved(slider, year_at(&scale, pos.x, extent));
                controller.handle(ControlEvent::SliderChange { start, end });
            }
        }

        self.paint(ui, &response, track, controller.slider(), &thumb_px);
        response
    }

    fn paint(&self, ui: &Ui, response: &Response, track: Rect, slider: SliderState, thumb_px: &dyn Fn(i32) -> f32) {
        let painter = ui.painter();
        let visuals = ui.visuals();
        let cy = track.center().y;
        let half = self.config.track_height / 2.0;

        painter.rect_filled(
            Rect::from_x_y_ranges(track.x_range(), (cy - half)..=(cy + half)),
            Rounding::same(half),
            visuals.extreme_bg_color,
        );

        let range = slider.readout();
        let (left, right) = (thumb_px(range.lo()), thumb_px(range.hi()));
        painter.rect_filled(
            Rect::from_x_y_ranges(left..=right, (cy - half)..=(cy + half)),
            Rounding::same(half),
            accent_color(),
        );

        for (thumb, year) in [(Thumb::Start, slider.start), (Thumb::End, slider.end)] {
            let center = Pos2::new(thumb_px(year), cy);
            let active = self.active == Some(thumb);
            let fill = if active || response.hovered() {
                visuals.widgets.hovered.fg_stroke.color
            } else {
                visuals.widgets.inactive.fg_stroke.color
            };
            painter.circle(center, self.config.thumb_radius, fill, Stroke::new(1.5, accent_color()));
        }

        if self.active.is_some() {
            painter.rect_stroke(response.rect, Rounding::same(2.0), Stroke::new(1.0, Color32::from_gray(90)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_thumb() {
        assert_eq!(nearest_thumb(10.0, 0.0, 100.0), Thumb::Start);
        assert_eq!(nearest_thumb(90.0, 0.0, 100.0), Thumb::End);
        // Crossed thumbs keep their identity
        assert_eq!(nearest_thumb(90.0, 100.0, 0.0), Thumb::Start);
    }

    #[test]
    fn test_overlapping_thumbs_split_by_pointer_side() {
        assert_eq!(nearest_thumb(40.0, 50.0, 50.0), Thumb::Start);
        assert_eq!(nearest_thumb(60.0, 50.0, 50.0), Thumb::End);
    }

    #[test]
    fn test_thumbs_may_cross() {
        let slider = SliderState { start: 1990, end: 2000 };
        assert_eq!(Thumb::Start.moved(slider, 2005), (2005, 2000));
        assert_eq!(Thumb::End.moved(slider, 1985), (1990, 1985));
    }

    #[test]
    fn test_year_at_rounds_and_clamps() {
        let extent = YearRange::new(1985, 2020);
        let scale = LinearScale::new((1985.0, 2020.0), (0.0, 350.0));
        assert_eq!(year_at(&scale, 0.0, extent), 1985);
        assert_eq!(year_at(&scale, 154.0, extent), 2000);
        assert_eq!(year_at(&scale, -40.0, extent), 1985);
        assert_eq!(year_at(&scale, 999.0, extent), 2020);
    }
}
