//! Stacked-area timeline with a brush for selecting years

use egui::{pos2, Align2, Color32, FontId, Pos2, Rect, Response, RichText, Sense, Shape, Stroke, Ui, Vec2};
use dv_core::{Category, ControlEvent, LinearScale, YearCounts, YearRange};

use crate::colors::category_color;
use crate::format::format_count;
use crate::legend::legend_ui;
use crate::{SpaceView, SpaceViewId, ViewerContext, EMPTY_SELECTION_MESSAGE};

const MARGIN_LEFT: f32 = 52.0;
const MARGIN_RIGHT: f32 = 16.0;
const MARGIN_TOP: f32 = 8.0;
const MARGIN_BOTTOM: f32 = 24.0;

/// Opacity of the hovered layer and of the others while one is hovered
const ALPHA_FOCUSED: f32 = 0.95;
const ALPHA_DIMMED: f32 = 0.5;

/// Timeline configuration
#[derive(Debug, Clone)]
pub struct TimelineConfig {
    /// Approximate number of year ticks
    pub x_ticks: usize,

    /// Approximate number of count ticks
    pub y_ticks: usize,

    /// Horizontal drag distance below which a gesture is a click
    pub min_brush_px: f32,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            x_ticks: 10,
            y_ticks: 5,
            min_brush_px: 3.0,
        }
    }
}

/// Lower and upper edge of each category layer for one year, stacked in
/// display order
type Bands = [(f64, f64); Category::COUNT];

fn stack(counts: &YearCounts) -> Bands {
    let mut bands = [(0.0, 0.0); Category::COUNT];
    let mut base = 0.0;
    for category in Category::ALL {
        let top = base + counts.count(category) as f64;
        bands[category.index()] = (base, top);
        base = top;
    }
    bands
}

/// Layer containing stacked value `y`
fn band_at(bands: &Bands, y: f64) -> Option<Category> {
    Category::ALL.into_iter().find(|c| {
        let (lo, hi) = bands[c.index()];
        hi > lo && y >= lo && y < hi
    })
}

/// Nearest whole year to a chart x value, clamped into the extent
fn nearest_year(x: f64, extent: YearRange) -> i32 {
    (x.round() as i32).clamp(extent.lo(), extent.hi())
}

fn x_scale(extent: YearRange, rect: Rect, ticks: usize) -> LinearScale {
    let (lo, hi) = (f64::from(extent.lo()), f64::from(extent.hi()));
    let domain = if lo == hi { (lo - 1.0, hi + 1.0) } else { (lo, hi) };
    LinearScale::new(domain, (rect.left(), rect.right())).nice(ticks)
}

fn y_scale(max_total: usize, rect: Rect, ticks: usize) -> LinearScale {
    LinearScale::new((0.0, max_total.max(1) as f64), (rect.bottom(), rect.top())).nice(ticks)
}

/// Brush gesture in progress, in screen x
#[derive(Debug, Clone, Copy)]
struct BrushDrag {
    origin_px: f32,
    current_px: f32,
}

impl BrushDrag {
    fn moved(&self, threshold: f32) -> bool {
        (self.current_px - self.origin_px).abs() >= threshold
    }
}

#[derive(Debug, Clone, Copy)]
struct Hover {
    year: i32,
    band: Option<Category>,
}

/// Stacked areas of allegations per year and category
pub struct TimelineView {
    title: String,
    pub config: TimelineConfig,
    drag: Option<BrushDrag>,
}

impl TimelineView {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            config: TimelineConfig::default(),
            drag: None,
        }
    }

    /// Turn pointer gestures into brush events for the controller
    fn handle_brush(&mut self, ctx: &ViewerContext, response: &Response, x: &LinearScale, extent: YearRange) {
        let (lo, hi) = (f64::from(extent.lo()), f64::from(extent.hi()));
        let to_chart = |px: f32| x.invert(px).clamp(lo, hi);
        let threshold = self.config.min_brush_px;
        let mut events = Vec::new();

        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.drag = Some(BrushDrag { origin_px: pos.x, current_px: pos.x });
            }
        }

        if response.dragged() {
            if let (Some(drag), Some(pos)) = (self.drag.as_mut(), response.interact_pointer_pos()) {
                drag.current_px = pos.x;
                if drag.moved(threshold) {
                    let selection = (to_chart(drag.origin_px), to_chart(drag.current_px));
                    events.push(ControlEvent::BrushMove(Some(selection)));
                }
            }
        }

        if response.drag_released() {
            if let Some(drag) = self.drag.take() {
                let selection = drag
                    .moved(threshold)
                    .then(|| (to_chart(drag.origin_px), to_chart(drag.current_px)));
                events.push(ControlEvent::BrushEnd(selection));
            }
        } else if response.clicked() && self.drag.is_none() {
            events.push(ControlEvent::BrushEnd(None));
        }

        if !events.is_empty() {
            let mut controller = ctx.controller.lock();
            for event in events {
                controller.handle(event);
            }
        }
    }

    fn paint_axes(&self, ui: &Ui, painter: &egui::Painter, rect: Rect, x: &LinearScale, y: &LinearScale) {
        let text_color = ui.visuals().weak_text_color();
        let grid = Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color);
        let font = FontId::proportional(11.0);

        for value in y.ticks(self.config.y_ticks) {
            let py = y.apply(value);
            painter.line_segment([pos2(rect.left(), py), pos2(rect.right(), py)], grid);
            painter.text(
                pos2(rect.left() - 6.0, py),
                Align2::RIGHT_CENTER,
                format_count(value as usize),
                font.clone(),
                text_color,
            );
        }

        for value in x.ticks(self.config.x_ticks).into_iter().filter(|v| v.fract() == 0.0) {
            let px = x.apply(value);
            painter.line_segment([pos2(px, rect.bottom()), pos2(px, rect.bottom() + 4.0)], grid);
            painter.text(
                pos2(px, rect.bottom() + 6.0),
                Align2::CENTER_TOP,
                format!("{}", value as i32),
                font.clone(),
                text_color,
            );
        }

        painter.line_segment([rect.left_bottom(), rect.right_bottom()], Stroke::new(1.0, text_color));
    }

    fn paint_layers(
        &self,
        painter: &egui::Painter,
        series: &[YearCounts],
        bands: &[Bands],
        to_screen: impl Fn(i32, f64) -> Pos2,
        hovered: Option<Category>,
    ) {
        let fill = |category: Category| {
            let alpha = match hovered {
                Some(h) if h != category => ALPHA_DIMMED,
                _ => ALPHA_FOCUSED,
            };
            category_color(category).gamma_multiply(alpha)
        };

        if let ([only], [only_bands]) = (series, bands) {
            for category in Category::ALL {
                let (lo, hi) = only_bands[category.index()];
                if hi > lo {
                    let rect = Rect::from_two_pos(
                        to_screen(only.year, lo) - Vec2::new(12.0, 0.0),
                        to_screen(only.year, hi) + Vec2::new(12.0, 0.0),
                    );
                    painter.rect_filled(rect, 0.0, fill(category));
                }
            }
            return;
        }

        for (years, edges) in series.windows(2).zip(bands.windows(2)) {
            let (y0, y1) = (years[0].year, years[1].year);
            for category in Category::ALL {
                let (lo0, hi0) = edges[0][category.index()];
                let (lo1, hi1) = edges[1][category.index()];
                if hi0 == lo0 && hi1 == lo1 {
                    continue;
                }
                let quad = vec![
                    to_screen(y0, lo0),
                    to_screen(y1, lo1),
                    to_screen(y1, hi1),
                    to_screen(y0, hi0),
                ];
                painter.add(Shape::convex_polygon(quad, fill(category), Stroke::NONE));
            }
        }
    }

    fn tooltip_ui(ui: &mut Ui, counts: &YearCounts, hovered: Option<Category>) {
        ui.strong(counts.year.to_string());
        egui::Grid::new("timeline_tooltip").num_columns(2).show(ui, |ui| {
            // Top layer first, matching the stack on screen
            for category in Category::ALL.into_iter().rev() {
                let label = RichText::new(category.label()).color(category_color(category));
                ui.label(if hovered == Some(category) { label.strong() } else { label });
                ui.label(format_count(counts.count(category)));
                ui.end_row();
            }
            ui.strong("Total");
            ui.strong(format_count(counts.total()));
            ui.end_row();
        });
    }
}

impl SpaceView for TimelineView {
    fn id(&self) -> SpaceViewId {
        SpaceViewId::Timeline
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) {
        if ctx.settings.read().show_legend {
            legend_ui(ui, ctx.filter.categories());
        }
        ui.label(RichText::new("Drag across the chart to select years. Click or press Esc to clear.").weak().small());

        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let plot_rect = Rect::from_min_max(
            response.rect.min + Vec2::new(MARGIN_LEFT, MARGIN_TOP),
            response.rect.max - Vec2::new(MARGIN_RIGHT, MARGIN_BOTTOM),
        );
        if plot_rect.width() <= 0.0 || plot_rect.height() <= 0.0 {
            return;
        }

        let extent = ctx.filter.extent();
        let x = x_scale(extent, plot_rect, self.config.x_ticks);
        self.handle_brush(ctx, &response, &x, extent);

        // Read after the brush so a commit made this frame is drawn this frame
        let snapshot = ctx.snapshot();
        let y = y_scale(snapshot.max_year_total(), plot_rect, self.config.y_ticks);
        let bands: Vec<Bands> = snapshot.series.iter().map(stack).collect();
        let to_screen = |year: i32, value: f64| pos2(x.apply(f64::from(year)), y.apply(value));

        let hover = if self.drag.is_none() && !snapshot.is_empty() {
            response.hover_pos().filter(|p| plot_rect.contains(*p)).and_then(|pos| {
                let year = nearest_year(x.invert(pos.x), extent);
                let offset = extent.offset_of(year)?;
                Some(Hover {
                    year,
                    band: band_at(&bands[offset], y.invert(pos.y)),
                })
            })
        } else {
            None
        };

        self.paint_axes(ui, &painter, plot_rect, &x, &y);
        self.paint_layers(&painter, &snapshot.series, &bands, to_screen, hover.and_then(|h| h.band));

        if let Some((a, b)) = ctx.controller.lock().brush().selection() {
            let (left, right) = (x.apply(a.min(b)), x.apply(a.max(b)));
            let brush = Rect::from_x_y_ranges(left..=right, plot_rect.y_range());
            painter.rect(
                brush,
                0.0,
                Color32::from_rgba_unmultiplied(120, 160, 255, 40),
                Stroke::new(1.0, Color32::from_rgb(120, 160, 255)),
            );
        }

        if snapshot.is_empty() {
            painter.text(
                plot_rect.center(),
                Align2::CENTER_CENTER,
                EMPTY_SELECTION_MESSAGE,
                FontId::proportional(14.0),
                ui.visuals().weak_text_color(),
            );
        }

        if let Some(hover) = hover {
            let px = x.apply(f64::from(hover.year));
            painter.line_segment(
                [pos2(px, plot_rect.top()), pos2(px, plot_rect.bottom())],
                Stroke::new(1.0, ui.visuals().strong_text_color()),
            );
            if let Some(counts) = snapshot.year(hover.year) {
                let counts = *counts;
                response.on_hover_ui_at_pointer(|ui| Self::tooltip_ui(ui, &counts, hover.band));
            }
        }
    }
}
