//! Star rating components: the interactive input row and a read-only badge.

use std::f32::consts::PI;

use edushare_core::{Rating, RatingDocument, RatingWidget, RATING_SCALE};
use egui::{
    vec2, Color32, CursorIcon, Painter, Pos2, Rect, Response, RichText, Sense, Shape, Stroke, Ui,
};

use crate::{sizing, theme};

/// Inner radius of a star as a fraction of its outer radius.
const INNER_RATIO: f32 = 0.45;

/// Width of a full row of stars.
fn row_width(size: f32) -> f32 {
    RATING_SCALE as f32 * size + (RATING_SCALE as f32 - 1.0) * sizing::STAR_GAP
}

/// Cell of the star at `index` (0-based) in a row starting at `origin`.
pub fn star_rect(origin: Pos2, index: usize, size: f32) -> Rect {
    let x = origin.x + index as f32 * (size + sizing::STAR_GAP);
    Rect::from_min_size(Pos2::new(x, origin.y), vec2(size, size))
}

/// Rating position (1-based) under horizontal coordinate `x`, if any.
///
/// The gap after a star belongs to that star.
pub fn position_at(origin: Pos2, size: f32, x: f32) -> Option<u8> {
    let offset = x - origin.x;
    if offset < 0.0 || offset >= row_width(size) {
        return None;
    }
    let index = (offset / (size + sizing::STAR_GAP)).floor() as u8;
    Some((index + 1).min(RATING_SCALE))
}

/// Outline of a five-pointed star, alternating outer and inner vertices
/// clockwise from the top point.
pub fn star_points(center: Pos2, radius: f32) -> [Pos2; 10] {
    std::array::from_fn(|k| {
        let angle = -PI / 2.0 + k as f32 * PI / 5.0;
        let r = if k % 2 == 0 { radius } else { radius * INNER_RATIO };
        Pos2::new(center.x + r * angle.cos(), center.y + r * angle.sin())
    })
}

fn paint_star(painter: &Painter, rect: Rect, fill: Option<Color32>) {
    let points = star_points(rect.center(), rect.width() * 0.5);

    if let Some(fill) = fill {
        // egui only fills convex shapes: a pentagon body plus five tips.
        let body: Vec<Pos2> = points.iter().skip(1).step_by(2).copied().collect();
        painter.add(Shape::convex_polygon(body, fill, Stroke::NONE));
        for i in 0..5 {
            let tip = vec![points[(2 * i + 9) % 10], points[2 * i], points[2 * i + 1]];
            painter.add(Shape::convex_polygon(tip, fill, Stroke::NONE));
        }
    }

    let outline = fill.unwrap_or(theme::STAR_EMPTY);
    painter.add(Shape::closed_line(points.to_vec(), Stroke::new(1.0, outline)));
}

/// Response from a rating row.
pub struct RatingStarsResponse {
    /// Rating committed by a click this frame
    pub selected: Option<Rating>,
    /// The underlying egui Response
    pub response: Response,
}

/// Interactive star row bound to a mounted [`RatingWidget`].
///
/// Clicking a star selects it through the widget, so the widget's document
/// (and its backing field) stays the single source of truth.
pub struct RatingStars<'a, D: RatingDocument> {
    widget: &'a mut RatingWidget<D>,
    doc: &'a mut D,
    size: f32,
}

impl<'a, D: RatingDocument> RatingStars<'a, D> {
    /// Create a star row for a mounted widget.
    pub fn new(widget: &'a mut RatingWidget<D>, doc: &'a mut D) -> Self {
        Self {
            widget,
            doc,
            size: sizing::STAR,
        }
    }

    /// Set the star size.
    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Show the row and apply any click to the widget.
    pub fn show(mut self, ui: &mut Ui) -> RatingStarsResponse {
        let size = self.size;
        let (rect, response) =
            ui.allocate_exact_size(vec2(row_width(size), size), Sense::click());

        let mut selected = None;
        if response.clicked() {
            if let Some(position) = response
                .interact_pointer_pos()
                .and_then(|p| position_at(rect.min, size, p.x))
            {
                selected = self.widget.select(self.doc, position);
            }
        }

        if ui.is_rect_visible(rect) {
            let hovered = response
                .hover_pos()
                .and_then(|p| position_at(rect.min, size, p.x));
            let painter = ui.painter();
            for symbol in self.widget.symbols() {
                let fill = if symbol.state().is_filled() {
                    Some(theme::STAR_FILLED)
                } else if hovered.is_some_and(|h| symbol.position() <= h) {
                    Some(theme::STAR_HOVER)
                } else {
                    None
                };
                let index = usize::from(symbol.position() - 1);
                paint_star(painter, star_rect(rect.min, index, size), fill);
            }
        }

        let response = response.on_hover_cursor(CursorIcon::PointingHand);
        RatingStarsResponse { selected, response }
    }
}

/// Read-only display of an average rating.
pub struct RatingBadge {
    average: Option<f64>,
    size: f32,
}

impl RatingBadge {
    /// Create a badge for an average (`None` when unrated).
    pub fn new(average: Option<f64>) -> Self {
        Self {
            average,
            size: sizing::BADGE_STAR,
        }
    }

    /// Set the star size.
    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Number of stars drawn filled: the average rounded to the nearest point.
    pub fn filled_stars(&self) -> usize {
        self.average
            .map(|a| a.round().clamp(0.0, f64::from(RATING_SCALE)) as usize)
            .unwrap_or(0)
    }

    /// Label shown next to the stars.
    pub fn label(&self) -> String {
        match self.average {
            Some(average) => format!("{:.2} / {}", average, RATING_SCALE),
            None => "Not rated".to_string(),
        }
    }

    /// Show the badge.
    pub fn show(self, ui: &mut Ui) -> Response {
        let filled = self.filled_stars();
        let label = self.label();
        ui.horizontal(|ui| {
            let (rect, _) =
                ui.allocate_exact_size(vec2(row_width(self.size), self.size), Sense::hover());
            if ui.is_rect_visible(rect) {
                let painter = ui.painter();
                for index in 0..usize::from(RATING_SCALE) {
                    let fill = (index < filled).then_some(theme::STAR_FILLED);
                    paint_star(painter, star_rect(rect.min, index, self.size), fill);
                }
            }
            ui.label(RichText::new(label).size(11.0).color(theme::TEXT_MUTED));
        })
        .response
    }
}
