//! Axis-aligned bounds for elements.
//!
//! Bounds gate eraser hit-testing and placement; they are not used for
//! rendering, so text uses a width heuristic instead of glyph metrics.

use crate::element::{Element, ElementBody, PathProps};
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Average glyph advance as a fraction of the font size.
pub const TEXT_ADVANCE_FACTOR: f64 = 0.6;
/// Narrowest box a text element reports.
pub const MIN_TEXT_WIDTH: f64 = 20.0;
/// Smallest extent of a path box along either axis.
pub const MIN_PATH_EXTENT: f64 = 1.0;

/// `{x, y, width, height}` view of a bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl From<Rect> for Bounds {
    fn from(rect: Rect) -> Self {
        Self {
            x: rect.x0,
            y: rect.y0,
            width: rect.width(),
            height: rect.height(),
        }
    }
}

impl From<Bounds> for Rect {
    fn from(b: Bounds) -> Self {
        Rect::new(b.x, b.y, b.x + b.width, b.y + b.height)
    }
}

fn sized(origin: Point, width: f64, height: f64) -> Option<Rect> {
    if !width.is_finite() || !height.is_finite() {
        return None;
    }
    Some(Rect::from_origin_size(origin, (width, height)))
}

fn path_bounds(origin: Point, path: &PathProps) -> Option<Rect> {
    if !PathProps::is_valid_points(&path.points) {
        return None;
    }
    if path.pair_count() < 2 {
        return sized(origin, path.stroke_width, path.stroke_width);
    }

    let mut min = Point::new(f64::INFINITY, f64::INFINITY);
    let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in path.offsets() {
        if !p.x.is_finite() || !p.y.is_finite() {
            return None;
        }
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }

    sized(
        Point::new(origin.x + min.x, origin.y + min.y),
        (max.x - min.x).max(MIN_PATH_EXTENT),
        (max.y - min.y).max(MIN_PATH_EXTENT),
    )
}

/// Compute the canvas-space bounding box of an element.
///
/// Returns `None` for malformed elements (non-finite coordinates or broken
/// path geometry) so callers can skip them.
pub fn bounding_box(element: &Element) -> Option<Rect> {
    let origin = element.position();
    if !origin.x.is_finite() || !origin.y.is_finite() {
        return None;
    }

    match &element.body {
        ElementBody::Rect(s)
        | ElementBody::Circle(s)
        | ElementBody::Triangle(s)
        | ElementBody::Pill(s)
        | ElementBody::Star(s)
        | ElementBody::Diamond(s)
        | ElementBody::Octagon(s)
        | ElementBody::HalfOctagon(s) => sized(origin, s.width, s.height),
        ElementBody::Image(image) => sized(origin, image.width, image.height),
        ElementBody::Text(text) => {
            let chars = text.text.chars().count() as f64;
            let width = (chars * text.font_size * TEXT_ADVANCE_FACTOR).max(MIN_TEXT_WIDTH);
            sized(origin, width, text.font_size)
        }
        ElementBody::Line(path) | ElementBody::Freehand(path) => path_bounds(origin, path),
    }
}

/// Whether `point` lies inside `rect` grown by `radius` on every side.
pub fn point_in_padded_box(point: Point, rect: Rect, radius: f64) -> bool {
    point.x >= rect.x0 - radius
        && point.x <= rect.x1 + radius
        && point.y >= rect.y0 - radius
        && point.y <= rect.y1 + radius
}

/// Origin that centers `size` on the canvas, kept at least `margin` from
/// the top-left edges.
pub fn centered_origin(canvas: Size, size: Size, margin: f64) -> Point {
    Point::new(
        (canvas.width / 2.0 - size.width / 2.0).max(margin),
        (canvas.height / 2.0 - size.height / 2.0).max(margin),
    )
}
