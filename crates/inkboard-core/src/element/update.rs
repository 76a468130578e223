//! Partial element updates.

use super::{Color, Element, ElementBody, ImageFit, PathProps, TextAlign};
use serde::{Deserialize, Serialize};

/// A shallow, partial set of element properties.
///
/// Every present field overwrites the matching property; fields that don't
/// exist on the target's kind are ignored. `id` and `type` cannot be changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,

    // Shapes and images
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    // Shapes and text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<Color>,

    // Shapes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,

    // Text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<TextAlign>,

    // Images
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fit: Option<ImageFit>,

    // Paths
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
}

impl ElementUpdate {
    /// Update that moves an element.
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    /// Update that replaces path geometry.
    pub fn points(points: Vec<f64>) -> Self {
        Self {
            points: Some(points),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge this update into `element`.
    pub fn apply_to(&self, element: &mut Element) {
        if let Some(x) = self.x {
            element.x = x;
        }
        if let Some(y) = self.y {
            element.y = y;
        }
        if let Some(rotation) = self.rotation {
            element.rotation = rotation;
        }
        if let Some(opacity) = self.opacity {
            element.opacity = opacity.clamp(0.0, 1.0);
        }
        if let Some(locked) = self.locked {
            element.locked = locked;
        }

        match &mut element.body {
            ElementBody::Text(text) => {
                if let Some(content) = &self.text {
                    text.text.clone_from(content);
                }
                if let Some(size) = self.font_size {
                    text.font_size = size;
                }
                if let Some(family) = &self.font_family {
                    text.font_family.clone_from(family);
                }
                if let Some(align) = self.align {
                    text.align = align;
                }
                if let Some(fill) = self.fill {
                    text.fill = fill;
                }
            }
            ElementBody::Image(image) => {
                if let Some(src) = &self.src {
                    image.src.clone_from(src);
                }
                if let Some(width) = self.width {
                    image.width = width;
                }
                if let Some(height) = self.height {
                    image.height = height;
                }
                if let Some(fit) = self.fit {
                    image.fit = fit;
                }
            }
            ElementBody::Line(path) | ElementBody::Freehand(path) => {
                if let Some(points) = &self.points {
                    if PathProps::is_valid_points(points) {
                        path.points.clone_from(points);
                    } else {
                        log::warn!(
                            "Ignoring {} path points for element {}: need an even count >= 2",
                            points.len(),
                            element.id
                        );
                    }
                }
                if let Some(stroke) = self.stroke {
                    path.stroke = stroke;
                }
                if let Some(width) = self.stroke_width {
                    path.stroke_width = width;
                }
            }
            body => {
                // Every remaining variant is a shape.
                if let Some(shape) = body.as_shape_mut() {
                    if let Some(width) = self.width {
                        shape.width = width;
                    }
                    if let Some(height) = self.height {
                        shape.height = height;
                    }
                    if let Some(fill) = self.fill {
                        shape.fill = fill;
                    }
                    if let Some(color) = self.border_color {
                        shape.border_color = Some(color);
                    }
                    if let Some(width) = self.border_width {
                        shape.border_width = Some(width);
                    }
                    if let Some(radius) = self.border_radius {
                        shape.border_radius = Some(radius);
                    }
                }
            }
        }
    }
}
