//! Drawable elements of a scene.

mod color;
mod update;

pub use color::{Background, Color, ColorParseError};
pub use update::ElementUpdate;

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for elements.
///
/// Fresh ids are UUID v4 strings, but ids supplied by external collaborators
/// are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Generate a new random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ElementId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Element discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    Rect,
    Circle,
    Triangle,
    Pill,
    Star,
    Diamond,
    Octagon,
    HalfOctagon,
    Text,
    Image,
    Line,
    Freehand,
}

impl ElementKind {
    /// Get all element kinds.
    pub fn all() -> &'static [ElementKind] {
        &[
            ElementKind::Rect,
            ElementKind::Circle,
            ElementKind::Triangle,
            ElementKind::Pill,
            ElementKind::Star,
            ElementKind::Diamond,
            ElementKind::Octagon,
            ElementKind::HalfOctagon,
            ElementKind::Text,
            ElementKind::Image,
            ElementKind::Line,
            ElementKind::Freehand,
        ]
    }

    /// Name as used in serialized documents.
    pub fn name(self) -> &'static str {
        match self {
            ElementKind::Rect => "rect",
            ElementKind::Circle => "circle",
            ElementKind::Triangle => "triangle",
            ElementKind::Pill => "pill",
            ElementKind::Star => "star",
            ElementKind::Diamond => "diamond",
            ElementKind::Octagon => "octagon",
            ElementKind::HalfOctagon => "half-octagon",
            ElementKind::Text => "text",
            ElementKind::Image => "image",
            ElementKind::Line => "line",
            ElementKind::Freehand => "freehand",
        }
    }

    pub fn is_shape(self) -> bool {
        !matches!(
            self,
            ElementKind::Text | ElementKind::Image | ElementKind::Line | ElementKind::Freehand
        )
    }

    pub fn is_path(self) -> bool {
        matches!(self, ElementKind::Line | ElementKind::Freehand)
    }

    /// Kind-specific properties a freshly added element starts with.
    pub fn default_body(self) -> ElementBody {
        let shape = |width: f64, height: f64, fill: Color| ShapeProps {
            width,
            height,
            fill,
            border_color: None,
            border_width: None,
            border_radius: None,
        };
        let path = |points: Vec<f64>| PathProps {
            points,
            stroke: Color::ink(),
            stroke_width: 4.0,
        };

        match self {
            ElementKind::Rect => ElementBody::Rect(shape(200.0, 120.0, Color::rgb(0x3b, 0x82, 0xf6))),
            ElementKind::Circle => ElementBody::Circle(shape(140.0, 140.0, Color::rgb(0xf9, 0x73, 0x16))),
            ElementKind::Triangle => {
                ElementBody::Triangle(shape(160.0, 140.0, Color::rgb(0x22, 0xc5, 0x5e)))
            }
            ElementKind::Pill => ElementBody::Pill(ShapeProps {
                border_radius: Some(40.0),
                ..shape(220.0, 80.0, Color::rgb(0xa8, 0x55, 0xf7))
            }),
            ElementKind::Star => ElementBody::Star(shape(160.0, 160.0, Color::rgb(0xea, 0xb3, 0x08))),
            ElementKind::Diamond => {
                ElementBody::Diamond(shape(160.0, 160.0, Color::rgb(0xef, 0x44, 0x44)))
            }
            ElementKind::Octagon => {
                ElementBody::Octagon(shape(160.0, 160.0, Color::rgb(0x14, 0xb8, 0xa6)))
            }
            ElementKind::HalfOctagon => {
                ElementBody::HalfOctagon(shape(200.0, 100.0, Color::rgb(0x64, 0x74, 0x8b)))
            }
            ElementKind::Text => ElementBody::Text(TextProps {
                text: "Text".to_string(),
                font_size: TextProps::DEFAULT_FONT_SIZE,
                font_family: "Inter".to_string(),
                align: TextAlign::default(),
                fill: Color::ink(),
            }),
            ElementKind::Image => ElementBody::Image(ImageProps {
                src: String::new(),
                width: 240.0,
                height: 160.0,
                fit: ImageFit::default(),
            }),
            ElementKind::Line => ElementBody::Line(path(vec![0.0, 0.0, 160.0, 0.0])),
            ElementKind::Freehand => ElementBody::Freehand(path(vec![0.0, 0.0])),
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Properties shared by all closed shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeProps {
    pub width: f64,
    pub height: f64,
    pub fill: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextProps {
    pub text: String,
    pub font_size: f64,
    pub font_family: String,
    #[serde(default)]
    pub align: TextAlign,
    pub fill: Color,
}

impl TextProps {
    pub const DEFAULT_FONT_SIZE: f64 = 32.0;
}

/// How an image is fitted into its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFit {
    #[default]
    Contain,
    Cover,
    Fill,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageProps {
    /// Opaque reference resolved by the asset loader.
    pub src: String,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub fit: ImageFit,
}

/// Open polyline stroke.
///
/// `points` is a flat list of alternating x/y offsets relative to the
/// element origin, always of even length >= 2.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathProps {
    pub points: Vec<f64>,
    pub stroke: Color,
    pub stroke_width: f64,
}

impl PathProps {
    /// Check whether a flat point list is usable as path geometry.
    pub fn is_valid_points(points: &[f64]) -> bool {
        points.len() >= 2 && points.len() % 2 == 0
    }

    /// Number of coordinate pairs.
    pub fn pair_count(&self) -> usize {
        self.points.len() / 2
    }

    /// Iterate over the offsets as points.
    pub fn offsets(&self) -> impl Iterator<Item = Point> + '_ {
        self.points
            .chunks_exact(2)
            .map(|pair| Point::new(pair[0], pair[1]))
    }

    /// Append an offset to the polyline.
    pub fn push_offset(&mut self, offset: Vec2) {
        self.points.push(offset.x);
        self.points.push(offset.y);
    }
}

/// Kind-specific part of an element, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ElementBody {
    Rect(ShapeProps),
    Circle(ShapeProps),
    Triangle(ShapeProps),
    Pill(ShapeProps),
    Star(ShapeProps),
    Diamond(ShapeProps),
    Octagon(ShapeProps),
    HalfOctagon(ShapeProps),
    Text(TextProps),
    Image(ImageProps),
    Line(PathProps),
    Freehand(PathProps),
}

impl ElementBody {
    pub fn kind(&self) -> ElementKind {
        match self {
            ElementBody::Rect(_) => ElementKind::Rect,
            ElementBody::Circle(_) => ElementKind::Circle,
            ElementBody::Triangle(_) => ElementKind::Triangle,
            ElementBody::Pill(_) => ElementKind::Pill,
            ElementBody::Star(_) => ElementKind::Star,
            ElementBody::Diamond(_) => ElementKind::Diamond,
            ElementBody::Octagon(_) => ElementKind::Octagon,
            ElementBody::HalfOctagon(_) => ElementKind::HalfOctagon,
            ElementBody::Text(_) => ElementKind::Text,
            ElementBody::Image(_) => ElementKind::Image,
            ElementBody::Line(_) => ElementKind::Line,
            ElementBody::Freehand(_) => ElementKind::Freehand,
        }
    }

    pub fn as_shape(&self) -> Option<&ShapeProps> {
        match self {
            ElementBody::Rect(s)
            | ElementBody::Circle(s)
            | ElementBody::Triangle(s)
            | ElementBody::Pill(s)
            | ElementBody::Star(s)
            | ElementBody::Diamond(s)
            | ElementBody::Octagon(s)
            | ElementBody::HalfOctagon(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_shape_mut(&mut self) -> Option<&mut ShapeProps> {
        match self {
            ElementBody::Rect(s)
            | ElementBody::Circle(s)
            | ElementBody::Triangle(s)
            | ElementBody::Pill(s)
            | ElementBody::Star(s)
            | ElementBody::Diamond(s)
            | ElementBody::Octagon(s)
            | ElementBody::HalfOctagon(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&PathProps> {
        match self {
            ElementBody::Line(p) | ElementBody::Freehand(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_path_mut(&mut self) -> Option<&mut PathProps> {
        match self {
            ElementBody::Line(p) | ElementBody::Freehand(p) => Some(p),
            _ => None,
        }
    }
}

fn default_opacity() -> f64 {
    1.0
}

/// One drawable unit of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub(crate) id: ElementId,
    /// Left edge in canvas units.
    pub x: f64,
    /// Top edge in canvas units.
    pub y: f64,
    /// Rotation in degrees.
    #[serde(default)]
    pub rotation: f64,
    /// Opacity in `0.0..=1.0`.
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    /// Locked elements ignore pointer interaction.
    #[serde(default)]
    pub locked: bool,
    #[serde(flatten)]
    pub body: ElementBody,
}

impl Element {
    /// Create an element with a fresh id at the origin.
    pub fn new(body: ElementBody) -> Self {
        Self::with_id(ElementId::new(), body)
    }

    /// Create an element with a caller-chosen id (for storage and tests).
    pub fn with_id(id: impl Into<ElementId>, body: ElementBody) -> Self {
        Self {
            id: id.into(),
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            opacity: default_opacity(),
            locked: false,
            body,
        }
    }

    /// Create an element of `kind` from its defaults.
    pub fn from_kind(kind: ElementKind) -> Self {
        Self::new(kind.default_body())
    }

    pub fn id(&self) -> &ElementId {
        &self.id
    }

    pub fn kind(&self) -> ElementKind {
        self.body.kind()
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Builder-style position setter.
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn as_path(&self) -> Option<&PathProps> {
        self.body.as_path()
    }
}
