//! Scene contract consumed by the layout strategies
//!
//! Layouts never draw pixels. They hand abstract primitives (lines,
//! curves, rectangles, text) to a [`Scene`] and ask a [`TextMeasure`] how
//! wide a string will be, so sizing can happen before anything is drawn.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in scene coordinates (x grows right, y grows down)
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Point shifted by an offset
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// RGB colour, written as `#rrggbb`
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const GRAY: Color = Color::rgb(160, 160, 160);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb`
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidColor(text.to_string());
        let hex = text.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Font used for a piece of text
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FontSpec {
    pub size: f32,
    pub family: String,
}

impl FontSpec {
    pub fn new(size: f32, family: impl Into<String>) -> Self {
        Self {
            size,
            family: family.into(),
        }
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new(12.0, "Helvetica")
    }
}

/// Stroke style shared by lines and curves
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Color,
    #[serde(default)]
    pub dashed: bool,
}

impl Stroke {
    pub fn solid(color: Color) -> Self {
        Self { color, dashed: false }
    }
}

/// A rectangle with an optional centred label
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Rectangle {
    /// Top-left corner
    pub origin: Point,
    pub width: f32,
    pub height: f32,
    pub fill: Color,
    pub border: Color,
    pub corner_radius: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub font: FontSpec,
}

/// Geometric primitives accepted by a scene
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    QuadraticCurve {
        from: Point,
        ctrl: Point,
        to: Point,
        stroke: Stroke,
    },
    CubicCurve {
        from: Point,
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
        stroke: Stroke,
    },
    Rectangle(Rectangle),
    /// Text anchored at its left baseline point
    Text {
        origin: Point,
        text: String,
        font: FontSpec,
        color: Color,
    },
}

impl Primitive {
    /// The same primitive moved by an offset
    pub fn translated(self, dx: f32, dy: f32) -> Self {
        match self {
            Primitive::Line { from, to, stroke } => Primitive::Line {
                from: from.offset(dx, dy),
                to: to.offset(dx, dy),
                stroke,
            },
            Primitive::QuadraticCurve { from, ctrl, to, stroke } => Primitive::QuadraticCurve {
                from: from.offset(dx, dy),
                ctrl: ctrl.offset(dx, dy),
                to: to.offset(dx, dy),
                stroke,
            },
            Primitive::CubicCurve { from, ctrl1, ctrl2, to, stroke } => Primitive::CubicCurve {
                from: from.offset(dx, dy),
                ctrl1: ctrl1.offset(dx, dy),
                ctrl2: ctrl2.offset(dx, dy),
                to: to.offset(dx, dy),
                stroke,
            },
            Primitive::Rectangle(rect) => Primitive::Rectangle(Rectangle {
                origin: rect.origin.offset(dx, dy),
                ..rect
            }),
            Primitive::Text { origin, text, font, color } => Primitive::Text {
                origin: origin.offset(dx, dy),
                text,
                font,
                color,
            },
        }
    }
}

/// Text extent queries, answerable without drawing
pub trait TextMeasure {
    /// Advance width of `text` in the given font
    fn text_width(&self, text: &str, font: &FontSpec) -> f32;

    /// Height of one line of text in the given font
    fn text_height(&self, font: &FontSpec) -> f32;
}

/// A drawing target with a movable origin
pub trait Scene: TextMeasure {
    /// Add a line or curve (or any other primitive) relative to the origin
    fn add(&mut self, primitive: Primitive);

    /// Translate the drawing origin for subsequent primitives
    fn translate(&mut self, dx: f32, dy: f32);

    /// Current origin offset
    fn origin(&self) -> Point;

    /// Draw text and return its width
    fn add_text(&mut self, origin: Point, text: &str, font: &FontSpec, color: Color) -> f32 {
        let width = self.text_width(text, font);
        self.add(Primitive::Text {
            origin,
            text: text.to_string(),
            font: font.clone(),
            color,
        });
        width
    }

    /// Draw a rectangle
    fn add_rectangle(&mut self, rectangle: Rectangle) {
        self.add(Primitive::Rectangle(rectangle));
    }
}

/// Monospace estimate of text extents
///
/// Used when no real font backend is available: every character is
/// `char_width_ratio` em wide and a line is `line_height_ratio` em tall.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct FontMetrics {
    pub char_width_ratio: f32,
    pub line_height_ratio: f32,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self {
            char_width_ratio: 0.6,
            line_height_ratio: 1.2,
        }
    }
}

impl TextMeasure for FontMetrics {
    fn text_width(&self, text: &str, font: &FontSpec) -> f32 {
        text.chars().count() as f32 * font.size * self.char_width_ratio
    }

    fn text_height(&self, font: &FontSpec) -> f32 {
        font.size * self.line_height_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parse_and_display() {
        let color = Color::parse("#ff8000").unwrap();
        assert_eq!(color, Color::rgb(255, 128, 0));
        assert_eq!(color.to_string(), "#ff8000");
    }

    #[test]
    fn test_color_parse_rejects_malformed() {
        for text in ["ff8000", "#ff80", "#gg8000", "#ff80000", "#ffé000"] {
            assert!(Color::parse(text).is_err(), "{} should not parse", text);
        }
    }

    #[test]
    fn test_font_metrics_estimate() {
        let metrics = FontMetrics::default();
        let font = FontSpec::new(10.0, "Helvetica");
        assert_eq!(metrics.text_width("gold", &font), 24.0);
        assert_eq!(metrics.text_width("", &font), 0.0);
        assert_eq!(metrics.text_height(&font), 12.0);
    }

    #[test]
    fn test_primitive_translation() {
        let line = Primitive::Line {
            from: Point::new(0.0, 0.0),
            to: Point::new(10.0, 5.0),
            stroke: Stroke::solid(Color::BLACK),
        };
        assert_eq!(
            line.translated(1.0, 2.0),
            Primitive::Line {
                from: Point::new(1.0, 2.0),
                to: Point::new(11.0, 7.0),
                stroke: Stroke::solid(Color::BLACK),
            }
        );
    }
}
