//! Display List for Layout Rendering
//!
//! A DisplayList is an in-memory scene: it records every primitive the
//! layout strategies emit, already translated to absolute coordinates, so
//! a front end (JavaScript, the SVG writer) can draw without doing any
//! layout of its own.

use super::config::RenderConfig;
use super::scene::{FontMetrics, FontSpec, Point, Primitive, Scene, TextMeasure};
use crate::models::NlpInstance;
use serde::{Deserialize, Serialize};

/// Width and height consumed by a layout
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
}

impl Dimensions {
    pub fn new(width: f32, height: f32) -> Self {
        debug_assert!(
            width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0,
            "invalid dimensions {}x{}",
            width,
            height
        );
        Self { width, height }
    }
}

/// Recorded primitives plus the overall drawing size
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct DisplayList {
    /// Total width of the drawing
    pub width: f32,

    /// Total height of the drawing
    pub height: f32,

    /// Primitives in paint order, absolute coordinates
    pub primitives: Vec<Primitive>,

    #[serde(skip)]
    origin: Point,

    #[serde(skip)]
    metrics: FontMetrics,
}

impl DisplayList {
    /// Create an empty display list with the default font metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty display list measuring text with the given metrics
    pub fn with_metrics(metrics: FontMetrics) -> Self {
        Self {
            metrics,
            ..Self::default()
        }
    }

    /// Lay out an instance into a fresh display list
    pub fn render(instance: &NlpInstance, config: &RenderConfig) -> Self {
        let mut list = DisplayList::with_metrics(config.metrics);
        let dimensions = super::render(instance, &mut list, config);
        list.width = dimensions.width;
        list.height = dimensions.height;
        list
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Text primitives in paint order
    pub fn texts(&self) -> impl Iterator<Item = (&Point, &str)> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text { origin, text, .. } => Some((origin, text.as_str())),
            _ => None,
        })
    }
}

impl TextMeasure for DisplayList {
    fn text_width(&self, text: &str, font: &FontSpec) -> f32 {
        self.metrics.text_width(text, font)
    }

    fn text_height(&self, font: &FontSpec) -> f32 {
        self.metrics.text_height(font)
    }
}

impl Scene for DisplayList {
    fn add(&mut self, primitive: Primitive) {
        self.primitives
            .push(primitive.translated(self.origin.x, self.origin.y));
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.origin = self.origin.offset(dx, dy);
    }

    fn origin(&self) -> Point {
        self.origin
    }
}
