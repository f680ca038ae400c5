//! Render configuration
//!
//! Style parameters for every layout strategy plus the edge style table
//! that maps edge types and labels to draw order and colour. All fields
//! have defaults, so a partial YAML or JS object is a valid configuration.

use super::scene::{Color, FontMetrics, FontSpec};
use crate::diff::DiffCategory;
use crate::error::ConfigError;
use crate::models::Edge;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Token row styling
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct TokenStyle {
    /// Font for token property text
    pub font: FontSpec,

    /// Horizontal gap between adjacent token boxes
    pub margin: f32,

    /// Vertical gap between property rows
    pub row_spacing: f32,

    pub color: Color,

    /// Colour for placeholder tokens
    pub placeholder_color: Color,
}

impl Default for TokenStyle {
    fn default() -> Self {
        Self {
            font: FontSpec::new(12.0, "Helvetica"),
            margin: 20.0,
            row_spacing: 2.0,
            color: Color::BLACK,
            placeholder_color: Color::GRAY,
        }
    }
}

/// Arc (dependency) styling
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct DependencyStyle {
    /// Vertical distance between arc levels
    pub height_per_level: f32,

    /// Cubic curves instead of straight segments
    pub is_curved: bool,

    pub arrow_size: f32,

    /// Font for arc labels
    pub font: FontSpec,

    /// Gap between the lowest arc level and the token row
    pub gap_above_tokens: f32,

    /// Fraction of a token box across which arc anchors are spread
    pub anchor_spread: f32,
}

impl Default for DependencyStyle {
    fn default() -> Self {
        Self {
            height_per_level: 15.0,
            is_curved: true,
            arrow_size: 3.0,
            font: FontSpec::new(10.0, "Helvetica"),
            gap_above_tokens: 4.0,
            anchor_spread: 0.5,
        }
    }
}

/// Span (bracket) styling
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SpanStyle {
    /// Vertical distance between span levels
    pub height_per_level: f32,

    /// Gap between stacked span boxes
    pub gap: f32,

    /// Horizontal room around a span label
    pub text_margin: f32,

    pub corner_radius: f32,

    /// Font for span labels
    pub font: FontSpec,

    pub fill: Color,
}

impl Default for SpanStyle {
    fn default() -> Self {
        Self {
            height_per_level: 18.0,
            gap: 2.0,
            text_margin: 6.0,
            corner_radius: 4.0,
            font: FontSpec::new(10.0, "Helvetica"),
            fill: Color::rgb(0xeb, 0xf2, 0xff),
        }
    }
}

/// Styling for two aligned token rows
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct AlignmentStyle {
    /// Vertical distance between the two rows
    pub height_factor: f32,

    pub is_curved: bool,
}

impl Default for AlignmentStyle {
    fn default() -> Self {
        Self {
            height_factor: 100.0,
            is_curved: true,
        }
    }
}

/// Draw order and colour for one edge type
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TypeStyle {
    /// Full type or type prefix
    pub edge_type: String,

    /// Lower orders are packed nearer the tokens and painted first
    #[serde(default)]
    pub order: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

/// Colours keyed on the diff suffix of an edge type
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct DiffColors {
    pub matched: Color,
    pub false_negative: Color,
    pub false_positive: Color,
}

impl Default for DiffColors {
    fn default() -> Self {
        Self {
            matched: Color::BLACK,
            false_negative: Color::BLUE,
            false_positive: Color::RED,
        }
    }
}

impl DiffColors {
    pub fn color(&self, category: DiffCategory) -> Color {
        match category {
            DiffCategory::Match => self.matched,
            DiffCategory::FalseNegative => self.false_negative,
            DiffCategory::FalsePositive => self.false_positive,
        }
    }
}

/// Resolved style of a single edge
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeStyle {
    pub order: i32,
    pub color: Color,
}

/// Complete configuration for rendering an instance
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    pub token: TokenStyle,
    pub dependency: DependencyStyle,
    pub span: SpanStyle,
    pub alignment: AlignmentStyle,

    /// Whether single-sentence layout draws spans at all
    pub render_spans: bool,

    /// Text measurement used by in-memory scenes
    pub metrics: FontMetrics,

    pub type_styles: Vec<TypeStyle>,

    pub label_colors: BTreeMap<String, Color>,

    pub diff_colors: DiffColors,

    /// Order for types without a [`TypeStyle`]
    pub default_order: i32,

    /// Colour for edges nothing else colours
    pub default_color: Color,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            token: TokenStyle::default(),
            dependency: DependencyStyle::default(),
            span: SpanStyle::default(),
            alignment: AlignmentStyle::default(),
            render_spans: true,
            metrics: FontMetrics::default(),
            type_styles: Vec::new(),
            label_colors: BTreeMap::new(),
            diff_colors: DiffColors::default(),
            default_order: 100,
            default_color: Color::BLACK,
        }
    }
}

impl RenderConfig {
    /// Parse a configuration from YAML text
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load a configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Type style for an edge: exact type first, then the type prefix
    fn type_style(&self, edge: &Edge) -> Option<&TypeStyle> {
        let prefix = edge.type_prefix();
        self.type_styles
            .iter()
            .find(|s| s.edge_type == edge.edge_type)
            .or_else(|| self.type_styles.iter().find(|s| s.edge_type == prefix))
    }

    /// Draw order and colour of an edge
    ///
    /// Colour precedence: diff suffix, label colour, type colour, default.
    pub fn edge_style(&self, edge: &Edge) -> EdgeStyle {
        let type_style = self.type_style(edge);
        let order = type_style.map_or(self.default_order, |s| s.order);
        let color = DiffCategory::of(edge)
            .map(|category| self.diff_colors.color(category))
            .or_else(|| self.label_colors.get(&edge.label).copied())
            .or_else(|| type_style.and_then(|s| s.color))
            .unwrap_or(self.default_color);
        EdgeStyle { order, color }
    }
}
