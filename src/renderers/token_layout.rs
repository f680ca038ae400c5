//! Token row layout
//!
//! Two phases: [`TokenLayout::measure`] computes every token's horizontal
//! box from its property texts and any width demanded by other layouts,
//! [`TokenLayout::place`] draws the property rows into those boxes.

use super::config::RenderConfig;
use super::display_list::Dimensions;
use super::scene::{Point, Scene, TextMeasure};
use crate::models::{NlpInstance, Token};
use std::collections::BTreeMap;

/// Minimum box width per token index
pub type RequiredWidths = BTreeMap<usize, f32>;

/// Horizontal extent of one token box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TokenBox {
    pub from: f32,
    pub to: f32,
}

impl TokenBox {
    pub fn width(&self) -> f32 {
        self.to - self.from
    }

    pub fn center(&self) -> f32 {
        (self.from + self.to) / 2.0
    }
}

/// Result of measuring a token row
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TokenBounds {
    pub boxes: BTreeMap<usize, TokenBox>,
    pub width: f32,
    pub height: f32,
}

impl TokenBounds {
    pub fn get(&self, index: usize) -> Option<TokenBox> {
        self.boxes.get(&index).copied()
    }

    pub fn center(&self, index: usize) -> Option<f32> {
        self.get(index).map(|b| b.center())
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }
}

/// Lays out the tokens with index in `[from, to)` as one row
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TokenLayout {
    from: usize,
    to: Option<usize>,
}

impl TokenLayout {
    /// Layout over every token
    pub fn new() -> Self {
        Self::default()
    }

    /// Layout over the tokens between two split points
    pub fn between(from: usize, to: Option<usize>) -> Self {
        Self { from, to }
    }

    fn includes(&self, token: &Token) -> bool {
        token.index() >= self.from && self.to.map_or(true, |to| token.index() < to)
    }

    fn row_tokens<'a>(&'a self, instance: &'a NlpInstance) -> impl Iterator<Item = &'a Token> + 'a {
        instance.tokens().filter(move |t| self.includes(t))
    }

    /// Compute token boxes left to right
    ///
    /// A box is as wide as its widest property text or the required width,
    /// whichever is larger. Adjacent boxes are `token.margin` apart.
    pub fn measure<M: TextMeasure + ?Sized>(
        &self,
        instance: &NlpInstance,
        metrics: &M,
        config: &RenderConfig,
        required: &RequiredWidths,
    ) -> TokenBounds {
        let style = &config.token;
        let mut bounds = TokenBounds::default();
        let mut x = 0.0f32;
        let mut rows = 0usize;

        for token in self.row_tokens(instance) {
            let text_width = token
                .properties
                .iter()
                .map(|p| metrics.text_width(&p.value, &style.font))
                .fold(0.0f32, f32::max);
            let width = text_width.max(required.get(&token.index()).copied().unwrap_or(0.0));

            if !bounds.boxes.is_empty() {
                x += style.margin;
            }
            bounds.boxes.insert(
                token.index(),
                TokenBox {
                    from: x,
                    to: x + width,
                },
            );
            x += width;
            rows = rows.max(token.properties.len());
        }

        bounds.width = x;
        if rows > 0 {
            bounds.height = rows as f32 * metrics.text_height(&style.font)
                + (rows - 1) as f32 * style.row_spacing;
        }
        bounds
    }

    /// Draw property rows into measured boxes, text centred per box
    pub fn place<S: Scene + ?Sized>(
        &self,
        instance: &NlpInstance,
        scene: &mut S,
        config: &RenderConfig,
        bounds: &TokenBounds,
    ) -> Dimensions {
        let style = &config.token;
        let line_height = scene.text_height(&style.font);

        for token in self.row_tokens(instance) {
            let Some(token_box) = bounds.get(token.index()) else {
                debug_assert!(false, "token {} was not measured", token.index());
                continue;
            };
            let color = if token.is_actual {
                style.color
            } else {
                style.placeholder_color
            };
            for (row, property) in token.properties.iter().enumerate() {
                let text_width = scene.text_width(&property.value, &style.font);
                let origin = Point::new(
                    token_box.from + (token_box.width() - text_width) / 2.0,
                    row as f32 * (line_height + style.row_spacing) + style.font.size,
                );
                scene.add_text(origin, &property.value, &style.font, color);
            }
        }
        bounds.dimensions()
    }

    /// Measure and place in one go
    pub fn layout<S: Scene + ?Sized>(
        &self,
        instance: &NlpInstance,
        scene: &mut S,
        config: &RenderConfig,
        required: &RequiredWidths,
    ) -> TokenBounds {
        let bounds = self.measure(instance, &*scene, config, required);
        self.place(instance, scene, config, &bounds);
        bounds
    }
}
