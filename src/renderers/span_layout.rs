//! Span layout
//!
//! Spans are drawn as labelled boxes below the token row. Containers sit
//! deeper than the spans they contain; spans that share a token are never
//! put on the same level.

use super::config::RenderConfig;
use super::display_list::Dimensions;
use super::levels::{assign_levels, LevelAssignment};
use super::scene::{Point, Rectangle, Scene, TextMeasure};
use super::token_layout::{RequiredWidths, TokenBounds};
use crate::models::{Edge, NlpInstance, RenderCategory};

pub struct SpanLayout;

impl SpanLayout {
    fn spans(instance: &NlpInstance) -> Vec<&Edge> {
        instance.get_edges(Some(RenderCategory::Span))
    }

    /// Depth of every span, 1 being the row right under the tokens
    pub fn levels<'a>(spans: &[&'a Edge], config: &RenderConfig) -> LevelAssignment<'a> {
        assign_levels(spans, Edge::intersects, |a, b| {
            config
                .edge_style(a)
                .order
                .cmp(&config.edge_style(b).order)
        })
    }

    /// Minimum token widths so every span label fits under its tokens
    ///
    /// A span over one token needs the whole label width there. A span over
    /// `n` tokens already gets the `n - 1` margins between them, and the rest
    /// is spread evenly across its tokens.
    pub fn estimate_required_token_widths<M: TextMeasure + ?Sized>(
        instance: &NlpInstance,
        metrics: &M,
        config: &RenderConfig,
    ) -> RequiredWidths {
        let mut required = RequiredWidths::new();
        for span in Self::spans(instance) {
            let label_width =
                metrics.text_width(&span.label_with_note(), &config.span.font) + config.span.text_margin;
            let count = span.length() + 1;
            let per_token = if count == 1 {
                label_width
            } else {
                (label_width - (count - 1) as f32 * config.token.margin) / count as f32
            };
            if per_token <= 0.0 {
                continue;
            }
            for index in span.min_index()..=span.max_index() {
                let entry = required.entry(index).or_insert(0.0);
                *entry = entry.max(per_token);
            }
        }
        required
    }

    /// Height of the span region without drawing it
    pub fn estimate_height(instance: &NlpInstance, config: &RenderConfig) -> f32 {
        let spans = Self::spans(instance);
        Self::levels(&spans, config).max_level() as f32 * config.span.height_per_level
    }

    /// Draw spans below a measured token row
    ///
    /// Coordinates are relative to the bottom edge of the token row.
    pub fn place<S: Scene + ?Sized>(
        instance: &NlpInstance,
        scene: &mut S,
        config: &RenderConfig,
        bounds: &TokenBounds,
    ) -> Dimensions {
        let style = &config.span;
        let mut spans = Self::spans(instance);
        spans.sort_by(|a, b| {
            config
                .edge_style(a)
                .order
                .cmp(&config.edge_style(b).order)
                .then_with(|| a.lexicographic_order(b))
        });
        let levels = Self::levels(&spans, config);

        for span in &spans {
            let (Some(first), Some(last), Some(level)) = (
                bounds.get(span.min_index()),
                bounds.get(span.max_index()),
                levels.level(span),
            ) else {
                debug_assert!(false, "span {} outside the token row", span);
                continue;
            };
            let edge_style = config.edge_style(span);
            scene.add_rectangle(Rectangle {
                origin: Point::new(first.from, (level - 1) as f32 * style.height_per_level + style.gap),
                width: last.to - first.from,
                height: style.height_per_level - style.gap,
                fill: style.fill,
                border: edge_style.color,
                corner_radius: style.corner_radius,
                label: Some(span.label_with_note()),
                font: style.font.clone(),
            });
        }

        Dimensions::new(
            bounds.width,
            levels.max_level() as f32 * style.height_per_level,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TokenProperty;
    use crate::renderers::display_list::DisplayList;
    use crate::renderers::scene::{Color, Primitive};
    use crate::renderers::token_layout::TokenLayout;

    fn instance(words: &[&str]) -> NlpInstance {
        let mut instance = NlpInstance::new();
        for word in words {
            instance.add_token_with_properties([TokenProperty::new("word", *word)]);
        }
        instance
    }

    fn rectangles(scene: &DisplayList) -> Vec<&Rectangle> {
        scene
            .primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Rectangle(rect) => Some(rect),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_required_widths_single_and_multi_token() {
        let mut instance = instance(&["a", "b", "c"]);
        // 10pt, 0.6em: 8 chars = 48 wide, +6 margin = 54
        instance.add_span(0, 0, "PERSONAL", "ner").unwrap();
        // 54 - 2 * 20 token margin = 14, spread over 3 tokens
        instance.add_span(0, 2, "SENTENCE", "chunk").unwrap();
        // short label fits in the margins already
        instance.add_span(1, 2, "NP", "chunk").unwrap();

        let config = RenderConfig::default();
        let required = SpanLayout::estimate_required_token_widths(&instance, &config.metrics, &config);

        assert!((required[&0] - 54.0).abs() < 1e-3);
        assert!((required[&1] - 14.0 / 3.0).abs() < 1e-3);
        assert!((required[&2] - 14.0 / 3.0).abs() < 1e-3);
    }

    #[test]
    fn test_nested_spans_drawn_deeper() {
        let mut instance = instance(&["the", "old", "man", "left"]);
        instance.add_span(0, 2, "NP", "chunk").unwrap();
        instance.add_span(1, 2, "NBAR", "chunk").unwrap();
        instance.add_span(3, 3, "VP", "chunk").unwrap();

        let config = RenderConfig::default();
        let bounds = TokenLayout::new().measure(
            &instance,
            &config.metrics,
            &config,
            &RequiredWidths::new(),
        );
        let mut scene = DisplayList::with_metrics(config.metrics);
        let dims = SpanLayout::place(&instance, &mut scene, &config, &bounds);

        let rects = rectangles(&scene);
        assert_eq!(rects.len(), 3);
        let by_label = |label: &str| {
            rects
                .iter()
                .find(|r| r.label.as_deref() == Some(label))
                .copied()
                .unwrap()
        };
        let np = by_label("NP");
        let nbar = by_label("NBAR");
        let vp = by_label("VP");
        assert!(np.origin.y > nbar.origin.y);
        assert_eq!(vp.origin.y, nbar.origin.y);
        assert_eq!(np.origin.x, bounds.get(0).unwrap().from);
        assert_eq!(np.width, bounds.get(2).unwrap().to - bounds.get(0).unwrap().from);
        assert_eq!(dims.height, 2.0 * config.span.height_per_level);
        assert_eq!(
            SpanLayout::estimate_height(&instance, &config),
            dims.height
        );
    }

    #[test]
    fn test_span_colour_follows_diff_suffix() {
        let mut instance = instance(&["a", "b"]);
        instance.add_span(0, 1, "NP", "chunk:FN").unwrap();

        let config = RenderConfig::default();
        let bounds = TokenLayout::new().measure(
            &instance,
            &config.metrics,
            &config,
            &RequiredWidths::new(),
        );
        let mut scene = DisplayList::with_metrics(config.metrics);
        SpanLayout::place(&instance, &mut scene, &config, &bounds);

        assert_eq!(rectangles(&scene)[0].border, Color::BLUE);
    }

    #[test]
    fn test_no_spans_no_height() {
        let mut instance = instance(&["a", "b"]);
        instance.add_dependency(0, 1, "X", "dep").unwrap();
        let config = RenderConfig::default();
        assert_eq!(SpanLayout::estimate_height(&instance, &config), 0.0);
    }
}
