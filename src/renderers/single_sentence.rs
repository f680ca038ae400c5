//! Single sentence renderer
//!
//! Stacks three layers top to bottom: arcs, the token row, span boxes.
//! Span labels may widen tokens, so span widths are estimated before the
//! token row is measured.

use super::config::RenderConfig;
use super::dependency_layout::DependencyLayout;
use super::display_list::Dimensions;
use super::scene::Scene;
use super::span_layout::SpanLayout;
use super::token_layout::{RequiredWidths, TokenLayout};
use crate::models::NlpInstance;

pub struct SingleSentenceRenderer;

impl SingleSentenceRenderer {
    pub fn render<S: Scene + ?Sized>(
        instance: &NlpInstance,
        scene: &mut S,
        config: &RenderConfig,
    ) -> Dimensions {
        let required = if config.render_spans {
            SpanLayout::estimate_required_token_widths(instance, &*scene, config)
        } else {
            RequiredWidths::new()
        };
        let tokens = TokenLayout::new();
        let bounds = tokens.measure(instance, &*scene, config, &required);

        let arcs = DependencyLayout::place(instance, scene, config, &bounds);

        scene.translate(0.0, arcs.height);
        let row = tokens.place(instance, scene, config, &bounds);

        scene.translate(0.0, row.height);
        let spans = if config.render_spans {
            SpanLayout::place(instance, scene, config, &bounds)
        } else {
            Dimensions::default()
        };
        scene.translate(0.0, -(arcs.height + row.height));

        log::debug!(
            "single sentence: {} tokens, arcs {:.1}, tokens {:.1}, spans {:.1}",
            bounds.boxes.len(),
            arcs.height,
            row.height,
            spans.height
        );

        Dimensions::new(
            arcs.width.max(row.width).max(spans.width),
            arcs.height + row.height + spans.height,
        )
    }
}
