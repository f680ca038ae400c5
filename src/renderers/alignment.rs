//! Alignment renderer
//!
//! Two token rows, one above the other, split at the first split point.
//! Every arc links a token of the upper row to a token of the lower row;
//! arcs inside one row have nowhere to go and are skipped.

use super::config::RenderConfig;
use super::curves::CurveRenderer;
use super::display_list::Dimensions;
use super::scene::{Point, Scene, Stroke};
use super::token_layout::{RequiredWidths, TokenBounds, TokenLayout};
use crate::models::{NlpInstance, RenderCategory};

pub struct AlignmentRenderer;

impl AlignmentRenderer {
    pub fn render<S: Scene + ?Sized>(
        instance: &NlpInstance,
        scene: &mut S,
        config: &RenderConfig,
    ) -> Dimensions {
        let split = instance.split_points().first().copied();
        let required = RequiredWidths::new();

        let upper = TokenLayout::between(0, split);
        let upper_bounds = upper.layout(instance, scene, config, &required);

        let Some(split) = split else {
            log::debug!("alignment: no split point, drawing a single row");
            return upper_bounds.dimensions();
        };

        let lower = TokenLayout::between(split, None);
        let lower_bounds = lower.measure(instance, &*scene, config, &required);
        let lower_top = upper_bounds.height + config.alignment.height_factor;

        scene.translate(0.0, lower_top);
        lower.place(instance, scene, config, &lower_bounds);
        scene.translate(0.0, -lower_top);

        Self::draw_links(instance, scene, config, split, &upper_bounds, &lower_bounds, lower_top);

        Dimensions::new(
            upper_bounds.width.max(lower_bounds.width),
            lower_top + lower_bounds.height,
        )
    }

    fn draw_links<S: Scene + ?Sized>(
        instance: &NlpInstance,
        scene: &mut S,
        config: &RenderConfig,
        split: usize,
        upper: &TokenBounds,
        lower: &TokenBounds,
        lower_top: f32,
    ) {
        let mut skipped = 0;
        for edge in instance.get_edges(Some(RenderCategory::Arc)) {
            let (top, bottom) = if edge.start < split {
                (edge.start, edge.end)
            } else {
                (edge.end, edge.start)
            };
            let (Some(from_x), Some(to_x)) = (upper.center(top), lower.center(bottom)) else {
                skipped += 1;
                continue;
            };
            let edge_style = config.edge_style(edge);
            let stroke = Stroke {
                color: edge_style.color,
                dashed: !edge.is_final,
            };
            scene.add(CurveRenderer::link(
                Point::new(from_x, upper.height),
                Point::new(to_x, lower_top),
                config.alignment.is_curved,
                stroke,
            ));
        }
        if skipped > 0 {
            log::warn!(
                "alignment: skipped {} arcs that do not link the two rows",
                skipped
            );
        }
    }
}
