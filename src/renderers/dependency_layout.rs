//! Dependency (arc) layout
//!
//! Arcs are drawn above the token row. Each arc gets a level from the
//! shared packer; arcs that overlap never share a level, while arcs that
//! only meet at a token do. Self loops stay out of the packing and always
//! take one level.
//!
//! Several arcs ending at the same token are attached at different points
//! of the token box, ordered by where their other end lies, so that arcs
//! neither share an anchor nor cross right above the token.

use super::config::{DependencyStyle, RenderConfig};
use super::curves::CurveRenderer;
use super::display_list::Dimensions;
use super::levels::{assign_levels, LevelAssignment};
use super::scene::{Point, Scene, Stroke, TextMeasure};
use super::token_layout::TokenBounds;
use crate::models::{Edge, NlpInstance, RenderCategory};
use std::collections::{BTreeMap, HashMap};

/// Anchor x positions of an arc: (start, end)
type Anchors<'a> = HashMap<&'a Edge, (f32, f32)>;

pub struct DependencyLayout;

impl DependencyLayout {
    fn arcs<'a>(instance: &'a NlpInstance, config: &RenderConfig) -> Vec<&'a Edge> {
        let mut arcs = instance.get_edges(Some(RenderCategory::Arc));
        arcs.sort_by(|a, b| {
            config
                .edge_style(a)
                .order
                .cmp(&config.edge_style(b).order)
                .then_with(|| a.lexicographic_order(b))
        });
        arcs
    }

    /// Levels of the non-loop arcs
    pub fn levels<'a>(arcs: &[&'a Edge], config: &RenderConfig) -> LevelAssignment<'a> {
        let wide: Vec<&'a Edge> = arcs.iter().copied().filter(|e| !e.is_loop()).collect();
        assign_levels(&wide, Edge::overlaps, |a, b| {
            config
                .edge_style(a)
                .order
                .cmp(&config.edge_style(b).order)
        })
    }

    fn level_count(arcs: &[&Edge], levels: &LevelAssignment<'_>) -> usize {
        let loops = if arcs.iter().any(|e| e.is_loop()) { 1 } else { 0 };
        levels.max_level().max(loops)
    }

    fn region_height(levels: usize, label_height: f32, style: &DependencyStyle) -> f32 {
        if levels == 0 {
            return 0.0;
        }
        levels as f32 * style.height_per_level + label_height + style.gap_above_tokens
    }

    /// Height of the arc region without drawing it
    pub fn estimate_height<M: TextMeasure + ?Sized>(
        instance: &NlpInstance,
        metrics: &M,
        config: &RenderConfig,
    ) -> f32 {
        let arcs = Self::arcs(instance, config);
        let levels = Self::levels(&arcs, config);
        Self::region_height(
            Self::level_count(&arcs, &levels),
            metrics.text_height(&config.dependency.font),
            &config.dependency,
        )
    }

    fn anchors<'a>(
        arcs: &[&'a Edge],
        levels: &LevelAssignment<'a>,
        bounds: &TokenBounds,
        spread: f32,
    ) -> Anchors<'a> {
        let mut attachments: BTreeMap<usize, Vec<(usize, i64, &'a Edge, bool)>> = BTreeMap::new();
        for edge in arcs.iter().copied().filter(|e| !e.is_loop()) {
            let level = levels.level(edge).unwrap_or(1) as i64;
            for (token, other, is_start) in [(edge.start, edge.end, true), (edge.end, edge.start, false)] {
                // taller arcs leave further out on their own side
                let tie = if other < token { -level } else { level };
                attachments
                    .entry(token)
                    .or_default()
                    .push((other, tie, edge, is_start));
            }
        }

        let mut anchors = Anchors::new();
        for (token, mut list) in attachments {
            let Some(token_box) = bounds.get(token) else {
                continue;
            };
            list.sort_by_key(|&(other, tie, _, _)| (other, tie));
            let width = token_box.width() * spread;
            let count = list.len();
            for (i, (_, _, edge, is_start)) in list.into_iter().enumerate() {
                let x = if count == 1 {
                    token_box.center()
                } else {
                    token_box.center() - width / 2.0 + width * i as f32 / (count - 1) as f32
                };
                let entry = anchors.entry(edge).or_insert((x, x));
                if is_start {
                    entry.0 = x;
                } else {
                    entry.1 = x;
                }
            }
        }
        anchors
    }

    fn add_label<S: Scene + ?Sized>(
        scene: &mut S,
        edge: &Edge,
        center_x: f32,
        top: f32,
        style: &DependencyStyle,
        stroke: Stroke,
    ) {
        let text = edge.label_with_note();
        let width = scene.text_width(&text, &style.font);
        scene.add_text(
            Point::new(center_x - width / 2.0, top - 2.0),
            &text,
            &style.font,
            stroke.color,
        );
    }

    /// Draw arcs above a measured token row
    ///
    /// Coordinates are relative to the top of the arc region; the token row
    /// is expected to start right below the returned height.
    pub fn place<S: Scene + ?Sized>(
        instance: &NlpInstance,
        scene: &mut S,
        config: &RenderConfig,
        bounds: &TokenBounds,
    ) -> Dimensions {
        let style = &config.dependency;
        let arcs = Self::arcs(instance, config);
        let levels = Self::levels(&arcs, config);
        let label_height = scene.text_height(&style.font);
        let height = Self::region_height(Self::level_count(&arcs, &levels), label_height, style);
        let anchors = Self::anchors(&arcs, &levels, bounds, style.anchor_spread);
        let radius = if style.is_curved {
            style.height_per_level / 2.0
        } else {
            0.0
        };

        for edge in arcs.iter().copied() {
            let edge_style = config.edge_style(edge);
            let stroke = Stroke {
                color: edge_style.color,
                dashed: !edge.is_final,
            };

            if edge.is_loop() {
                let Some(token_box) = bounds.get(edge.start) else {
                    debug_assert!(false, "arc {} outside the token row", edge);
                    continue;
                };
                let top = height - style.gap_above_tokens - style.height_per_level;
                let half_width = (token_box.width() * style.anchor_spread / 4.0).max(style.arrow_size);
                let center = Point::new(token_box.center(), height);
                scene.add(CurveRenderer::self_loop(center, half_width, top, stroke));
                for line in CurveRenderer::arrow_head(center.offset(half_width, 0.0), style.arrow_size, stroke) {
                    scene.add(line);
                }
                Self::add_label(scene, edge, center.x, top, style, stroke);
                continue;
            }

            let (Some(level), Some(&(start_x, end_x))) = (levels.level(edge), anchors.get(edge)) else {
                debug_assert!(false, "arc {} outside the token row", edge);
                continue;
            };
            let top = height - style.gap_above_tokens - level as f32 * style.height_per_level;
            let from = Point::new(start_x, height);
            let to = Point::new(end_x, height);
            for primitive in CurveRenderer::arc(from, to, top, radius, stroke) {
                scene.add(primitive);
            }
            for line in CurveRenderer::arrow_head(to, style.arrow_size, stroke) {
                scene.add(line);
            }
            Self::add_label(scene, edge, (start_x + end_x) / 2.0, top, style, stroke);
        }

        Dimensions::new(bounds.width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TokenProperty;
    use crate::renderers::display_list::DisplayList;
    use crate::renderers::scene::Primitive;
    use crate::renderers::token_layout::{RequiredWidths, TokenLayout};

    fn instance(words: &[&str]) -> NlpInstance {
        let mut instance = NlpInstance::new();
        for word in words {
            instance.add_token_with_properties([TokenProperty::new("word", *word)]);
        }
        instance
    }

    fn place(instance: &NlpInstance, config: &RenderConfig) -> (DisplayList, Dimensions) {
        let bounds = TokenLayout::new().measure(instance, &config.metrics, config, &RequiredWidths::new());
        let mut scene = DisplayList::with_metrics(config.metrics);
        let dims = DependencyLayout::place(instance, &mut scene, config, &bounds);
        (scene, dims)
    }

    fn line_ends(scene: &DisplayList) -> Vec<Point> {
        scene
            .primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Line { to, .. } => Some(*to),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_height_matches_estimate() {
        let mut instance = instance(&["root", "Add", "a", "corpus"]);
        instance.add_dependency(0, 1, "ROOT", "dep").unwrap();
        instance.add_dependency(1, 3, "OBJ", "dep").unwrap();
        instance.add_dependency(3, 2, "DET", "dep").unwrap();
        instance.add_dependency(0, 3, "X", "dep").unwrap();

        let config = RenderConfig::default();
        let (_, dims) = place(&instance, &config);
        // (0,3) contains (1,3) and (2,3): three levels
        let expected = 3.0 * 15.0 + 12.0 + 4.0;
        assert!((dims.height - expected).abs() < 1e-3);
        assert_eq!(
            DependencyLayout::estimate_height(&instance, &config.metrics, &config),
            dims.height
        );
    }

    #[test]
    fn test_no_arcs_no_height() {
        let mut instance = instance(&["a", "b"]);
        instance.add_span(0, 1, "NP", "chunk").unwrap();
        let config = RenderConfig::default();
        let (scene, dims) = place(&instance, &config);
        assert_eq!(dims.height, 0.0);
        assert!(scene.is_empty());
    }

    #[test]
    fn test_self_loop_takes_one_level() {
        let mut instance = instance(&["a", "b"]);
        instance.add_dependency(1, 1, "SELF", "dep").unwrap();
        let config = RenderConfig::default();
        let (scene, dims) = place(&instance, &config);
        assert!((dims.height - (15.0 + 12.0 + 4.0)).abs() < 1e-3);
        assert!(scene
            .primitives
            .iter()
            .any(|p| matches!(p, Primitive::CubicCurve { .. })));
        assert_eq!(scene.texts().map(|(_, t)| t).collect::<Vec<_>>(), vec!["SELF"]);
    }

    #[test]
    fn test_arcs_on_one_token_get_distinct_anchors() {
        let mut instance = instance(&["left", "head", "right"]);
        instance.add_dependency(1, 0, "L", "dep").unwrap();
        instance.add_dependency(1, 2, "R", "dep").unwrap();

        let config = RenderConfig {
            dependency: DependencyStyle {
                is_curved: false,
                ..DependencyStyle::default()
            },
            ..RenderConfig::default()
        };
        let bounds = TokenLayout::new().measure(&instance, &config.metrics, &config, &RequiredWidths::new());
        let arcs = DependencyLayout::arcs(&instance, &config);
        let levels = DependencyLayout::levels(&arcs, &config);
        let anchors = DependencyLayout::anchors(&arcs, &levels, &bounds, 0.5);

        let left = anchors[&Edge::new(1, 0, "L", "dep")];
        let right = anchors[&Edge::new(1, 2, "R", "dep")];
        let head = bounds.get(1).unwrap();
        assert!(left.0 < right.0, "left arc should leave left of the right arc");
        assert!((right.0 - left.0 - head.width() / 2.0).abs() < 1e-3);
        // single attachments sit at the box centre
        assert_eq!(left.1, bounds.center(0).unwrap());
        assert_eq!(right.1, bounds.center(2).unwrap());

        let (scene, _) = place(&instance, &config);
        assert!(scene
            .primitives
            .iter()
            .all(|p| matches!(p, Primitive::Line { .. } | Primitive::Text { .. })));
    }

    #[test]
    fn test_non_final_arc_is_dashed_and_arrow_points_at_end() {
        let mut instance = instance(&["a", "b"]);
        instance
            .add_edge(Edge::new(0, 1, "X", "dep").with_final(false))
            .unwrap();
        let config = RenderConfig::default();
        let bounds = TokenLayout::new().measure(&instance, &config.metrics, &config, &RequiredWidths::new());
        let (scene, dims) = place(&instance, &config);

        assert!(scene.primitives.iter().any(|p| matches!(
            p,
            Primitive::Line { stroke, .. } if stroke.dashed
        )));
        let tip = Point::new(bounds.center(1).unwrap(), dims.height);
        assert!(line_ends(&scene).iter().filter(|p| **p == tip).count() >= 2);
    }
}
