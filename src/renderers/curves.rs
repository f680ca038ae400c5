//! Arc and link geometry (lines and Bézier curves)
//!
//! Pure functions from anchor points to scene primitives. Layouts decide
//! where anchors go; this module only decides the shape between them.

use super::scene::{Point, Primitive, Stroke};

/// Curve renderer for arcs, self loops and alignment links
pub struct CurveRenderer;

impl CurveRenderer {
    /// Path of an arc rising from `from` to height `top`, running across and
    /// dropping down to `to`
    ///
    /// With a positive `radius` the two upper corners are rounded with
    /// quadratic curves; with zero radius the arc is three straight lines.
    pub fn arc(from: Point, to: Point, top: f32, radius: f32, stroke: Stroke) -> Vec<Primitive> {
        let dx = to.x - from.x;
        let direction = if dx < 0.0 { -1.0 } else { 1.0 };
        let rise_from = (from.y - top).max(0.0);
        let rise_to = (to.y - top).max(0.0);
        let r = radius
            .min(dx.abs() / 2.0)
            .min(rise_from)
            .min(rise_to)
            .max(0.0);

        if r <= 0.0 {
            return vec![
                Primitive::Line {
                    from,
                    to: Point::new(from.x, top),
                    stroke,
                },
                Primitive::Line {
                    from: Point::new(from.x, top),
                    to: Point::new(to.x, top),
                    stroke,
                },
                Primitive::Line {
                    from: Point::new(to.x, top),
                    to,
                    stroke,
                },
            ];
        }

        let left_corner_start = Point::new(from.x, top + r);
        let left_corner_end = Point::new(from.x + direction * r, top);
        let right_corner_start = Point::new(to.x - direction * r, top);
        let right_corner_end = Point::new(to.x, top + r);

        vec![
            Primitive::Line {
                from,
                to: left_corner_start,
                stroke,
            },
            Primitive::QuadraticCurve {
                from: left_corner_start,
                ctrl: Point::new(from.x, top),
                to: left_corner_end,
                stroke,
            },
            Primitive::Line {
                from: left_corner_end,
                to: right_corner_start,
                stroke,
            },
            Primitive::QuadraticCurve {
                from: right_corner_start,
                ctrl: Point::new(to.x, top),
                to: right_corner_end,
                stroke,
            },
            Primitive::Line {
                from: right_corner_end,
                to,
                stroke,
            },
        ]
    }

    /// Loop from a token back to itself, peaking near `top`
    pub fn self_loop(center: Point, half_width: f32, top: f32, stroke: Stroke) -> Primitive {
        Primitive::CubicCurve {
            from: Point::new(center.x - half_width, center.y),
            ctrl1: Point::new(center.x - half_width, top),
            ctrl2: Point::new(center.x + half_width, top),
            to: Point::new(center.x + half_width, center.y),
            stroke,
        }
    }

    /// Downward arrow head with its tip at `tip`
    pub fn arrow_head(tip: Point, size: f32, stroke: Stroke) -> Vec<Primitive> {
        let stroke = Stroke {
            dashed: false,
            ..stroke
        };
        vec![
            Primitive::Line {
                from: Point::new(tip.x - size, tip.y - 2.0 * size),
                to: tip,
                stroke,
            },
            Primitive::Line {
                from: Point::new(tip.x + size, tip.y - 2.0 * size),
                to: tip,
                stroke,
            },
        ]
    }

    /// Link between a token in the upper row and one in the lower row
    ///
    /// Curved links are cubic curves whose control points sit halfway
    /// between the rows, so the link leaves and enters each row vertically.
    pub fn link(from: Point, to: Point, curved: bool, stroke: Stroke) -> Primitive {
        if !curved {
            return Primitive::Line { from, to, stroke };
        }
        let mid_y = (from.y + to.y) / 2.0;
        Primitive::CubicCurve {
            from,
            ctrl1: Point::new(from.x, mid_y),
            ctrl2: Point::new(to.x, mid_y),
            to,
            stroke,
        }
    }
}
