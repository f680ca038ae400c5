//! SVG output for display lists
//!
//! A straight serialisation: one SVG element per primitive, in paint
//! order. Coordinates are already absolute in a display list.

use super::display_list::DisplayList;
use super::scene::{Primitive, Rectangle, Stroke};
use std::fmt::Write;

/// Serialises a [`DisplayList`] to an SVG document
pub struct SvgWriter;

impl SvgWriter {
    pub fn write(list: &DisplayList) -> String {
        let mut svg = String::new();
        let width = list.width.max(1.0);
        let height = list.height.max(1.0);

        let _ = write!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.2}\" height=\"{height:.2}\" viewBox=\"0 0 {width:.2} {height:.2}\">"
        );
        svg.push_str("<rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>");

        for primitive in &list.primitives {
            Self::write_primitive(&mut svg, primitive);
        }

        svg.push_str("</svg>\n");
        svg
    }

    fn stroke_attributes(stroke: &Stroke) -> String {
        let dash = if stroke.dashed {
            " stroke-dasharray=\"4 3\""
        } else {
            ""
        };
        format!("fill=\"none\" stroke=\"{}\" stroke-width=\"1\"{}", stroke.color, dash)
    }

    fn write_primitive(svg: &mut String, primitive: &Primitive) {
        let _ = match primitive {
            Primitive::Line { from, to, stroke } => write!(
                svg,
                "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" {}/>",
                from.x,
                from.y,
                to.x,
                to.y,
                Self::stroke_attributes(stroke)
            ),
            Primitive::QuadraticCurve { from, ctrl, to, stroke } => write!(
                svg,
                "<path d=\"M {:.2} {:.2} Q {:.2} {:.2} {:.2} {:.2}\" {}/>",
                from.x,
                from.y,
                ctrl.x,
                ctrl.y,
                to.x,
                to.y,
                Self::stroke_attributes(stroke)
            ),
            Primitive::CubicCurve {
                from,
                ctrl1,
                ctrl2,
                to,
                stroke,
            } => write!(
                svg,
                "<path d=\"M {:.2} {:.2} C {:.2} {:.2} {:.2} {:.2} {:.2} {:.2}\" {}/>",
                from.x,
                from.y,
                ctrl1.x,
                ctrl1.y,
                ctrl2.x,
                ctrl2.y,
                to.x,
                to.y,
                Self::stroke_attributes(stroke)
            ),
            Primitive::Rectangle(rect) => Self::write_rectangle(svg, rect),
            Primitive::Text {
                origin,
                text,
                font,
                color,
            } => write!(
                svg,
                "<text x=\"{:.2}\" y=\"{:.2}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
                origin.x,
                origin.y,
                escape_xml(&font.family),
                font.size,
                color,
                escape_xml(text)
            ),
        };
    }

    fn write_rectangle(svg: &mut String, rect: &Rectangle) -> std::fmt::Result {
        write!(
            svg,
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"{r}\" ry=\"{r}\" fill=\"{}\" stroke=\"{}\"/>",
            rect.origin.x,
            rect.origin.y,
            rect.width,
            rect.height,
            rect.fill,
            rect.border,
            r = rect.corner_radius
        )?;
        if let Some(label) = &rect.label {
            write!(
                svg,
                "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
                rect.origin.x + rect.width / 2.0,
                rect.origin.y + rect.height / 2.0,
                escape_xml(&rect.font.family),
                rect.font.size,
                rect.border,
                escape_xml(label)
            )?;
        }
        Ok(())
    }
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderers::scene::{Color, FontSpec, Point, Scene};

    #[test]
    fn test_write_escapes_text() {
        let mut list = DisplayList::new();
        list.add_text(
            Point::new(1.0, 2.0),
            "<NP & VP>",
            &FontSpec::default(),
            Color::BLACK,
        );
        let svg = SvgWriter::write(&list);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("&lt;NP &amp; VP&gt;"));
        assert!(!svg.contains("<NP"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_dashed_stroke_and_rectangle_label() {
        let mut list = DisplayList::new();
        list.width = 100.0;
        list.height = 50.0;
        list.add(Primitive::Line {
            from: Point::new(0.0, 0.0),
            to: Point::new(10.0, 10.0),
            stroke: Stroke {
                color: Color::RED,
                dashed: true,
            },
        });
        list.add_rectangle(Rectangle {
            origin: Point::new(5.0, 5.0),
            width: 20.0,
            height: 10.0,
            fill: Color::WHITE,
            border: Color::BLUE,
            corner_radius: 4.0,
            label: Some("NP".to_string()),
            font: FontSpec::default(),
        });

        let svg = SvgWriter::write(&list);
        assert!(svg.contains("width=\"100.00\""));
        assert!(svg.contains("stroke=\"#ff0000\" stroke-width=\"1\" stroke-dasharray"));
        assert!(svg.contains("stroke=\"#0000ff\""));
        assert!(svg.contains(">NP</text>"));
    }
}
