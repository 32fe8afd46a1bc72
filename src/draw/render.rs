//! SVG serialization of shapes and diagrams.

use super::frame::Diagram;
use super::shape::{Circle, Polygon, Shape};
use crate::config::{DocumentConfig, RenderConfig};
use std::fmt::Write;

/// Renders a full SVG document for `diagram`.
///
/// Each shape is preceded by a comment echoing its bound name when
/// `render.name_comments` is set.
pub fn render_document(diagram: &Diagram, document: &DocumentConfig, render: &RenderConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
        w = document.width,
        h = document.height,
    );
    for entry in diagram.ordered(render.order) {
        if render.name_comments {
            let _ = writeln!(out, "<!-- {} -->", entry.name);
        }
        if let Some(element) = render_shape(&entry.shape) {
            out.push_str(&element);
            out.push('\n');
        }
    }
    out.push_str("</svg>\n");
    out
}

/// Renders a single shape element. Returns `None` for an empty polygon.
pub fn render_shape(shape: &Shape) -> Option<String> {
    match shape {
        Shape::Polygon(polygon) => render_polygon(polygon),
        Shape::Circle(circle) => Some(render_circle(circle)),
    }
}

/// Renders one `<path>` with a closed subpath per ring and the even-odd fill rule.
pub fn render_polygon(polygon: &Polygon) -> Option<String> {
    if polygon.is_empty() {
        return None;
    }

    let mut d = String::new();
    for ring in polygon.absolute_rings() {
        let mut points = ring.iter();
        if let Some(first) = points.next() {
            let _ = write!(d, "M {:.6} {:.6} ", first.x, first.y);
        }
        for p in points {
            let _ = write!(d, "L {:.6} {:.6} ", p.x, p.y);
        }
        d.push_str("z ");
    }

    Some(format!(
        "<path d=\"{}\" fill-rule=\"evenodd\" {}/>",
        d,
        polygon.style.to_svg_attributes()
    ))
}

/// Renders a native `<circle>`; center and radius are truncated to integers.
pub fn render_circle(circle: &Circle) -> String {
    let center = circle.center();
    format!(
        "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" {}/>",
        center.x.trunc() as i64,
        center.y.trunc() as i64,
        circle.radius.trunc() as i64,
        circle.style.to_svg_attributes()
    )
}
