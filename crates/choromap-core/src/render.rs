// crates/choromap-core/src/render.rs

//! # SVG output
//!
//! Geometry is already in screen space, so drawing a region means writing its
//! rings as path commands. Layer order, bottom to top: legend, counties, state
//! borders, tooltip.

use crate::legend::Legend;
use crate::map::ChoroplethMap;
use crate::model::{Geometry, Position};
use crate::tooltip::{tooltip_text, TooltipState};
use std::fmt::Write as _;
use svg::node::element::{Element, Group, Path, Rectangle};
use svg::node::{self, Value};
use svg::{Document, Node};

const POINT_RADIUS: f64 = 4.5;

/// SVG path data for `geometry` under the identity projection.
///
/// Rings are closed with `Z` and their repeated closing position is dropped;
/// points become small circles.
pub fn path_data(geometry: &Geometry) -> String {
    let mut d = String::new();
    write_geometry(&mut d, geometry);
    d
}

fn write_geometry(d: &mut String, geometry: &Geometry) {
    match geometry {
        Geometry::Empty => {}
        Geometry::Point(p) => write_point(d, p),
        Geometry::MultiPoint(ps) => ps.iter().for_each(|p| write_point(d, p)),
        Geometry::LineString(line) => write_line(d, line, false),
        Geometry::MultiLineString(lines) => lines.iter().for_each(|l| write_line(d, l, false)),
        Geometry::Polygon(rings) => rings.iter().for_each(|r| write_line(d, r, true)),
        Geometry::MultiPolygon(polys) => polys
            .iter()
            .flatten()
            .for_each(|r| write_line(d, r, true)),
        Geometry::Collection(parts) => parts.iter().for_each(|g| write_geometry(d, g)),
    }
}

fn write_line(d: &mut String, points: &[Position], closed: bool) {
    let points = if closed && points.len() > 1 && points.first() == points.last() {
        &points[..points.len() - 1]
    } else {
        points
    };
    for (i, [x, y]) in points.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        let _ = write!(d, "{cmd}{x},{y}");
    }
    if closed && !points.is_empty() {
        d.push('Z');
    }
}

fn write_point(d: &mut String, [x, y]: &Position) {
    let r = POINT_RADIUS;
    let _ = write!(
        d,
        "M{x},{y}m0,{r}a{r},{r} 0 1,1 0,{}a{r},{r} 0 1,1 0,{}z",
        -2.0 * r,
        2.0 * r
    );
}

/// Generic element carrying text content, e.g. `<text>` or `<title>`.
fn text_node(name: &str, content: &str, attrs: &[(&str, Value)]) -> Element {
    let mut el = Element::new(name);
    for (k, v) in attrs {
        el.assign(*k, v.clone());
    }
    el.append(node::Text::new(content));
    el
}

fn translate(x: f64, y: f64) -> String {
    format!("translate({x},{y})")
}

fn legend_group(map: &ChoroplethMap, legend: &Legend) -> Group {
    let cfg = map.config();
    let mut g = Group::new()
        .set("class", "key")
        .set("id", "legend")
        .set("transform", translate(cfg.legend_offset.0, cfg.legend_offset.1));

    for s in &legend.segments {
        g = g.add(
            Rectangle::new()
                .set("height", cfg.key_height)
                .set("x", s.x)
                .set("width", s.width)
                .set("fill", s.color.as_str()),
        );
    }

    g = g.add(text_node(
        "text",
        &cfg.caption,
        &[
            ("class", "caption".into()),
            ("x", cfg.key_range.0.into()),
            ("y", (-12.0_f64).into()),
        ],
    ));

    // Axis below the key; the domain line is left out.
    for t in &legend.ticks {
        let tick = Group::new()
            .set("class", "tick")
            .set("transform", translate(t.x, 0.0))
            .add(
                Element::new("line")
                    .tap_assign("stroke", "currentColor")
                    .tap_assign("y2", cfg.tick_size),
            )
            .add(text_node(
                "text",
                &t.label,
                &[
                    ("fill", "currentColor".into()),
                    ("y", (cfg.tick_size + 3.0).into()),
                    ("dy", "0.71em".into()),
                    ("text-anchor", "middle".into()),
                ],
            ));
        g = g.add(tick);
    }
    g
}

/// Small extension so bare [`Element`]s can be built in expression position.
trait TapAssign {
    fn tap_assign(self, name: &str, value: impl Into<Value>) -> Self;
}

impl TapAssign for Element {
    fn tap_assign(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.assign(name, value);
        self
    }
}

fn counties_group(map: &ChoroplethMap) -> Group {
    let mut g = Group::new().set("class", "counties");
    for joined in map.joined() {
        let region = &map.regions()[joined.region];
        let record = joined.record.map(|i| &map.records()[i]);
        let path = Path::new()
            .set("class", "county")
            .set("data-fips", joined.id.0)
            .set("data-education", joined.education)
            .set("fill", joined.fill.as_str())
            .set("d", path_data(&region.geometry))
            .add(text_node("title", &tooltip_text(record), &[]));
        g = g.add(path);
    }
    g
}

fn tooltip_group(tooltip: &TooltipState) -> Group {
    let mut g = Group::new()
        .set("id", "tooltip")
        .set("opacity", tooltip.opacity)
        .set("transform", translate(tooltip.left, tooltip.top));
    if let Some(edu) = tooltip.education {
        g = g.set("data-education", edu);
    }
    g.add(text_node("text", &tooltip.content, &[]))
}

/// Full map document with the tooltip drawn in state `tooltip`.
pub fn render_document(map: &ChoroplethMap, tooltip: &TooltipState) -> Document {
    let cfg = map.config();
    let legend = map.legend();

    Document::new()
        .set("class", "svg-container")
        .set("width", cfg.width)
        .set("height", cfg.height)
        .add(legend_group(map, &legend))
        .add(counties_group(map))
        .add(
            Path::new()
                .set("class", "states")
                .set("fill", "none")
                .set("stroke", cfg.state_stroke.as_str())
                .set("stroke-linejoin", "round")
                .set("d", path_data(map.borders())),
        )
        .add(tooltip_group(tooltip))
}

/// Standalone HTML page embedding `svg` in the host containers.
///
/// `svg` is inserted as markup; `title` is escaped.
pub fn render_html(svg: &str, title: &str) -> String {
    let title = escape_text(title);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
  .county:hover {{ stroke: #000; stroke-width: 0.5; }}
  #tooltip {{ pointer-events: none; }}
</style>
</head>
<body>
<h1 id="title">{title}</h1>
<div id="tooltip-container"></div>
<div class="vis-container">
{svg}
</div>
</body>
</html>
"#
    )
}

fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
