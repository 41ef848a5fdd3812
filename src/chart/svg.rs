use std::fs;
use std::path::{Path, PathBuf};

use super::{ChartError, ChartLayout};

const STROKE: &str = "#a855f7";
const LABEL_FILL: &str = "#d8b4fe";
const ASC_FILL: &str = "#eab308";

/// Render a computed layout as a standalone SVG document.
///
/// Coordinates are printed with two decimals so equal layouts always produce
/// byte-identical output.
pub fn render_svg(layout: &ChartLayout) -> String {
    let g = &layout.geometry;
    let c = g.center;
    let r = g.radius;
    let mut svg = String::with_capacity(8 * 1024);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {size} {size}\" width=\"{size}\" height=\"{size}\">\n",
        size = num(g.size)
    ));

    // Frame: circle, outer square, inner square turned 45 degrees
    svg.push_str(&format!(
        "  <circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"#581c87\" fill-opacity=\"0.2\" stroke=\"{}\" stroke-opacity=\"0.5\" stroke-width=\"2\"/>\n",
        num(c),
        num(c),
        num(r),
        STROKE
    ));
    svg.push_str(&format!(
        "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"none\" stroke=\"{}\" stroke-opacity=\"0.5\" stroke-width=\"2\"/>\n",
        num(c - r),
        num(c - r),
        num(r * 2.0),
        num(r * 2.0),
        STROKE
    ));
    svg.push_str(&format!(
        "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" transform=\"rotate(45 {} {})\" fill=\"none\" stroke=\"{}\" stroke-opacity=\"0.5\" stroke-width=\"2\"/>\n",
        num(c - r * 0.7),
        num(c - r * 0.7),
        num(r * 1.4),
        num(r * 1.4),
        num(c),
        num(c),
        STROKE
    ));

    svg.push_str("  <g class=\"cusps\">\n");
    for line in &layout.cusp_lines {
        svg.push_str(&format!(
            "    <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-opacity=\"0.3\" stroke-width=\"1\"/>\n",
            num(line.start.x),
            num(line.start.y),
            num(line.end.x),
            num(line.end.y),
            STROKE
        ));
        svg.push_str(&format!(
            "    <text x=\"{}\" y=\"{}\" text-anchor=\"middle\" dominant-baseline=\"middle\" fill=\"{}\" font-size=\"10\">{:.1}°</text>\n",
            num(line.label.x),
            num(line.label.y),
            LABEL_FILL,
            line.degree
        ));
    }
    svg.push_str("  </g>\n");

    svg.push_str("  <g class=\"houses\">\n");
    for label in &layout.houses {
        svg.push_str(&format!(
            "    <text x=\"{}\" y=\"{}\" text-anchor=\"middle\" dominant-baseline=\"middle\" fill=\"#ffffff\" font-size=\"14\" font-weight=\"bold\">{}</text>\n",
            num(label.anchor.x),
            num(label.anchor.y),
            label.house
        ));
    }
    svg.push_str("  </g>\n");

    svg.push_str("  <g class=\"planets\">\n");
    for placement in &layout.planets {
        svg.push_str(&format!(
            "    <text x=\"{}\" y=\"{}\" text-anchor=\"middle\" dominant-baseline=\"middle\" fill=\"{}\" font-size=\"18\"><title>{}</title>{}</text>\n",
            num(placement.glyph.x),
            num(placement.glyph.y),
            placement.planet.color(),
            placement.planet,
            placement.planet.glyph()
        ));
        svg.push_str(&format!(
            "    <text x=\"{}\" y=\"{}\" text-anchor=\"start\" dominant-baseline=\"middle\" fill=\"#d1d5db\" font-size=\"12\">{:.1}°</text>\n",
            num(placement.degree_label.x),
            num(placement.degree_label.y),
            placement.degree
        ));
    }
    svg.push_str("  </g>\n");

    let asc = &layout.ascendant;
    svg.push_str(&format!(
        "  <path d=\"M {} {} l -10 -20 l 20 0 z\" fill=\"{}\"/>\n",
        num(asc.tip.x),
        num(asc.tip.y),
        ASC_FILL
    ));
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"{}\" text-anchor=\"middle\" fill=\"{}\" font-size=\"14\" font-weight=\"bold\">ASC</text>\n",
        num(asc.label.x),
        num(asc.label.y),
        ASC_FILL
    ));

    svg.push_str("</svg>\n");
    svg
}

/// Write `svg` as `<dir>/<name>.svg`, creating `dir` if needed
pub fn write_svg(dir: &Path, name: &str, svg: &str) -> Result<PathBuf, ChartError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.svg", sanitize(name)));
    fs::write(&path, svg)?;
    Ok(path)
}

fn sanitize(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if cleaned.is_empty() {
        "chart".to_string()
    } else {
        cleaned
    }
}

fn num(value: f64) -> String {
    let s = format!("{:.2}", value);
    if s == "-0.00" {
        "0.00".to_string()
    } else {
        s
    }
}
