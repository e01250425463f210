use std::collections::HashSet;
use std::f32::consts::PI;
use std::path::Path;

use anyhow::Result;

use crate::config::LayoutConfig;
use crate::layout::{Layout, LinkLayout, point_radial};
use crate::theme::Theme;

pub fn render_svg(layout: &Layout, theme: &Theme, config: &LayoutConfig) -> String {
    render_svg_highlighted(layout, theme, config, None)
}

/// Render the scene, optionally with a hover state applied: every node and
/// link off the given ancestor path drops to the configured dim opacity
/// while the path stays at full opacity.
pub fn render_svg_highlighted(
    layout: &Layout,
    theme: &Theme,
    config: &LayoutConfig,
    highlight: Option<&[String]>,
) -> String {
    let width = layout.width.max(1.0);
    let height = layout.height.max(1.0);
    let keep: Option<HashSet<&str>> =
        highlight.map(|ids| ids.iter().map(String::as_str).collect());

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {width} {height}\" class=\"dendrogram\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));
    svg.push_str(&format!(
        "<g transform=\"translate({:.2},{:.2})\">",
        width / 2.0,
        height / 2.0
    ));

    for link in &layout.links {
        // a link is on the path exactly when its child end is
        let opacity = opacity_attr(keep.as_ref(), &link.target, config);
        svg.push_str(&format!(
            "<path class=\"link\" d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1\"{opacity}/>",
            radial_link_path(link),
            theme.link_color
        ));
    }

    for node in &layout.nodes {
        let (x, y) = point_radial(node.angle, node.radius);
        let opacity = opacity_attr(keep.as_ref(), &node.id, config);
        svg.push_str(&format!(
            "<g class=\"node node--{}\" transform=\"translate({x:.2},{y:.2})\"{opacity}>",
            if node.leaf { "leaf" } else { "internal" }
        ));
        svg.push_str(&format!(
            "<circle r=\"{}\" fill=\"{}\"/>",
            config.node_radius, theme.node_fill
        ));

        // labels on the right half read outward; on the left half both the
        // offset and the rotation flip so the text stays upright
        let outward = node.angle < PI;
        let anchor_start = outward == node.leaf;
        let offset = if anchor_start {
            config.label_offset
        } else {
            -config.label_offset
        };
        let rotation = if outward {
            node.angle - PI / 2.0
        } else {
            node.angle + PI / 2.0
        }
        .to_degrees();
        svg.push_str(&format!(
            "<text id=\"{}\" class=\"label\" dy=\"{}em\" x=\"{offset}\" text-anchor=\"{}\" transform=\"rotate({rotation:.2})\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            escape_xml(&node.id),
            config.label_shift_em,
            if anchor_start { "start" } else { "end" },
            theme.font_family,
            theme.font_size,
            theme.label_color,
            escape_xml(&node.label)
        ));
        svg.push_str("</g>");
    }

    svg.push_str("</g></svg>");
    svg
}

fn opacity_attr(keep: Option<&HashSet<&str>>, id: &str, config: &LayoutConfig) -> String {
    match keep {
        Some(path) if !path.contains(id) => format!(" opacity=\"{}\"", config.dim_opacity),
        _ => String::new(),
    }
}

/// Cubic Bezier through the mid-radius of both endpoints, the radial link
/// shape d3 draws.
fn radial_link_path(link: &LinkLayout) -> String {
    let mid = (link.source_radius + link.target_radius) / 2.0;
    let (sx, sy) = point_radial(link.source_angle, link.source_radius);
    let (c1x, c1y) = point_radial(link.source_angle, mid);
    let (c2x, c2y) = point_radial(link.target_angle, mid);
    let (tx, ty) = point_radial(link.target_angle, link.target_radius);
    format!("M {sx:.2} {sy:.2} C {c1x:.2} {c1y:.2}, {c2x:.2} {c2y:.2}, {tx:.2} {ty:.2}")
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, theme: &Theme) -> Result<()> {
    let mut opt = usvg::Options::default();
    if let Some(family) = theme.font_family.split(',').next() {
        opt.font_family = family.trim().trim_matches('"').to_string();
    }

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
