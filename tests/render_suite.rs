use std::path::{Path, PathBuf};

use dendrogram_renderer::{
    Config, ancestor_path, build_hierarchy, compute_layout, parse_records, render_svg,
    render_svg_highlighted,
};

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn render_fixture(name: &str) -> (String, usize) {
    let input = std::fs::read_to_string(fixture_path(name)).expect("fixture read failed");
    let records = parse_records(&input).expect("parse failed");
    let config = Config::default();
    let tree = build_hierarchy(&records, &config.layout.delimiter).expect("build failed");
    let node_count = tree.as_ref().map_or(0, |tree| tree.len());
    let layout = compute_layout(tree.as_ref(), &config.layout, &config.render);
    (
        render_svg(&layout, &config.theme, &config.layout),
        node_count,
    )
}

#[test]
fn render_all_fixtures() {
    // Keep this list explicit so new fixtures must be added intentionally.
    let candidates = [
        "basic.json",
        "deep_chain.txt",
        "empty.txt",
        "filesystem.txt",
        "single.json",
        "wide.json",
    ];

    for name in candidates {
        assert!(fixture_path(name).exists(), "fixture missing: {}", name);
        let (svg, node_count) = render_fixture(name);
        assert!(svg.contains("<svg"), "{name}: missing <svg tag");
        assert!(svg.contains("</svg>"), "{name}: missing </svg tag");
        assert_eq!(
            svg.matches("<circle").count(),
            node_count,
            "{name}: one circle per node"
        );
        assert_eq!(
            svg.matches("<path class=\"link\"").count(),
            node_count.saturating_sub(1),
            "{name}: one link per non-root node"
        );
    }
}

#[test]
fn root_aggregate_equals_the_sum_of_all_values() {
    let input = std::fs::read_to_string(fixture_path("filesystem.txt")).unwrap();
    let records = parse_records(&input).unwrap();
    let total: f64 = records.iter().map(|record| record.value).sum();
    let tree = build_hierarchy(&records, "|").unwrap().unwrap();
    assert!((tree.root().aggregate - total).abs() < 1e-9);
}

#[test]
fn radius_never_exceeds_the_width_bound() {
    let input = std::fs::read_to_string(fixture_path("deep_chain.txt")).unwrap();
    let records = parse_records(&input).unwrap();
    let config = Config::default();
    let tree = build_hierarchy(&records, &config.layout.delimiter).unwrap();
    let layout = compute_layout(tree.as_ref(), &config.layout, &config.render);
    let bound = config.render.width * config.layout.radius_scale;
    for node in &layout.nodes {
        assert!(node.radius <= bound + 1e-3);
    }
}

#[test]
fn highlighting_a_leaf_keeps_its_whole_ancestry_visible() {
    let input = std::fs::read_to_string(fixture_path("filesystem.txt")).unwrap();
    let records = parse_records(&input).unwrap();
    let config = Config::default();
    let tree = build_hierarchy(&records, &config.layout.delimiter).unwrap();
    let layout = compute_layout(tree.as_ref(), &config.layout, &config.render);

    let path = ancestor_path("repo|src|render.rs", &records, &config.layout.delimiter);
    assert_eq!(path, ["repo", "repo|src", "repo|src|render.rs"]);

    let svg = render_svg_highlighted(&layout, &config.theme, &config.layout, Some(&path));
    let dimmed = svg.matches("opacity=\"0.15\"").count();
    let total_nodes = layout.nodes.len();
    let total_links = layout.links.len();
    // on-path: 3 nodes and 2 links
    assert_eq!(dimmed, (total_nodes - 3) + (total_links - 2));
}

#[test]
fn slash_delimiter_reparses_the_same_ids() {
    let records = parse_records("[{\"id\": \"a|b\", \"value\": 1}]").unwrap();
    // under "/" this literal id is a single root
    let tree = build_hierarchy(&records, "/").unwrap().unwrap();
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.root().label, "a|b");
    // under "|" its parent is missing
    assert!(build_hierarchy(&records, "|").is_err());
}
