mod tidy;
pub(crate) mod types;
pub use types::*;

use crate::config::{LayoutConfig, RenderConfig};
use crate::hierarchy::Tree;

/// Compute the radial layout: the full circle is distributed across the
/// tree in sorted sibling order and radius grows linearly with depth up to
/// `width * radius_scale`. Pure; the input tree is never mutated and an
/// absent tree yields an empty scene.
pub fn compute_layout(tree: Option<&Tree>, config: &LayoutConfig, render: &RenderConfig) -> Layout {
    let width = render.width.max(1.0);
    let height = render.height.max(1.0);
    let Some(tree) = tree else {
        return Layout {
            nodes: Vec::new(),
            links: Vec::new(),
            width,
            height,
        };
    };

    // siblings pack tighter than cousins, and spacing shrinks with depth so
    // the consumed circumference stays constant level over level
    let separation = |a: usize, b: usize| -> f32 {
        let units = if tree.node(a).parent == tree.node(b).parent {
            config.sibling_separation
        } else {
            config.cousin_separation
        };
        units / tree.node(a).depth.max(1) as f32
    };

    let raw = tidy::tidy_x(tree, &separation);
    let order = tree.descendants();

    let mut left = tree.root_index();
    let mut right = tree.root_index();
    for &index in &order {
        if raw[index] < raw[left] {
            left = index;
        }
        if raw[index] > raw[right] {
            right = index;
        }
    }
    // half a separation unit of margin on each side keeps the first and
    // last leaves from meeting at angle zero
    let margin = if left == right {
        1.0
    } else {
        separation(left, right) / 2.0
    };
    let shift = margin - raw[left];
    let angle_per_x = std::f32::consts::TAU / (raw[right] + margin + shift);
    let radius_per_depth = width * config.radius_scale / tree.max_depth().max(1) as f32;

    let mut nodes = Vec::with_capacity(order.len());
    let mut links = Vec::with_capacity(order.len().saturating_sub(1));
    for &index in &order {
        let node = tree.node(index);
        let angle = (raw[index] + shift) * angle_per_x;
        let radius = node.depth as f32 * radius_per_depth;
        nodes.push(NodeLayout {
            id: node.id.clone(),
            label: node.label.clone(),
            angle,
            radius,
            depth: node.depth,
            value: node.value,
            aggregate: node.aggregate,
            leaf: node.children.is_empty(),
        });
        if let Some(parent) = node.parent {
            let source = tree.node(parent);
            links.push(LinkLayout {
                source: source.id.clone(),
                target: node.id.clone(),
                source_angle: (raw[parent] + shift) * angle_per_x,
                source_radius: source.depth as f32 * radius_per_depth,
                target_angle: angle,
                target_radius: radius,
            });
        }
    }

    Layout {
        nodes,
        links,
        width,
        height,
    }
}

/// Polar to cartesian with angle zero at 12 o'clock, clockwise positive.
pub fn point_radial(angle: f32, radius: f32) -> (f32, f32) {
    (radius * angle.sin(), -(radius * angle.cos()))
}
