//! Tidy tree placement after Buchheim, Junger and Leipert, the linear-time
//! refinement of Reingold-Tilford. Produces an abstract x coordinate per
//! node; the caller maps x onto an angle and depth onto a radius.

use crate::hierarchy::Tree;

/// Working node. Index 0 is a synthetic parent above the real root, which
/// lets the first/second walks treat the root like any other child.
struct TidyNode {
    parent: usize,
    children: Vec<usize>,
    /// Index among siblings.
    number: usize,
    prelim: f32,
    modifier: f32,
    change: f32,
    shift: f32,
    thread: Option<usize>,
    ancestor: usize,
    /// Default ancestor carried per parent across its children's apportion
    /// passes.
    default_ancestor: Option<usize>,
    x: f32,
}

/// Abstract x per tree node, unnormalized. `separation` is called with two
/// same-depth tree indices (the later sibling first) and returns the gap to
/// keep between them.
pub(super) fn tidy_x(tree: &Tree, separation: &dyn Fn(usize, usize) -> f32) -> Vec<f32> {
    let count = tree.len();
    let root = tree.root_index() + 1;

    let mut nodes: Vec<TidyNode> = Vec::with_capacity(count + 1);
    nodes.push(TidyNode {
        parent: 0,
        children: vec![root],
        number: 0,
        prelim: 0.0,
        modifier: 0.0,
        change: 0.0,
        shift: 0.0,
        thread: None,
        ancestor: 0,
        default_ancestor: None,
        x: 0.0,
    });
    for index in 0..count {
        let node = tree.node(index);
        nodes.push(TidyNode {
            parent: node.parent.map_or(0, |parent| parent + 1),
            children: node.children.iter().map(|&child| child + 1).collect(),
            number: 0,
            prelim: 0.0,
            modifier: 0.0,
            change: 0.0,
            shift: 0.0,
            thread: None,
            ancestor: index + 1,
            default_ancestor: None,
            x: 0.0,
        });
    }
    for index in 0..=count {
        for position in 0..nodes[index].children.len() {
            let child = nodes[index].children[position];
            nodes[child].number = position;
        }
    }

    // separation over tidy indices; all calls involve real nodes only
    let sep = |a: usize, b: usize| separation(a - 1, b - 1);

    // post-order: place each subtree relative to its left siblings
    let mut order = Vec::with_capacity(count);
    let mut stack = vec![root];
    while let Some(index) = stack.pop() {
        order.push(index);
        for position in 0..nodes[index].children.len() {
            stack.push(nodes[index].children[position]);
        }
    }
    for &index in order.iter().rev() {
        first_walk(&mut nodes, index, &sep);
    }
    nodes[0].modifier = -nodes[root].prelim;

    // pre-order: accumulate modifiers into final positions
    stack.push(root);
    while let Some(index) = stack.pop() {
        let parent_modifier = nodes[nodes[index].parent].modifier;
        nodes[index].x = nodes[index].prelim + parent_modifier;
        nodes[index].modifier += parent_modifier;
        for position in (0..nodes[index].children.len()).rev() {
            stack.push(nodes[index].children[position]);
        }
    }

    let mut out = vec![0.0; count];
    for index in 0..count {
        out[index] = nodes[index + 1].x;
    }
    out
}

fn left_sibling(nodes: &[TidyNode], v: usize) -> Option<usize> {
    if nodes[v].number > 0 {
        Some(nodes[nodes[v].parent].children[nodes[v].number - 1])
    } else {
        None
    }
}

fn first_walk(nodes: &mut [TidyNode], v: usize, sep: &impl Fn(usize, usize) -> f32) {
    let w = left_sibling(nodes, v);
    if !nodes[v].children.is_empty() {
        execute_shifts(nodes, v);
        let first = nodes[v].children[0];
        let last = *nodes[v].children.last().unwrap_or(&first);
        let midpoint = (nodes[first].prelim + nodes[last].prelim) / 2.0;
        match w {
            Some(w) => {
                nodes[v].prelim = nodes[w].prelim + sep(v, w);
                nodes[v].modifier = nodes[v].prelim - midpoint;
            }
            None => nodes[v].prelim = midpoint,
        }
    } else if let Some(w) = w {
        nodes[v].prelim = nodes[w].prelim + sep(v, w);
    }
    let parent = nodes[v].parent;
    let default_ancestor = nodes[parent]
        .default_ancestor
        .unwrap_or(nodes[parent].children[0]);
    let updated = apportion(nodes, v, w, default_ancestor, sep);
    nodes[parent].default_ancestor = Some(updated);
}

/// Resolve overlaps between the subtree rooted at `v` and its left
/// siblings by walking the inner contours level by level and shifting `v`'s
/// subtree right whenever the contours touch.
fn apportion(
    nodes: &mut [TidyNode],
    v: usize,
    w: Option<usize>,
    mut ancestor: usize,
    sep: &impl Fn(usize, usize) -> f32,
) -> usize {
    let Some(w) = w else {
        return ancestor;
    };
    let mut vip = v;
    let mut vop = v;
    let mut vim = w;
    let mut vom = nodes[nodes[vip].parent].children[0];
    let mut sip = nodes[vip].modifier;
    let mut sop = nodes[vop].modifier;
    let mut sim = nodes[vim].modifier;
    let mut som = nodes[vom].modifier;

    let mut inner_right;
    let mut inner_left;
    loop {
        inner_right = next_right(nodes, vim);
        inner_left = next_left(nodes, vip);
        let (Some(next_im), Some(next_ip)) = (inner_right, inner_left) else {
            break;
        };
        vim = next_im;
        vip = next_ip;
        vom = next_left(nodes, vom).unwrap_or(vom);
        vop = next_right(nodes, vop).unwrap_or(vop);
        nodes[vop].ancestor = v;
        let shift = nodes[vim].prelim + sim - (nodes[vip].prelim + sip) + sep(vim, vip);
        if shift > 0.0 {
            let from = next_ancestor(nodes, vim, v, ancestor);
            move_subtree(nodes, from, v, shift);
            sip += shift;
            sop += shift;
        }
        sim += nodes[vim].modifier;
        sip += nodes[vip].modifier;
        som += nodes[vom].modifier;
        sop += nodes[vop].modifier;
    }

    if let Some(tail) = inner_right
        && next_right(nodes, vop).is_none()
    {
        nodes[vop].thread = Some(tail);
        nodes[vop].modifier += sim - sop;
    }
    if let Some(tail) = inner_left
        && next_left(nodes, vom).is_none()
    {
        nodes[vom].thread = Some(tail);
        nodes[vom].modifier += sip - som;
        ancestor = v;
    }
    ancestor
}

fn next_left(nodes: &[TidyNode], v: usize) -> Option<usize> {
    nodes[v].children.first().copied().or(nodes[v].thread)
}

fn next_right(nodes: &[TidyNode], v: usize) -> Option<usize> {
    nodes[v].children.last().copied().or(nodes[v].thread)
}

fn next_ancestor(nodes: &[TidyNode], vim: usize, v: usize, ancestor: usize) -> usize {
    let candidate = nodes[vim].ancestor;
    if nodes[candidate].parent == nodes[v].parent {
        candidate
    } else {
        ancestor
    }
}

fn move_subtree(nodes: &mut [TidyNode], from: usize, to: usize, shift: f32) {
    // `from` is always an earlier sibling of `to`
    let gap = (nodes[to].number - nodes[from].number) as f32;
    let change = shift / gap;
    nodes[to].change -= change;
    nodes[to].shift += shift;
    nodes[from].change += change;
    nodes[to].modifier += shift;
    nodes[to].prelim += shift;
}

fn execute_shifts(nodes: &mut [TidyNode], v: usize) {
    let mut shift = 0.0;
    let mut change = 0.0;
    for position in (0..nodes[v].children.len()).rev() {
        let w = nodes[v].children[position];
        nodes[w].prelim += shift;
        nodes[w].modifier += shift;
        change += nodes[w].change;
        shift += nodes[w].shift + change;
    }
}
