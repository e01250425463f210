use std::collections::HashMap;

use thiserror::Error;

use crate::ir::FlatRecord;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HierarchyError {
    /// A non-root record's derived parent id matches no input record.
    #[error("record {id:?} references missing parent {parent:?}")]
    MissingParent { id: String, parent: String },

    #[error("duplicate record id {0:?}")]
    DuplicateId(String),

    #[error("multiple root records: {first:?} and {second:?}")]
    MultipleRoots { first: String, second: String },

    #[error("no root record found")]
    NoRoot,

    #[error("record id {0:?} has an empty label segment")]
    EmptyLabel(String),
}

/// A node of the built hierarchy. Children are indices into the owning
/// [`Tree`] arena, kept in case-insensitive lexicographic order of their
/// full ids.
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub id: String,
    pub label: String,
    pub value: f64,
    /// Own value plus the sum of all descendants' values.
    pub aggregate: f64,
    pub depth: usize,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
}

/// Rooted tree over an arena of [`TreeNode`]s. Immutable once built; every
/// data read rebuilds it from the current records via [`build_hierarchy`].
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<TreeNode>,
    root: usize,
}

impl Tree {
    pub fn root_index(&self) -> usize {
        self.root
    }

    pub fn root(&self) -> &TreeNode {
        &self.nodes[self.root]
    }

    pub fn node(&self, index: usize) -> &TreeNode {
        &self.nodes[index]
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn max_depth(&self) -> usize {
        self.nodes.iter().map(|node| node.depth).max().unwrap_or(0)
    }

    /// Node indices in pre-order; siblings visit in their sorted order.
    pub fn descendants(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(index) = stack.pop() {
            order.push(index);
            for &child in self.nodes[index].children.iter().rev() {
                stack.push(child);
            }
        }
        order
    }
}

/// The substring of `id` after the last delimiter occurrence, or the whole
/// id when the delimiter does not appear.
pub fn extract_label<'a>(id: &'a str, delimiter: &str) -> &'a str {
    if delimiter.is_empty() {
        return id;
    }
    match id.rfind(delimiter) {
        Some(at) => &id[at + delimiter.len()..],
        None => id,
    }
}

fn parent_of<'a>(id: &'a str, delimiter: &str) -> Option<&'a str> {
    if delimiter.is_empty() {
        return None;
    }
    id.rfind(delimiter).map(|at| &id[..at])
}

/// Build the rooted hierarchy from flat records.
///
/// Parent ids are derived by truncating each id at its last delimiter, so a
/// record whose id is a plain-substring prefix of another is never treated
/// as its ancestor unless the boundary falls exactly on the delimiter.
/// Empty input yields `Ok(None)`; structural problems abort with an error
/// rather than producing a partial tree.
pub fn build_hierarchy(
    records: &[FlatRecord],
    delimiter: &str,
) -> Result<Option<Tree>, HierarchyError> {
    if records.is_empty() {
        return Ok(None);
    }

    let mut index_by_id: HashMap<&str, usize> = HashMap::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        // rejects "" outright and ids that end in the delimiter, e.g. "a|"
        if extract_label(&record.id, delimiter).is_empty() {
            return Err(HierarchyError::EmptyLabel(record.id.clone()));
        }
        if index_by_id.insert(record.id.as_str(), index).is_some() {
            return Err(HierarchyError::DuplicateId(record.id.clone()));
        }
    }

    let mut nodes: Vec<TreeNode> = records
        .iter()
        .map(|record| TreeNode {
            id: record.id.clone(),
            label: extract_label(&record.id, delimiter).to_string(),
            value: record.value,
            aggregate: 0.0,
            depth: 0,
            parent: None,
            children: Vec::new(),
        })
        .collect();

    let mut root: Option<usize> = None;
    for (index, record) in records.iter().enumerate() {
        match parent_of(&record.id, delimiter) {
            Some(parent_id) => {
                let Some(&parent_index) = index_by_id.get(parent_id) else {
                    return Err(HierarchyError::MissingParent {
                        id: record.id.clone(),
                        parent: parent_id.to_string(),
                    });
                };
                nodes[index].parent = Some(parent_index);
                nodes[parent_index].children.push(index);
            }
            None => match root {
                Some(first) => {
                    return Err(HierarchyError::MultipleRoots {
                        first: nodes[first].id.clone(),
                        second: record.id.clone(),
                    });
                }
                None => root = Some(index),
            },
        }
    }
    // Every parent id is a strict prefix of its child's id, so any rootless
    // record set already failed the missing-parent check above.
    let Some(root) = root else {
        return Err(HierarchyError::NoRoot);
    };

    let sort_keys: Vec<String> = nodes.iter().map(|node| node.id.to_lowercase()).collect();
    for index in 0..nodes.len() {
        if nodes[index].children.len() > 1 {
            let mut children = std::mem::take(&mut nodes[index].children);
            children.sort_by(|&a, &b| {
                sort_keys[a]
                    .cmp(&sort_keys[b])
                    .then_with(|| nodes[a].id.cmp(&nodes[b].id))
            });
            nodes[index].children = children;
        }
    }

    let mut order = Vec::with_capacity(nodes.len());
    let mut stack = vec![root];
    while let Some(index) = stack.pop() {
        order.push(index);
        let depth = nodes[index].depth;
        for position in 0..nodes[index].children.len() {
            let child = nodes[index].children[position];
            nodes[child].depth = depth + 1;
            stack.push(child);
        }
    }

    // pre-order reversed puts children before parents
    for &index in order.iter().rev() {
        let from_children: f64 = nodes[index]
            .children
            .iter()
            .map(|&child| nodes[child].aggregate)
            .sum();
        nodes[index].aggregate = nodes[index].value + from_children;
    }

    Ok(Some(Tree { nodes, root }))
}
