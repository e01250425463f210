use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;

use crate::layout::Layout;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub nodes: Vec<NodeDump>,
    pub links: Vec<LinkDump>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: String,
    pub label: String,
    pub depth: usize,
    pub value: f64,
    pub aggregate: f64,
    pub angle: f32,
    pub radius: f32,
    pub leaf: bool,
}

#[derive(Debug, Serialize)]
pub struct LinkDump {
    pub source: String,
    pub target: String,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout) -> Self {
        let nodes = layout
            .nodes
            .iter()
            .map(|node| NodeDump {
                id: node.id.clone(),
                label: node.label.clone(),
                depth: node.depth,
                value: node.value,
                aggregate: node.aggregate,
                angle: node.angle,
                radius: node.radius,
                leaf: node.leaf,
            })
            .collect();

        let links = layout
            .links
            .iter()
            .map(|link| LinkDump {
                source: link.source.clone(),
                target: link.target.clone(),
            })
            .collect();

        LayoutDump {
            width: layout.width,
            height: layout.height,
            nodes,
            links,
        }
    }
}

pub fn write_layout_dump(path: &Path, layout: &Layout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
